//! Capex Market Data Crate
//!
//! Provider-agnostic exchange-rate lookup for the capital budget service.
//!
//! # Overview
//!
//! A rate lookup resolves a single currency pair to a numeric multiplier by
//! asking an external provider for the full rate table anchored at the base
//! currency and selecting the target entry. Nothing is cached: every lookup
//! performs exactly one outbound call.
//!
//! ```text
//! +------------------+     +-----------------------+     +------------------+
//! |  FX service      | --> | ExchangeRateProvider  | --> |  Rate provider   |
//! |  (capex-core)    |     |  (this crate)         |     |  (HTTP, JSON)    |
//! +------------------+     +-----------------------+     +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ExchangeRateProvider`] - Trait implemented by every rate source
//! - [`ExchangeRateApiProvider`] - HTTP client for `{base}/{key}/latest/{from}`
//! - [`RateError`] - Failure taxonomy of a lookup

pub mod errors;
pub mod provider;

pub use errors::RateError;
pub use provider::exchange_rate_api::ExchangeRateApiProvider;
pub use provider::ExchangeRateProvider;
