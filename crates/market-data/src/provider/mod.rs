//! Exchange-rate provider abstractions and implementations.
//!
//! This module contains:
//! - The `ExchangeRateProvider` trait that all providers implement
//! - Concrete provider implementations

mod traits;

pub mod exchange_rate_api;

pub use traits::ExchangeRateProvider;
