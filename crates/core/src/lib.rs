//! Capex Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the capital budget service:
//! the `Project` entity, payload validation, currency conversion and the
//! service that orchestrates them. It is storage-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod projects;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
