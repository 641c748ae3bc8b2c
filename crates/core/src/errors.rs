//! Core error types for the capital budget service.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from SQLite) are converted to these types by the storage layer, and the
//! HTTP layer maps each variant to a status code with a single `match`.

use thiserror::Error;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Client input was malformed.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No project matched the lookup.
    #[error("{0}")]
    NotFound(String),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    /// Currency conversion failed; carries the rate lookup message.
    #[error("{0}")]
    Fx(#[from] FxError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for persistence operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open the store or reach its worker.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A primary key or unique constraint was violated.
    #[error("{0}")]
    UniqueViolation(String),

    /// A write reported zero affected rows without a constraint signal.
    #[error("No rows affected: {0}")]
    NoRowsAffected(String),

    /// A stored value could not be mapped onto the domain type.
    #[error("Failed to decode row: {0}")]
    Decode(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

/// Validation errors for request payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid year")]
    InvalidYear,

    #[error("Year must be a number")]
    YearNotInteger,

    #[error("Invalid currency code")]
    InvalidCurrency,

    #[error("Currency must be 3-letter code")]
    CurrencyCodeLength,

    #[error("Invalid value for field: {0}")]
    InvalidField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
