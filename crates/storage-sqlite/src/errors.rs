//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap `rusqlite` errors and convert
//! them to the storage-agnostic error types defined in `capex_core`.

use capex_core::errors::{DatabaseError, Error};
use rusqlite::ffi;
use thiserror::Error;

/// Storage-specific errors that wrap SQLite types.
///
/// These errors are internal to the storage layer and are converted to
/// `capex_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    #[error("Column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl StorageError {
    pub(crate) fn decode(column: &str, message: impl Into<String>) -> Self {
        StorageError::Decode {
            column: column.to_string(),
            message: message.into(),
        }
    }
}

/// Whether a SQLite error is a primary key or unique constraint failure.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e))
            }
            StorageError::QueryFailed(ref e) if is_unique_violation(e) => {
                Error::Database(DatabaseError::UniqueViolation(e.to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            e @ StorageError::Decode { .. } => {
                Error::Database(DatabaseError::Decode(e.to_string()))
            }
        }
    }
}
