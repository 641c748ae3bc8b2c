//! SQLite storage implementation for the capital budget service.
//!
//! This crate provides all database-related functionality using `rusqlite`.
//! It implements the repository traits defined in `capex-core` and contains:
//! - The query executor: a parameterized-query interface backed by a single
//!   SQLite connection owned by a worker thread
//! - Storage engine selection (on-disk file or in-memory)
//! - Embedded schema migrations
//! - Repository implementations for domain entities
//!
//! # Architecture
//!
//! ```text
//!   core (domain)
//!        │
//!        ▼
//!   ProjectRepository ──► QueryExecutor ──► SQLite worker ──► SQLite DB
//! ```

pub mod db;
pub mod errors;

// Repository implementations
pub mod projects;

// Re-export database utilities
pub use db::{
    health_check, open, run_migrations, QueryExecutor, QueryOutput, Row, SqlValue,
    SqliteExecutor, StorageEngine,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from capex-core for convenience
pub use capex_core::errors::{DatabaseError, Error, Result};
