use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use capex_core::errors::{DatabaseError, Error, Result};
use chrono::Utc;
use rusqlite::Connection;

use crate::errors::StorageError;

mod executor;
mod sqlite_executor;

pub use executor::{QueryExecutor, QueryOutput, Row, SqlValue};
pub use sqlite_executor::SqliteExecutor;

const CREATE_HEALTH_CHECK: &str = include_str!("../../migrations/0003_create_health_check.sql");

/// Schema migrations, applied in order. Migration `n` (1-based) is recorded by
/// setting `PRAGMA user_version` to `n` once its statement has run.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "0001_create_project",
        include_str!("../../migrations/0001_create_project.sql"),
    ),
    (
        "0002_create_project_name_year_index",
        include_str!("../../migrations/0002_create_project_name_year_index.sql"),
    ),
    ("0003_create_health_check", CREATE_HEALTH_CHECK),
];

/// Where the relational store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEngine {
    /// Process-local database, gone when the executor is dropped.
    Memory,
    /// On-disk database file; parent directories are created on open.
    File(PathBuf),
}

/// Opens the store and hands its connection to a new executor worker.
pub fn open(engine: &StorageEngine) -> Result<Arc<SqliteExecutor>> {
    let conn = match engine {
        StorageEngine::Memory => {
            info!("Opening in-memory database");
            Connection::open_in_memory().map_err(StorageError::from)?
        }
        StorageEngine::File(path) => {
            info!("Opening database at {}", path.display());
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir).map_err(|e| {
                    error!("Failed to create database directory: {}", e);
                    DatabaseError::ConnectionFailed(e.to_string())
                })?;
            }
            let conn = Connection::open(path).map_err(StorageError::from)?;
            conn.execute_batch(
                "
                PRAGMA journal_mode = WAL;
                PRAGMA busy_timeout = 30000;
                PRAGMA synchronous = NORMAL;
                ",
            )
            .map_err(StorageError::from)?;
            conn
        }
    };

    Ok(Arc::new(SqliteExecutor::spawn(conn)?))
}

/// Applies the migrations the store has not recorded yet.
pub async fn run_migrations(executor: &dyn QueryExecutor) -> Result<()> {
    let applied = schema_version(executor).await?;
    info!("Running database migrations (schema version {})", applied);

    for (index, (name, sql)) in MIGRATIONS.iter().enumerate().skip(applied) {
        let version = index + 1;
        let migrate = async {
            executor.execute(sql, vec![]).await?;
            executor
                .execute(&format!("PRAGMA user_version = {}", version), vec![])
                .await
        };
        migrate.await.map_err(|e| {
            error!("Database migration {} failed: {}", name, e);
            Error::Database(DatabaseError::MigrationFailed(format!("{}: {}", name, e)))
        })?;
        info!("  - {}", name);
    }

    Ok(())
}

/// Number of migrations already applied, as recorded in `PRAGMA user_version`.
async fn schema_version(executor: &dyn QueryExecutor) -> Result<usize> {
    let rows = executor.execute("PRAGMA user_version", vec![]).await?.into_rows();
    let version = match rows.first() {
        Some(row) => row.get_i64("user_version")?,
        None => 0,
    };
    Ok(usize::try_from(version).unwrap_or(0))
}

/// Proves the store accepts writes by recording the current time.
///
/// Creates the `healthCheck` table when missing. Returns the recorded
/// RFC 3339 timestamp.
pub async fn health_check(executor: &dyn QueryExecutor) -> Result<String> {
    let checked_at = Utc::now().to_rfc3339();

    executor.execute(CREATE_HEALTH_CHECK, vec![]).await?;
    executor
        .execute(
            "INSERT INTO healthCheck (value) VALUES (?1)",
            vec![checked_at.clone().into()],
        )
        .await?;

    Ok(checked_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_repeatable() {
        let executor = open(&StorageEngine::Memory).unwrap();
        run_migrations(executor.as_ref()).await.unwrap();
        run_migrations(executor.as_ref()).await.unwrap();

        let rows = executor
            .execute(
                "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                vec![],
            )
            .await
            .unwrap()
            .into_rows();
        let names: Vec<&str> = rows.iter().map(|r| r.get_text("name").unwrap()).collect();
        assert_eq!(names, vec!["healthCheck", "project"]);
    }

    #[tokio::test]
    async fn test_migrations_record_schema_version() {
        let executor = open(&StorageEngine::Memory).unwrap();
        assert_eq!(schema_version(executor.as_ref()).await.unwrap(), 0);

        run_migrations(executor.as_ref()).await.unwrap();
        assert_eq!(
            schema_version(executor.as_ref()).await.unwrap(),
            MIGRATIONS.len()
        );
    }

    #[tokio::test]
    async fn test_recorded_migrations_are_skipped() {
        let executor = open(&StorageEngine::Memory).unwrap();
        executor
            .execute(&format!("PRAGMA user_version = {}", MIGRATIONS.len()), vec![])
            .await
            .unwrap();

        run_migrations(executor.as_ref()).await.unwrap();

        let rows = executor
            .execute("SELECT name FROM sqlite_master WHERE type = 'table'", vec![])
            .await
            .unwrap()
            .into_rows();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_migrations_resume_after_recorded_version() {
        let executor = open(&StorageEngine::Memory).unwrap();
        executor.execute("PRAGMA user_version = 2", vec![]).await.unwrap();

        run_migrations(executor.as_ref()).await.unwrap();

        let rows = executor
            .execute("SELECT name FROM sqlite_master WHERE type = 'table'", vec![])
            .await
            .unwrap()
            .into_rows();
        let names: Vec<&str> = rows.iter().map(|r| r.get_text("name").unwrap()).collect();
        assert_eq!(names, vec!["healthCheck"]);
    }

    #[tokio::test]
    async fn test_health_check_records_timestamp() {
        let executor = open(&StorageEngine::Memory).unwrap();
        run_migrations(executor.as_ref()).await.unwrap();

        let checked_at = health_check(executor.as_ref()).await.unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&checked_at).is_ok());

        let rows = executor
            .execute("SELECT value FROM healthCheck", vec![])
            .await
            .unwrap()
            .into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_text("value").unwrap(), checked_at);
    }

    #[tokio::test]
    async fn test_health_check_creates_its_table() {
        let executor = open(&StorageEngine::Memory).unwrap();
        health_check(executor.as_ref()).await.unwrap();
        health_check(executor.as_ref()).await.unwrap();

        let rows = executor
            .execute("SELECT COUNT(*) AS n FROM healthCheck", vec![])
            .await
            .unwrap()
            .into_rows();
        assert_eq!(rows[0].get_i64("n").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_file_engine_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("capex.db");

        let executor = open(&StorageEngine::File(path.clone())).unwrap();
        run_migrations(executor.as_ref()).await.unwrap();
        assert!(path.exists());
    }
}
