use std::sync::Arc;

use async_trait::async_trait;
use capex_core::errors::{DatabaseError, Result};
use rusqlite::Connection;
use tokio::sync::{mpsc, oneshot};

use super::executor::{QueryExecutor, QueryOutput, Row, SqlValue};
use crate::errors::StorageError;

/// A statement for the worker plus the channel its outcome goes back on.
type Job = (String, Vec<SqlValue>, oneshot::Sender<Result<QueryOutput>>);

/// Bound of the job queue.
const QUEUE_CAPACITY: usize = 1024;

/// Handle for sending statements to the SQLite worker.
///
/// The worker owns the only connection to the store and runs statements one
/// at a time on a dedicated thread, so callers on the async runtime never
/// block on SQLite. An in-memory database lives exactly as long as the worker.
#[derive(Clone)]
pub struct SqliteExecutor {
    tx: mpsc::Sender<Job>,
}

impl SqliteExecutor {
    /// Spawns the worker thread that takes ownership of `conn`.
    ///
    /// The worker stops once every handle has been dropped.
    pub fn spawn(conn: Connection) -> Result<Self> {
        let (tx, mut rx) = mpsc::channel::<Job>(QUEUE_CAPACITY);

        std::thread::Builder::new()
            .name("capex-sqlite".to_string())
            .spawn(move || {
                while let Some((sql, params, reply_tx)) = rx.blocking_recv() {
                    let result = run_statement(&conn, &sql, &params).map_err(|e| {
                        log::debug!("Statement failed: {}: {}", sql, e);
                        StorageError::from(e).into()
                    });
                    // Ignore error if the requester has gone away.
                    let _ = reply_tx.send(result);
                }
                log::debug!("SQLite worker stopped");
            })
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        Ok(Self { tx })
    }
}

fn run_statement(
    conn: &Connection,
    sql: &str,
    params: &[SqlValue],
) -> rusqlite::Result<QueryOutput> {
    let mut stmt = conn.prepare_cached(sql)?;
    let bound = rusqlite::params_from_iter(params.iter());

    if stmt.column_count() == 0 {
        return Ok(QueryOutput::Affected(stmt.execute(bound)?));
    }

    let columns: Arc<[String]> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let width = columns.len();

    let mut rows = stmt.query(bound)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(SqlValue::from(row.get_ref(i)?));
        }
        out.push(Row::new(columns.clone(), values));
    }
    Ok(QueryOutput::Rows(out))
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<QueryOutput> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send((sql.to_string(), params, reply_tx))
            .await
            .map_err(|_| DatabaseError::ConnectionFailed("SQLite worker has stopped".to_string()))?;

        reply_rx.await.map_err(|_| {
            DatabaseError::ConnectionFailed("SQLite worker dropped the reply".to_string())
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capex_core::errors::Error;

    async fn executor() -> SqliteExecutor {
        let executor = SqliteExecutor::spawn(Connection::open_in_memory().unwrap()).unwrap();
        executor
            .execute(
                "CREATE TABLE item (id INTEGER PRIMARY KEY, label TEXT, price REAL)",
                vec![],
            )
            .await
            .unwrap();
        executor
    }

    #[tokio::test]
    async fn test_write_reports_affected_rows() {
        let executor = executor().await;

        let out = executor
            .execute(
                "INSERT INTO item (id, label, price) VALUES (?1, ?2, ?3)",
                vec![1i64.into(), "bolt".into(), 0.25.into()],
            )
            .await
            .unwrap();
        assert_eq!(out, QueryOutput::Affected(1));

        let out = executor
            .execute("UPDATE item SET price = ?1 WHERE id = ?2", vec![1.0.into(), 99i64.into()])
            .await
            .unwrap();
        assert_eq!(out.affected(), 0);
    }

    #[tokio::test]
    async fn test_query_returns_rows_in_storage_order() {
        let executor = executor().await;
        for (id, label) in [(2i64, "nut"), (1, "bolt")] {
            executor
                .execute(
                    "INSERT INTO item (id, label, price) VALUES (?1, ?2, NULL)",
                    vec![id.into(), label.into()],
                )
                .await
                .unwrap();
        }

        let rows = executor
            .execute("SELECT id, label, price FROM item ORDER BY id", vec![])
            .await
            .unwrap()
            .into_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get_i64("id").unwrap(), 1);
        assert_eq!(rows[0].get_text("label").unwrap(), "bolt");
        assert_eq!(rows[0].get("price"), Some(&SqlValue::Null));
    }

    #[tokio::test]
    async fn test_empty_result_is_empty_rows() {
        let executor = executor().await;
        let out = executor
            .execute("SELECT id FROM item WHERE id = ?1", vec![5i64.into()])
            .await
            .unwrap();
        assert_eq!(out, QueryOutput::Rows(vec![]));
    }

    #[tokio::test]
    async fn test_primary_key_collision_is_unique_violation() {
        let executor = executor().await;
        let insert = "INSERT INTO item (id, label, price) VALUES (?1, ?2, ?3)";
        executor
            .execute(insert, vec![1i64.into(), "bolt".into(), 1.0.into()])
            .await
            .unwrap();

        let err = executor
            .execute(insert, vec![1i64.into(), "other".into(), 2.0.into()])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_bad_sql_is_query_failure() {
        let executor = executor().await;
        let err = executor.execute("SELEC nonsense", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::QueryFailed(_))));
    }
}
