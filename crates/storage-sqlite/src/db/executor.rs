//! Query executor interface.
//!
//! A uniform async interface that runs one parameterized statement and
//! yields either the produced rows or the affected-row count. Repositories
//! are written against [`QueryExecutor`] and never see the concrete engine.

use std::sync::Arc;

use async_trait::async_trait;
use capex_core::errors::Result;
use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

use crate::errors::StorageError;

/// A positional statement parameter or a stored column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(v: ValueRef<'_>) -> Self {
        match v {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(i) => SqlValue::Integer(i),
            ValueRef::Real(f) => SqlValue::Real(f),
            ValueRef::Text(t) => SqlValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => SqlValue::Blob(b.to_vec()),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlValue::Real(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

/// One result row, addressed by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<SqlValue>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    fn require(&self, column: &str) -> std::result::Result<&SqlValue, StorageError> {
        self.get(column)
            .ok_or_else(|| StorageError::decode(column, "missing column"))
    }

    pub fn get_i64(&self, column: &str) -> std::result::Result<i64, StorageError> {
        match self.require(column)? {
            SqlValue::Integer(i) => Ok(*i),
            other => Err(StorageError::decode(
                column,
                format!("expected integer, found {:?}", other),
            )),
        }
    }

    pub fn get_i32(&self, column: &str) -> std::result::Result<i32, StorageError> {
        i32::try_from(self.get_i64(column)?)
            .map_err(|e| StorageError::decode(column, e.to_string()))
    }

    /// Integers stored in a REAL column are widened.
    pub fn get_f64(&self, column: &str) -> std::result::Result<f64, StorageError> {
        match self.require(column)? {
            SqlValue::Real(f) => Ok(*f),
            SqlValue::Integer(i) => Ok(*i as f64),
            other => Err(StorageError::decode(
                column,
                format!("expected real, found {:?}", other),
            )),
        }
    }

    pub fn get_text(&self, column: &str) -> std::result::Result<&str, StorageError> {
        match self.require(column)? {
            SqlValue::Text(s) => Ok(s),
            other => Err(StorageError::decode(
                column,
                format!("expected text, found {:?}", other),
            )),
        }
    }
}

/// What a statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Rows(Vec<Row>),
    Affected(usize),
}

impl QueryOutput {
    /// Rows of a query; empty for a write.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            QueryOutput::Rows(rows) => rows,
            QueryOutput::Affected(_) => Vec::new(),
        }
    }

    /// Affected-row count of a write; zero for a query.
    pub fn affected(&self) -> usize {
        match self {
            QueryOutput::Rows(_) => 0,
            QueryOutput::Affected(n) => *n,
        }
    }
}

/// Runs parameterized statements against the relational store.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Executes `sql` with positional `params` (`?1`, `?2`, ...).
    ///
    /// Statements that return columns yield [`QueryOutput::Rows`]; all others
    /// yield [`QueryOutput::Affected`].
    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<QueryOutput>;
}
