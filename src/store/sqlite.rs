//! SQLite store with per-operation connection scope
//!
//! Every operation opens a connection, turns foreign-key enforcement on,
//! runs its statements, and releases the connection before returning. No
//! pool is kept; rusqlite autocommits each statement, so every top-level
//! call is its own implicit transaction.

use crate::core::error::{MapperError, Result};
use crate::core::value::{Row, RowSet, Value};
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{ffi, params_from_iter, Connection, ToSql};
use std::path::{Path, PathBuf};

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Integer(v) => ToSqlOutput::Borrowed(ValueRef::Integer(*v)),
            Value::Real(v) => ToSqlOutput::Borrowed(ValueRef::Real(*v)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// Handle to a SQLite database file.
///
/// Holds only the path; connections are opened per operation. The store's
/// own file locking is the only safety net against concurrent external
/// access, and this layer assumes a single active client.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Create a store handle for the given database file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection with foreign-key enforcement on
    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(conn)
    }

    /// Run a closure against a fresh connection, released on return.
    ///
    /// Used for operations that need multiple statements on the same
    /// connection, such as the catalog-wide drop.
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.open()?;
        f(&conn)
    }

    /// Execute one parameterized statement, returning the affected row
    /// count
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<u64> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let affected = stmt.execute(params_from_iter(params.iter()))?;
            Ok(affected as u64)
        })
    }

    /// Run one parameterized SELECT, returning generic rows in
    /// store-native order
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<RowSet> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map(params_from_iter(params.iter()), row_to_record)?;

            let mut results = Vec::new();
            for row in rows {
                results.push(row?);
            }
            Ok(results)
        })
    }
}

/// Convert a rusqlite row to a generic column->value mapping
pub(crate) fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Row> {
    let mut record = Row::new();
    let column_count = row.as_ref().column_count();

    for i in 0..column_count {
        let column_name = row.as_ref().column_name(i)?.to_string();
        let value = match row.get_ref(i)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).to_string()),
            ValueRef::Blob(v) => Value::Text(String::from_utf8_lossy(v).to_string()),
        };
        record.insert(column_name, value);
    }

    Ok(record)
}

/// Translate SQLite constraint failures into the two classified error
/// kinds; anything else passes through unchanged.
///
/// `key` is the offending primary-key value when the caller knows it;
/// `fk_detail` names the implicated target tables/columns.
pub(crate) fn classify_constraint(
    err: MapperError,
    table: &str,
    key: Option<String>,
    fk_detail: &str,
) -> MapperError {
    let MapperError::Sqlite(rusqlite::Error::SqliteFailure(cause, message)) = &err else {
        return err;
    };

    match cause.extended_code {
        ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
            let key = key
                .or_else(|| message.clone())
                .unwrap_or_else(|| "<unknown>".to_string());
            MapperError::duplicate_key(table, key)
        }
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => MapperError::foreign_key(table, fk_detail),
        _ => err,
    }
}
