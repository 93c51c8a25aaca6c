//! Embedded store implementation
//!
//! One backend: a local SQLite file accessed through a fresh connection
//! per operation.

pub mod sqlite;

pub use sqlite::SqliteStore;
