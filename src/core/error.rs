//! Error types for the record mapping layer
//!
//! This module defines all error types that can occur during schema
//! synthesis and record operations.

/// Result type alias for mapper operations
pub type Result<T> = std::result::Result<T, MapperError>;

/// The operators accepted by the condition builder.
pub const VALID_OPERATORS: [&str; 5] = ["=", "!=", "<", ">", "IN"];

/// Error types for record operations
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    /// Condition uses an operator outside the valid set
    #[error("Not a valid operator: {operator:?}. Valid operators: {:?}", VALID_OPERATORS)]
    InvalidOperator { operator: String },

    /// Insert/update violates primary-key uniqueness
    #[error("Duplicate primary key {key:?} in table {table}")]
    DuplicateKey { table: String, key: String },

    /// Insert/update/delete violates a referential constraint
    #[error("Foreign key constraint violated on table {table}: {detail}")]
    ForeignKeyViolation { table: String, detail: String },

    /// Record type is not present in the schema registry
    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    /// Column does not exist on the record type
    #[error("Column not found on {table}: {column}")]
    ColumnNotFound { table: String, column: String },

    /// Raw value could not be coerced to the declared scalar type
    #[error("Type mismatch: expected {expected}, got {value:?}")]
    TypeMismatch { expected: String, value: String },

    /// Insert value list does not match the descriptor's field count
    #[error("Wrong value count for {table}: expected {expected}, got {actual}")]
    FieldArity {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// Seed object keys do not match the record type's field names
    #[error("Seed data for {table} does not match its schema: {detail}")]
    SeedShape { table: String, detail: String },

    /// SQLite error (unclassified store failure)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed document parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MapperError {
    /// Create an invalid operator error
    pub fn invalid_operator<S: Into<String>>(operator: S) -> Self {
        MapperError::InvalidOperator {
            operator: operator.into(),
        }
    }

    /// Create a duplicate key error
    pub fn duplicate_key<T: Into<String>, K: Into<String>>(table: T, key: K) -> Self {
        MapperError::DuplicateKey {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a foreign key violation error
    pub fn foreign_key<T: Into<String>, D: Into<String>>(table: T, detail: D) -> Self {
        MapperError::ForeignKeyViolation {
            table: table.into(),
            detail: detail.into(),
        }
    }

    /// Create a column not found error
    pub fn column_not_found<T: Into<String>, C: Into<String>>(table: T, column: C) -> Self {
        MapperError::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<E: Into<String>, V: Into<String>>(expected: E, value: V) -> Self {
        MapperError::TypeMismatch {
            expected: expected.into(),
            value: value.into(),
        }
    }

    /// Create a seed shape error
    pub fn seed_shape<T: Into<String>, D: Into<String>>(table: T, detail: D) -> Self {
        MapperError::SeedShape {
            table: table.into(),
            detail: detail.into(),
        }
    }

    /// True for the two constraint-violation kinds the engine classifies
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            MapperError::DuplicateKey { .. } | MapperError::ForeignKeyViolation { .. }
        )
    }
}
