//! Core mapping types and operations
//!
//! This module provides the building blocks of the mapping layer: the
//! error taxonomy, scalar values, record descriptors and the schema
//! registry, DDL synthesis, the condition builder, the CRUD/join engine,
//! and seed-data loading.

pub mod condition;
pub mod config;
pub mod ddl;
pub mod engine;
pub mod error;
pub mod schema;
pub mod seed;
pub mod value;

// Re-export commonly used types
pub use condition::{build_where, Condition};
pub use config::{MapperConfig, ReferentialAction};
pub use engine::RecordStore;
pub use error::{MapperError, Result, VALID_OPERATORS};
pub use schema::{
    FieldDescriptor, ForeignKey, Record, RecordDescriptor, ScalarType, SchemaRegistry,
};
pub use seed::{load_seed_file, load_seed_str};
pub use value::{Row, RowSet, Value};
