//! # Record Mapper
//!
//! A schema-driven record mapping layer over SQLite: declared record
//! schemas are materialized as tables (primary keys, column types,
//! foreign-key constraints), and a small engine synthesizes the SQL for
//! CRUD operations, dynamic filters, and foreign-key-aware detail views
//! with consistent referential-integrity error semantics.
//!
//! ## Features
//!
//! - **Declarative schemas**: record types describe their fields once at
//!   startup; table DDL is derived from the descriptors
//! - **Typed errors**: primary-key and foreign-key violations surface as
//!   dedicated error kinds, everything else propagates unchanged
//! - **Injection-safe filters**: condition values always travel as bound
//!   parameters, operators are validated against a closed set
//! - **Detail views**: one LEFT JOIN per declared foreign key, aliased so
//!   multiple references to the same table never collide
//! - **Embedded store**: a local SQLite file, one connection per
//!   operation, no pool and no background runtime
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use record_mapper::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut registry = SchemaRegistry::new();
//!     registry.register(RecordDescriptor::new(
//!         "Airports",
//!         "code",
//!         vec![
//!             FieldDescriptor::new("code", ScalarType::Text),
//!             FieldDescriptor::new("name", ScalarType::Text),
//!             FieldDescriptor::new("country", ScalarType::Text),
//!         ],
//!     ));
//!
//!     let store = SqliteStore::new("database.db");
//!     let engine = RecordStore::new(store, registry, MapperConfig::new());
//!
//!     engine.create_all_tables()?;
//!     engine.insert_row("Airports", vec!["JFK".into(), "JFK Intl".into(), "US".into()])?;
//!
//!     let rows = engine.find(
//!         "Airports",
//!         &[Condition::new("country", "=", "US")],
//!     )?;
//!     for row in rows {
//!         if let Some(name) = row.get("name") {
//!             println!("Airport: {}", name.as_string());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Project structure
//!
//! ```text
//! record_mapper/
//! ├── src/
//! │   ├── core/              # Mapping types and operations
//! │   │   ├── error.rs       # Error taxonomy
//! │   │   ├── value.rs       # Scalar values, generic rows
//! │   │   ├── schema.rs      # Descriptors and the registry
//! │   │   ├── config.rs      # Referential-action configuration
//! │   │   ├── condition.rs   # WHERE-clause builder
//! │   │   ├── ddl.rs         # Table DDL synthesis
//! │   │   ├── engine.rs      # CRUD + join/detail resolver
//! │   │   ├── seed.rs        # JSON seed loading
//! │   │   └── mod.rs
//! │   ├── store/             # Embedded store access
//! │   │   ├── sqlite.rs      # Per-operation connection scope
//! │   │   └── mod.rs
//! │   └── lib.rs
//! ├── tests/                 # Integration and property tests
//! ├── Cargo.toml
//! └── README.md
//! ```

/// Core mapping types and operations
pub mod core;

/// Embedded store access
pub mod store;

/// Prelude for convenient imports
///
/// ```rust
/// use record_mapper::prelude::*;
///
/// fn main() -> Result<()> {
///     let registry = SchemaRegistry::new();
///     let _ = registry.descriptors();
///     Ok(())
/// }
/// ```
pub mod prelude {
    pub use crate::core::{
        build_where, load_seed_file, load_seed_str, Condition, FieldDescriptor, ForeignKey,
        MapperConfig, MapperError, Record, RecordDescriptor, RecordStore, ReferentialAction,
        Result, Row, RowSet, ScalarType, SchemaRegistry, Value, VALID_OPERATORS,
    };
    pub use crate::store::SqliteStore;
}

// Re-export at root level for convenience
pub use crate::core::{
    build_where, load_seed_file, load_seed_str, Condition, FieldDescriptor, ForeignKey,
    MapperConfig, MapperError, Record, RecordDescriptor, RecordStore, ReferentialAction, Result,
    Row, RowSet, ScalarType, SchemaRegistry, Value, VALID_OPERATORS,
};
pub use crate::store::SqliteStore;
