//! Table DDL synthesis from record descriptors
//!
//! Statement text only; execution and catalog enumeration live on the
//! engine so synthesis stays trivially unit-testable.

use super::config::MapperConfig;
use super::schema::{RecordDescriptor, ScalarType};

/// Synthesize the CREATE TABLE statement for one record type.
///
/// The primary-key column leads, the remaining fields follow in
/// declaration order, and one FOREIGN KEY clause per reference closes the
/// definition with the configured referential actions. A primary key not
/// declared among the fields falls back to an INTEGER column.
pub fn create_table_sql(descriptor: &RecordDescriptor, config: &MapperConfig) -> String {
    let pk_type = descriptor
        .field(&descriptor.primary_key)
        .map(|f| f.scalar_type)
        .unwrap_or(ScalarType::Integer);

    let mut parts = vec![format!(
        "{} {} PRIMARY KEY",
        descriptor.primary_key,
        pk_type.sql_type()
    )];

    for field in &descriptor.fields {
        if field.name != descriptor.primary_key {
            parts.push(format!("{} {}", field.name, field.scalar_type.sql_type()));
        }
    }

    for (field, fk) in descriptor.foreign_keys() {
        parts.push(format!(
            "FOREIGN KEY ({}) REFERENCES {}({}) ON DELETE {} ON UPDATE {}",
            field.name,
            fk.table,
            fk.column,
            config.on_delete.as_sql(),
            config.on_update.as_sql()
        ));
    }

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        descriptor.name,
        parts.join(", ")
    )
}

/// Synthesize the DROP TABLE statement for one table
pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS \"{}\"", table)
}
