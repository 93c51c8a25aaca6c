//! The record store engine: CRUD operations and the join/detail resolver
//!
//! Consumes the schema registry and the condition builder per call; every
//! operation acquires its own connection scope through the store and
//! classifies constraint violations into the typed error kinds.

use super::condition::{build_where, Condition};
use super::config::MapperConfig;
use super::ddl;
use super::error::{MapperError, Result};
use super::schema::{Record, RecordDescriptor, SchemaRegistry};
use super::value::{RowSet, Value};
use crate::store::sqlite::{classify_constraint, SqliteStore};
use tracing::{debug, info, warn};

/// Schema-driven data-access engine over a SQLite store.
///
/// Owns the registry and configuration for its lifetime; the registry is
/// expected to be fully populated before the first operation.
pub struct RecordStore {
    store: SqliteStore,
    registry: SchemaRegistry,
    config: MapperConfig,
}

impl RecordStore {
    /// Create an engine from a store handle, a populated registry, and the
    /// process-wide configuration
    pub fn new(store: SqliteStore, registry: SchemaRegistry, config: MapperConfig) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }

    /// The schema registry backing this engine
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The engine configuration
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// The underlying store handle
    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// Create the table for every registered record type, in registration
    /// order.
    ///
    /// Not transactional across tables; a failed statement propagates and
    /// leaves the earlier tables in place.
    pub fn create_all_tables(&self) -> Result<()> {
        self.store.with_connection(|conn| {
            for descriptor in self.registry.descriptors() {
                let sql = ddl::create_table_sql(descriptor, &self.config);
                info!(table = %descriptor.name, "creating table");
                debug!(%sql, "running sql");
                conn.execute(&sql, [])?;
            }
            Ok(())
        })
    }

    /// Drop every table in the store's catalog, registered or not.
    ///
    /// Foreign-key enforcement is switched off for the duration so drop
    /// order does not matter; orphaned tables from stale schemas are
    /// removed as well. Destructive.
    pub fn drop_all_tables(&self) -> Result<()> {
        warn!(path = %self.store.path().display(), "dropping every table in the store");
        self.store.with_connection(|conn| {
            conn.execute("PRAGMA foreign_keys = OFF", [])?;

            let mut stmt =
                conn.prepare("SELECT name FROM sqlite_schema WHERE type = 'table'")?;
            let tables = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;

            for table in tables {
                // sqlite_sequence and friends cannot be dropped
                if table.starts_with("sqlite_") {
                    continue;
                }
                let sql = ddl::drop_table_sql(&table);
                debug!(%sql, "running sql");
                conn.execute(&sql, [])?;
            }

            conn.execute("PRAGMA foreign_keys = ON", [])?;
            Ok(())
        })
    }

    /// Drop a single named table if it exists
    pub fn drop_table(&self, type_name: &str) -> Result<()> {
        let sql = ddl::drop_table_sql(type_name);
        debug!(%sql, "running sql");
        self.store.execute(&sql, &[])?;
        Ok(())
    }

    /// Insert a typed record instance
    pub fn insert<T: Record>(&self, record: &T) -> Result<()> {
        let descriptor = T::descriptor();
        self.insert_row(&descriptor.name, record.values())
    }

    /// Insert one row from an ordered value list.
    ///
    /// Values must match the descriptor's field order and count. Primary
    /// key collisions fail with [`MapperError::DuplicateKey`], missing
    /// parent rows with [`MapperError::ForeignKeyViolation`]; anything
    /// else propagates unclassified.
    pub fn insert_row(&self, type_name: &str, values: Vec<Value>) -> Result<()> {
        let descriptor = self.registry.get(type_name)?;
        if values.len() != descriptor.fields.len() {
            return Err(MapperError::FieldArity {
                table: type_name.to_string(),
                expected: descriptor.fields.len(),
                actual: values.len(),
            });
        }

        let columns = descriptor.field_names().join(", ");
        let placeholders = vec!["?"; values.len()].join(", ");
        let sql = format!(
            "INSERT INTO {}({}) VALUES ({})",
            descriptor.name, columns, placeholders
        );
        debug!(%sql, params = values.len(), "running insert");

        let key = descriptor
            .primary_key_index()
            .map(|i| values[i].as_string());
        let fk_detail = referenced_targets(descriptor);

        self.store
            .execute(&sql, &values)
            .map(|_| ())
            .map_err(|e| classify_constraint(e, type_name, key, &fk_detail))
    }

    /// Filtered select. Empty conditions return the whole table, in
    /// store-native row order.
    pub fn find(&self, type_name: &str, conditions: &[Condition]) -> Result<RowSet> {
        let descriptor = self.registry.get(type_name)?;
        let (clause, params) = build_where(conditions)?;

        let mut sql = format!("SELECT * FROM {}", descriptor.name);
        if !clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }
        debug!(%sql, params = params.len(), "running select");

        self.store.query(&sql, &params)
    }

    /// Bulk membership lookup on `column`, or the primary key when no
    /// column is given. No operator flexibility.
    pub fn find_by_keys(
        &self,
        type_name: &str,
        keys: &[Value],
        column: Option<&str>,
    ) -> Result<RowSet> {
        let descriptor = self.registry.get(type_name)?;
        let column = column.unwrap_or(descriptor.primary_key.as_str());
        if descriptor.field(column).is_none() {
            return Err(MapperError::column_not_found(type_name, column));
        }

        let placeholders = vec!["?"; keys.len()].join(", ");
        let sql = format!(
            "SELECT * FROM {} WHERE {} IN ({})",
            descriptor.name, column, placeholders
        );
        debug!(%sql, params = keys.len(), "running select");

        self.store.query(&sql, keys)
    }

    /// Update assignment columns on every row matching the conditions.
    ///
    /// Assignment values bind first, condition values after. Returns the
    /// affected row count; constraint violations classify the same way as
    /// insert.
    pub fn update(
        &self,
        type_name: &str,
        assignments: &[(String, Value)],
        conditions: &[Condition],
    ) -> Result<u64> {
        let descriptor = self.registry.get(type_name)?;
        for (column, _) in assignments {
            if descriptor.field(column).is_none() {
                return Err(MapperError::column_not_found(type_name, column));
            }
        }

        let set_clause = assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let mut params: Vec<Value> = assignments.iter().map(|(_, v)| v.clone()).collect();

        let (clause, where_params) = build_where(conditions)?;
        let mut sql = format!("UPDATE {} SET {}", descriptor.name, set_clause);
        if !clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
            params.extend(where_params);
        }
        debug!(%sql, params = params.len(), "running update");

        let fk_detail = referenced_targets(descriptor);
        self.store
            .execute(&sql, &params)
            .map_err(|e| classify_constraint(e, type_name, None, &fk_detail))
    }

    /// Delete every row matching the conditions; empty conditions empty
    /// the table.
    ///
    /// Returns the affected row count. Rows still referenced by dependent
    /// tables fail with [`MapperError::ForeignKeyViolation`] under a
    /// restrictive referential action.
    pub fn delete(&self, type_name: &str, conditions: &[Condition]) -> Result<u64> {
        let descriptor = self.registry.get(type_name)?;
        let (clause, params) = build_where(conditions)?;

        let mut sql = format!("DELETE FROM {}", descriptor.name);
        if !clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }
        debug!(%sql, params = params.len(), "running delete");

        let fk_detail = format!("rows referencing {} remain", descriptor.name);
        self.store
            .execute(&sql, &params)
            .map_err(|e| classify_constraint(e, type_name, None, &fk_detail))
    }

    /// Denormalized read of a whole table with every foreign key resolved.
    ///
    /// Own columns come back as `<Type>_<column>`; each referenced table
    /// contributes its columns (minus the redundant target key) as
    /// `<Alias>_<column>` through a LEFT JOIN, so rows with a null or
    /// unmatched key still appear with null target-side columns.
    pub fn find_all_with_details(&self, type_name: &str) -> Result<RowSet> {
        let descriptor = self.registry.get(type_name)?;

        let mut select_clauses: Vec<String> = descriptor
            .fields
            .iter()
            .map(|f| {
                format!(
                    "{t}.{c} AS {t}_{c}",
                    t = descriptor.name,
                    c = f.name
                )
            })
            .collect();

        let mut joins = Vec::new();
        for (field, fk) in descriptor.foreign_keys() {
            let target = self.registry.get(&fk.table)?;
            for target_field in &target.fields {
                if target_field.name == fk.column {
                    continue;
                }
                select_clauses.push(format!(
                    "{a}.{c} AS {a}_{c}",
                    a = fk.alias,
                    c = target_field.name
                ));
            }
            joins.push(format!(
                "LEFT JOIN {} AS {} ON {}.{} = {}.{}",
                fk.table, fk.alias, descriptor.name, field.name, fk.alias, fk.column
            ));
        }

        let mut sql = format!(
            "SELECT {} FROM {}",
            select_clauses.join(", "),
            descriptor.name
        );
        for join in &joins {
            sql.push(' ');
            sql.push_str(join);
        }
        debug!(%sql, "running detail select");

        self.store.query(&sql, &[])
    }
}

/// Human-readable list of a descriptor's foreign-key targets, carried on
/// foreign-key violations so callers can name the implicated tables
fn referenced_targets(descriptor: &RecordDescriptor) -> String {
    let targets: Vec<String> = descriptor
        .foreign_keys()
        .map(|(field, fk)| format!("{} -> {}({})", field.name, fk.table, fk.column))
        .collect();

    if targets.is_empty() {
        "no declared references".to_string()
    } else {
        format!("references {}", targets.join(", "))
    }
}
