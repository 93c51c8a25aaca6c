//! JSON seed-data loading
//!
//! One array-of-objects document per record type, loaded once at startup.
//! Object keys must exactly match the type's field names. Each object
//! inserts independently: a mid-batch failure propagates without rolling
//! back the rows already inserted.

use super::engine::RecordStore;
use super::error::{MapperError, Result};
use super::value::Value;
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::info;

/// Convert a JSON scalar to a store value. Booleans map to 0/1, integral
/// numbers to Integer, everything else numeric to Real; arrays and
/// objects are rejected.
fn json_to_value(json: &JsonValue) -> Result<Value> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Integer(*b as i64)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if let Some(r) = n.as_f64() {
                Ok(Value::Real(r))
            } else {
                Err(MapperError::type_mismatch("scalar", n.to_string()))
            }
        }
        JsonValue::String(s) => Ok(Value::Text(s.clone())),
        other => Err(MapperError::type_mismatch("scalar", other.to_string())),
    }
}

/// Load seed rows for one record type from a JSON document string.
///
/// Returns the number of rows inserted before any failure.
pub fn load_seed_str(engine: &RecordStore, type_name: &str, json: &str) -> Result<usize> {
    let objects: Vec<serde_json::Map<String, JsonValue>> = serde_json::from_str(json)?;
    let descriptor = engine.registry().get(type_name)?.clone();

    let mut inserted = 0;
    for object in &objects {
        // Keys must match the schema exactly, in any order
        if object.len() != descriptor.fields.len() {
            let extra = object
                .keys()
                .find(|k| descriptor.field(k).is_none())
                .cloned();
            let detail = match extra {
                Some(key) => format!("unexpected key {key:?}"),
                None => format!(
                    "expected {} keys, got {}",
                    descriptor.fields.len(),
                    object.len()
                ),
            };
            return Err(MapperError::seed_shape(type_name, detail));
        }

        let mut values = Vec::with_capacity(descriptor.fields.len());
        for field in &descriptor.fields {
            let json_value = object.get(&field.name).ok_or_else(|| {
                MapperError::seed_shape(type_name, format!("missing key {:?}", field.name))
            })?;
            values.push(json_to_value(json_value)?);
        }

        engine.insert_row(type_name, values)?;
        inserted += 1;
    }

    info!(table = %type_name, rows = inserted, "seed data loaded");
    Ok(inserted)
}

/// Load seed rows for one record type from a JSON file
pub fn load_seed_file(
    engine: &RecordStore,
    type_name: &str,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let json = std::fs::read_to_string(path)?;
    load_seed_str(engine, type_name, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MapperConfig;
    use crate::core::schema::{FieldDescriptor, RecordDescriptor, ScalarType, SchemaRegistry};
    use crate::store::SqliteStore;
    use tempfile::TempDir;

    fn engine() -> (TempDir, RecordStore) {
        let mut registry = SchemaRegistry::new();
        registry.register(RecordDescriptor::new(
            "Aircrafts",
            "registration",
            vec![
                FieldDescriptor::new("registration", ScalarType::Text),
                FieldDescriptor::new("aircraft_type", ScalarType::Text),
                FieldDescriptor::new("capacity", ScalarType::Integer),
            ],
        ));

        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SqliteStore::new(dir.path().join("test.db"));
        let engine = RecordStore::new(store, registry, MapperConfig::new());
        engine.create_all_tables().expect("Failed to create tables");
        (dir, engine)
    }

    #[test]
    fn test_load_seed_str() {
        let (_dir, engine) = engine();
        let json = r#"[
            {"registration": "G-ABCD", "aircraft_type": "A320", "capacity": 180},
            {"capacity": 350, "registration": "G-EFGH", "aircraft_type": "B777"}
        ]"#;

        let inserted = load_seed_str(&engine, "Aircrafts", json).unwrap();
        assert_eq!(inserted, 2);

        let rows = engine.find("Aircrafts", &[]).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_seed_missing_key_rejected() {
        let (_dir, engine) = engine();
        let json = r#"[{"registration": "G-ABCD", "aircraft_type": "A320"}]"#;

        let err = load_seed_str(&engine, "Aircrafts", json).unwrap_err();
        assert!(matches!(err, MapperError::SeedShape { .. }));
    }

    #[test]
    fn test_seed_extra_key_rejected() {
        let (_dir, engine) = engine();
        let json = r#"[{
            "registration": "G-ABCD", "aircraft_type": "A320",
            "capacity": 180, "color": "white"
        }]"#;

        let err = load_seed_str(&engine, "Aircrafts", json).unwrap_err();
        assert!(err.to_string().contains("color"));
    }

    #[test]
    fn test_seed_failure_keeps_earlier_rows() {
        let (_dir, engine) = engine();
        let json = r#"[
            {"registration": "G-ABCD", "aircraft_type": "A320", "capacity": 180},
            {"registration": "G-ABCD", "aircraft_type": "A320", "capacity": 180}
        ]"#;

        let err = load_seed_str(&engine, "Aircrafts", json).unwrap_err();
        assert!(matches!(err, MapperError::DuplicateKey { .. }));

        // First row survived; no batch rollback
        assert_eq!(engine.find("Aircrafts", &[]).unwrap().len(), 1);
    }

    #[test]
    fn test_load_seed_file() {
        let (dir, engine) = engine();
        let path = dir.path().join("aircrafts.json");
        std::fs::write(
            &path,
            r#"[{"registration": "G-ABCD", "aircraft_type": "A320", "capacity": 180}]"#,
        )
        .unwrap();

        assert_eq!(load_seed_file(&engine, "Aircrafts", &path).unwrap(), 1);
    }
}
