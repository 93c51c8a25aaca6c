//! Record type descriptors and the schema registry
//!
//! Table definitions are declared, not reflected: every record type
//! provides an ordered list of field descriptors and a designated primary
//! key at startup. The registry is populated once by the composition root
//! and read for the remainder of the process.

use super::error::{MapperError, Result};
use super::value::Value;

/// Scalar type declared for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// 64-bit integer column
    Integer,
    /// Text column
    Text,
    /// 64-bit floating point column
    Real,
    /// Untyped column
    Null,
}

impl ScalarType {
    /// SQL type keyword used when the schema is materialized
    pub fn sql_type(&self) -> &'static str {
        match self {
            ScalarType::Integer => "INTEGER",
            ScalarType::Text => "TEXT",
            ScalarType::Real => "REAL",
            ScalarType::Null => "NULL",
        }
    }

    /// Coerce a raw input string to a value of this type.
    ///
    /// Fails with [`MapperError::TypeMismatch`] when the text does not
    /// parse as the declared type. The `Null` variant accepts an empty
    /// string or the literal `null` (any case) only.
    pub fn coerce(&self, raw: &str) -> Result<Value> {
        let trimmed = raw.trim();
        match self {
            ScalarType::Integer => trimmed
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| MapperError::type_mismatch("integer", raw)),
            ScalarType::Real => trimmed
                .parse::<f64>()
                .map(Value::Real)
                .map_err(|_| MapperError::type_mismatch("real", raw)),
            ScalarType::Text => Ok(Value::Text(trimmed.to_string())),
            ScalarType::Null => {
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
                    Ok(Value::Null)
                } else {
                    Err(MapperError::type_mismatch("null", raw))
                }
            }
        }
    }
}

/// A field's link to another table's column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced table name
    pub table: String,
    /// Referenced column name
    pub column: String,
    /// Display alias used by the detail resolver; defaults to the table name
    pub alias: String,
}

impl ForeignKey {
    /// Reference a column of another registered record type
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        let table = table.into();
        Self {
            alias: table.clone(),
            table,
            column: column.into(),
        }
    }

    /// Override the display alias. Required when a type carries more than
    /// one reference to the same target table.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }
}

/// One column's name, scalar type, and optional foreign-key linkage
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Column name
    pub name: String,
    /// Declared scalar type
    pub scalar_type: ScalarType,
    /// Optional default value
    pub default: Option<Value>,
    /// Optional foreign-key reference
    pub foreign_key: Option<ForeignKey>,
}

impl FieldDescriptor {
    /// Create a plain field
    pub fn new(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar_type,
            default: None,
            foreign_key: None,
        }
    }

    /// Attach a default value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Attach a foreign-key reference.
    ///
    /// The target table/column must belong to a registered record type by
    /// the time tables are created; this is a precondition, not validated
    /// eagerly.
    #[must_use]
    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }
}

/// Schema definition for one table: a named, ordered set of fields with
/// one designated primary-key field
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    /// Type name; doubles as the table name and must be globally unique
    pub name: String,
    /// Name of the primary-key field
    pub primary_key: String,
    /// Ordered field descriptors
    pub fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Create a descriptor from an ordered field list
    pub fn new(
        name: impl Into<String>,
        primary_key: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            primary_key: primary_key.into(),
            fields,
        }
    }

    /// Ordered field names
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Look up a single field by column name
    pub fn field(&self, column: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == column)
    }

    /// Position of the primary-key field in the field list, if declared
    pub fn primary_key_index(&self) -> Option<usize> {
        self.fields.iter().position(|f| f.name == self.primary_key)
    }

    /// Fields carrying a foreign-key reference, in declaration order
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&FieldDescriptor, &ForeignKey)> {
        self.fields
            .iter()
            .filter_map(|f| f.foreign_key.as_ref().map(|fk| (f, fk)))
    }
}

/// A record type that can register its schema and serialize itself for
/// insertion. Typed instances exist only between construction and the
/// insert call; read operations return generic rows.
pub trait Record {
    /// The record type's descriptor. Must return the same schema on every
    /// call.
    fn descriptor() -> RecordDescriptor;

    /// Field values in descriptor order
    fn values(&self) -> Vec<Value>;
}

/// The set of known record types, iterated in registration order
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    descriptors: Vec<RecordDescriptor>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record type descriptor.
    ///
    /// Re-registering a name silently replaces the previous descriptor in
    /// place (last registration wins). This mirrors how self-registration
    /// behaves at startup and is a documented risk, not a feature.
    pub fn register(&mut self, descriptor: RecordDescriptor) {
        let position = self
            .descriptors
            .iter()
            .position(|d| d.name == descriptor.name);
        match position {
            Some(i) => self.descriptors[i] = descriptor,
            None => self.descriptors.push(descriptor),
        }
    }

    /// Register a typed record
    pub fn register_type<T: Record>(&mut self) {
        self.register(T::descriptor());
    }

    /// All descriptors in registration order
    pub fn descriptors(&self) -> &[RecordDescriptor] {
        &self.descriptors
    }

    /// Look up a descriptor by type name
    pub fn get(&self, type_name: &str) -> Result<&RecordDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.name == type_name)
            .ok_or_else(|| MapperError::UnknownRecordType(type_name.to_string()))
    }

    /// Ordered field descriptors of a type
    pub fn fields_of(&self, type_name: &str) -> Result<&[FieldDescriptor]> {
        Ok(&self.get(type_name)?.fields)
    }

    /// Scalar type of a single column, used to coerce free-text input
    pub fn field_type(&self, type_name: &str, column: &str) -> Result<ScalarType> {
        let descriptor = self.get(type_name)?;
        descriptor
            .field(column)
            .map(|f| f.scalar_type)
            .ok_or_else(|| MapperError::column_not_found(type_name, column))
    }
}
