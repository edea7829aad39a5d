//! Schema descriptors: message shapes, field declarations, enum tables.
//!
//! A [`Schema`] is the immutable description of one message type. It is
//! assembled once through [`SchemaBuilder`] and then shared behind an
//! [`Arc`], so nested message fields and builders can all point at the
//! same definition without cloning it.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

/// Error raised while assembling a schema or enum table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate field `{0}` in schema")]
    DuplicateField(String),
    #[error("duplicate value `{0}` in enum")]
    DuplicateEnumValue(String),
}

// ── Field types ─────────────────────────────────────────────────────────────

/// Declared type of a field.
///
/// Enum and message fields carry their own definitions, so a descriptor is
/// always enough to interpret a raw value: an enum field knows its name
/// table, a message field knows the schema of its children.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Int32,
    Int64,
    Float,
    Double,
    Bool,
    String,
    Bytes,
    Enum(EnumDescriptor),
    Message(Arc<Schema>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int32 => f.write_str("int32"),
            FieldType::Int64 => f.write_str("int64"),
            FieldType::Float => f.write_str("float"),
            FieldType::Double => f.write_str("double"),
            FieldType::Bool => f.write_str("bool"),
            FieldType::String => f.write_str("string"),
            FieldType::Bytes => f.write_str("bytes"),
            FieldType::Enum(en) => write!(f, "enum {}", en.name()),
            FieldType::Message(schema) => write!(f, "message {}", schema.name()),
        }
    }
}

// ── Enums ───────────────────────────────────────────────────────────────────

/// Named enum type: an ordered table of constant names and their numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    name: String,
    values: IndexMap<String, i32>,
}

impl EnumDescriptor {
    /// Builds an enum table from `(name, number)` pairs, preserving order.
    pub fn new<I, S>(name: &str, values: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        let mut table = IndexMap::new();
        for (value_name, number) in values {
            let value_name = value_name.into();
            if table.contains_key(&value_name) {
                return Err(SchemaError::DuplicateEnumValue(value_name));
            }
            table.insert(value_name, number);
        }
        Ok(Self {
            name: name.to_string(),
            values: table,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a constant by name. Unknown names are simply absent; the
    /// caller decides whether that is an error or a skip.
    pub fn value_by_name(&self, name: &str) -> Option<EnumValue> {
        self.values.get(name).map(|&number| EnumValue {
            name: name.to_string(),
            number,
        })
    }

    /// Whether `value` is one of this enum's constants, name and number both.
    pub fn contains(&self, value: &EnumValue) -> bool {
        self.values.get(&value.name) == Some(&value.number)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, i32)> {
        self.values.iter().map(|(name, &number)| (name.as_str(), number))
    }
}

/// One resolved enum constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

// ── Fields and schemas ──────────────────────────────────────────────────────

/// Declaration of a single field: its name, type, and cardinality.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    repeated: bool,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }
}

/// Immutable description of one message type.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: IndexMap<String, FieldDescriptor>,
}

impl Schema {
    /// Starts a builder for a schema with the given message name.
    pub fn builder(name: &str) -> SchemaBuilder {
        SchemaBuilder {
            name: name.to_string(),
            fields: IndexMap::new(),
            duplicate: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Iterates field declarations in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Chainable schema assembly; errors are deferred to [`SchemaBuilder::build`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: IndexMap<String, FieldDescriptor>,
    duplicate: Option<String>,
}

impl SchemaBuilder {
    /// Declares a singular field.
    pub fn field(self, name: &str, field_type: FieldType) -> Self {
        self.push(name, field_type, false)
    }

    /// Declares a repeated field.
    pub fn repeated_field(self, name: &str, field_type: FieldType) -> Self {
        self.push(name, field_type, true)
    }

    fn push(mut self, name: &str, field_type: FieldType, repeated: bool) -> Self {
        if self.fields.contains_key(name) {
            if self.duplicate.is_none() {
                self.duplicate = Some(name.to_string());
            }
            return self;
        }
        self.fields.insert(
            name.to_string(),
            FieldDescriptor {
                name: name.to_string(),
                field_type,
                repeated,
            },
        );
        self
    }

    pub fn build(self) -> Result<Arc<Schema>, SchemaError> {
        if let Some(name) = self.duplicate {
            return Err(SchemaError::DuplicateField(name));
        }
        Ok(Arc::new(Schema {
            name: self.name,
            fields: self.fields,
        }))
    }
}
