//! Checked message assembly and the finished, immutable message.

use std::sync::Arc;

use base64::Engine;
use indexmap::IndexMap;
use serde_json::{Number, Value};
use thiserror::Error;

use crate::descriptor::{FieldDescriptor, Schema};
use crate::value::FieldValue;

/// Error raised when an assignment does not fit the target schema.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuilderError {
    #[error("field `{field}` expects {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: &'static str,
    },
    #[error("field `{field}` is repeated; use add_repeated_field")]
    NotScalar { field: String },
    #[error("field `{field}` is not repeated; use set_field")]
    NotRepeated { field: String },
    #[error("descriptor `{field}` does not belong to this schema")]
    UnknownDescriptor { field: String },
}

/// Storage for one field. The slot kind always matches the descriptor's
/// cardinality; both setters enforce it before writing.
#[derive(Debug, Clone, PartialEq)]
enum FieldSlot {
    Single(FieldValue),
    Repeated(Vec<FieldValue>),
}

/// Mutable, schema-checked assembly of one message.
///
/// Every write is validated against the schema: the descriptor must belong
/// to it, the cardinality must match the setter, and the value must match
/// the declared type. Nothing invalid ever lands in a slot, so
/// [`MessageBuilder::build`] cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBuilder {
    schema: Arc<Schema>,
    fields: IndexMap<String, FieldSlot>,
}

impl MessageBuilder {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            fields: IndexMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Resolves a field declaration of the target schema.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.schema.field_by_name(name)
    }

    fn check(&self, descriptor: &FieldDescriptor, value: &FieldValue) -> Result<(), BuilderError> {
        match self.schema.field_by_name(descriptor.name()) {
            Some(own) if own == descriptor => {}
            _ => {
                return Err(BuilderError::UnknownDescriptor {
                    field: descriptor.name().to_string(),
                })
            }
        }
        if !value.matches(descriptor.field_type()) {
            return Err(BuilderError::TypeMismatch {
                field: descriptor.name().to_string(),
                expected: descriptor.field_type().to_string(),
                actual: value.type_name(),
            });
        }
        Ok(())
    }

    /// Writes a singular field, replacing any previous value.
    pub fn set_field(
        &mut self,
        descriptor: &FieldDescriptor,
        value: FieldValue,
    ) -> Result<(), BuilderError> {
        self.check(descriptor, &value)?;
        if descriptor.is_repeated() {
            return Err(BuilderError::NotScalar {
                field: descriptor.name().to_string(),
            });
        }
        self.fields
            .insert(descriptor.name().to_string(), FieldSlot::Single(value));
        Ok(())
    }

    /// Appends one element to a repeated field.
    pub fn add_repeated_field(
        &mut self,
        descriptor: &FieldDescriptor,
        value: FieldValue,
    ) -> Result<(), BuilderError> {
        self.check(descriptor, &value)?;
        if !descriptor.is_repeated() {
            return Err(BuilderError::NotRepeated {
                field: descriptor.name().to_string(),
            });
        }
        let slot = self
            .fields
            .entry(descriptor.name().to_string())
            .or_insert_with(|| FieldSlot::Repeated(Vec::new()));
        if let FieldSlot::Repeated(items) = slot {
            items.push(value);
        }
        Ok(())
    }

    /// Current value of a singular field, if set.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        match self.fields.get(name)? {
            FieldSlot::Single(value) => Some(value),
            FieldSlot::Repeated(_) => None,
        }
    }

    /// Elements appended to a repeated field so far.
    pub fn get_repeated(&self, name: &str) -> Option<&[FieldValue]> {
        match self.fields.get(name)? {
            FieldSlot::Repeated(items) => Some(items),
            FieldSlot::Single(_) => None,
        }
    }

    /// Freezes the builder into an immutable message.
    pub fn build(self) -> Message {
        Message {
            schema: self.schema,
            fields: self.fields,
        }
    }
}

/// A finished message: schema plus the fields that were actually set.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    schema: Arc<Schema>,
    fields: IndexMap<String, FieldSlot>,
}

impl Message {
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        match self.fields.get(name)? {
            FieldSlot::Single(value) => Some(value),
            FieldSlot::Repeated(_) => None,
        }
    }

    pub fn get_repeated(&self, name: &str) -> Option<&[FieldValue]> {
        match self.fields.get(name)? {
            FieldSlot::Repeated(items) => Some(items),
            FieldSlot::Single(_) => None,
        }
    }

    /// Renders the message as JSON, in schema declaration order.
    ///
    /// Unset fields are omitted. Enum values render as their constant name,
    /// bytes as standard base64, and non-finite floats as null since JSON
    /// has no spelling for them.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for descriptor in self.schema.fields() {
            match self.fields.get(descriptor.name()) {
                Some(FieldSlot::Single(value)) => {
                    map.insert(descriptor.name().to_string(), render(value));
                }
                Some(FieldSlot::Repeated(items)) => {
                    map.insert(
                        descriptor.name().to_string(),
                        Value::Array(items.iter().map(render).collect()),
                    );
                }
                None => {}
            }
        }
        Value::Object(map)
    }
}

fn render(value: &FieldValue) -> Value {
    match value {
        FieldValue::Int32(n) => Value::from(*n),
        FieldValue::Int64(n) => Value::from(*n),
        FieldValue::Float(x) => float_value(f64::from(*x)),
        FieldValue::Double(x) => float_value(*x),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Bytes(data) => {
            Value::String(base64::engine::general_purpose::STANDARD.encode(data))
        }
        FieldValue::Enum(value) => Value::String(value.name.clone()),
        FieldValue::Message(message) => message.to_value(),
    }
}

fn float_value(x: f64) -> Value {
    Number::from_f64(x).map(Value::Number).unwrap_or(Value::Null)
}
