//! Runtime field values, the payloads a message actually holds.

use crate::descriptor::{EnumValue, FieldType};
use crate::message::Message;

/// One typed value, mirroring [`FieldType`] variant for variant.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    Enum(EnumValue),
    Message(Message),
}

impl FieldValue {
    /// Whether this value is acceptable under the declared type.
    ///
    /// Enum values must be constants of the declared table; message values
    /// must carry the declared schema.
    pub fn matches(&self, field_type: &FieldType) -> bool {
        match (self, field_type) {
            (FieldValue::Int32(_), FieldType::Int32) => true,
            (FieldValue::Int64(_), FieldType::Int64) => true,
            (FieldValue::Float(_), FieldType::Float) => true,
            (FieldValue::Double(_), FieldType::Double) => true,
            (FieldValue::Bool(_), FieldType::Bool) => true,
            (FieldValue::String(_), FieldType::String) => true,
            (FieldValue::Bytes(_), FieldType::Bytes) => true,
            (FieldValue::Enum(value), FieldType::Enum(en)) => en.contains(value),
            (FieldValue::Message(message), FieldType::Message(schema)) => {
                message.schema().name() == schema.name()
            }
            _ => false,
        }
    }

    /// Short name of the runtime variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Int32(_) => "int32",
            FieldValue::Int64(_) => "int64",
            FieldValue::Float(_) => "float",
            FieldValue::Double(_) => "double",
            FieldValue::Bool(_) => "bool",
            FieldValue::String(_) => "string",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Enum(_) => "enum",
            FieldValue::Message(_) => "message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EnumDescriptor, Schema};
    use crate::message::MessageBuilder;

    #[test]
    fn scalar_matching_is_exact() {
        assert!(FieldValue::Int32(7).matches(&FieldType::Int32));
        assert!(!FieldValue::Int32(7).matches(&FieldType::Int64));
        assert!(FieldValue::Double(1.5).matches(&FieldType::Double));
        assert!(!FieldValue::Float(1.5).matches(&FieldType::Double));
        assert!(!FieldValue::String("7".into()).matches(&FieldType::Int32));
    }

    #[test]
    fn enum_matching_requires_a_known_constant() {
        let en = EnumDescriptor::new("Rating", [("POOR", 0), ("GOOD", 1)]).unwrap();
        let good = en.value_by_name("GOOD").unwrap();
        assert!(FieldValue::Enum(good).matches(&FieldType::Enum(en.clone())));
        let foreign = EnumValue { name: "FAST".into(), number: 1 };
        assert!(!FieldValue::Enum(foreign).matches(&FieldType::Enum(en)));
    }

    #[test]
    fn message_matching_compares_schema_names() {
        let price = Schema::builder("Price").build().unwrap();
        let offer = Schema::builder("Offer").build().unwrap();
        let value = FieldValue::Message(MessageBuilder::new(price.clone()).build());
        assert!(value.matches(&FieldType::Message(price)));
        assert!(!value.matches(&FieldType::Message(offer)));
    }
}
