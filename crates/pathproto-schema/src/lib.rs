//! Runtime message schemas and checked builders.
//!
//! This crate models a small, protobuf-like type system at runtime: a
//! [`Schema`] declares named fields with types and cardinality, a
//! [`MessageBuilder`] accepts only values that fit those declarations, and
//! the finished [`Message`] renders back to JSON. Everything is resolved by
//! name at call time, so schemas can be assembled from configuration rather
//! than generated code.
//!
//! # Example
//!
//! ```
//! use pathproto_schema::{FieldType, FieldValue, MessageBuilder, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::builder("Offer")
//!     .field("title", FieldType::String)
//!     .repeated_field("tags", FieldType::String)
//!     .build()
//!     .unwrap();
//!
//! let mut builder = MessageBuilder::new(schema.clone());
//! let title = schema.field_by_name("title").unwrap();
//! builder.set_field(title, FieldValue::String("desk lamp".into())).unwrap();
//! let tags = schema.field_by_name("tags").unwrap();
//! builder.add_repeated_field(tags, FieldValue::String("sale".into())).unwrap();
//!
//! assert_eq!(
//!     builder.build().to_value(),
//!     json!({"title": "desk lamp", "tags": ["sale"]})
//! );
//! ```

mod descriptor;
pub use descriptor::{
    EnumDescriptor, EnumValue, FieldDescriptor, FieldType, Schema, SchemaBuilder, SchemaError,
};

mod value;
pub use value::FieldValue;

mod message;
pub use message::{BuilderError, Message, MessageBuilder};
