//! pathproto — path-driven copying of JSON document values into
//! schema-checked messages.
//!
//! Loosely-typed documents (feeds, API payloads, scraped records) rarely
//! line up with the strongly-typed messages a pipeline wants. This crate
//! bridges the two: a [`Copier`] reads values out of a document by path,
//! coerces them through text to the target field's type, and writes them
//! into a [`MessageBuilder`] that enforces the schema. Missing values,
//! unparseable text, and unknown enum names skip quietly; structural
//! mistakes — fields the schema does not declare, malformed paths — fail
//! loudly.
//!
//! The [`transform`] layer runs the same machinery from JSON configuration:
//! named lists of `path → field` mappings, including nested messages built
//! from narrowed document contexts.
//!
//! # Example
//!
//! ```
//! use pathproto::{Copier, DocumentContext, FieldType, MessageBuilder, Schema};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "full_item": {"asset_id": "a1", "view_count": "1200"},
//!     "tags": ["new", "sale"]
//! });
//!
//! let schema = Schema::builder("Item")
//!     .field("asset_id", FieldType::String)
//!     .field("views", FieldType::Int64)
//!     .repeated_field("tags", FieldType::String)
//!     .build()
//!     .unwrap();
//!
//! let mut builder = MessageBuilder::new(schema);
//! let mut copier = Copier::new(DocumentContext::new(&doc), &mut builder);
//! copier
//!     .copy_as_scalar("full_item/asset_id", "asset_id")?
//!     .copy_as_int64("full_item/view_count", "views")?
//!     .copy_field("tags")?;
//!
//! assert_eq!(
//!     builder.build().to_value(),
//!     json!({"asset_id": "a1", "views": 1200, "tags": ["new", "sale"]})
//! );
//! # Ok::<(), pathproto::CopyError>(())
//! ```

mod error;
pub use error::{CopyError, CopyOutcome, SkipReason};

mod coerce;

mod copier;
pub use copier::Copier;

pub mod transform;
pub use transform::{
    FieldMapping, MappingKind, TransformDefinition, TransformError, Transformer,
};

pub use pathproto_path::{parse, DocumentContext, ParseError, PathExpr, ValueIter};
pub use pathproto_schema::{
    BuilderError, EnumDescriptor, EnumValue, FieldDescriptor, FieldType, FieldValue, Message,
    MessageBuilder, Schema, SchemaBuilder, SchemaError,
};
