//! Declarative transform definitions: named lists of field mappings that
//! drive the copier from configuration instead of code.
//!
//! A definition is plain JSON, one entry per message shape:
//!
//! ```json
//! {
//!   "item": [
//!     {"path": "full_item/asset_id", "field": "asset_id"},
//!     {"path": "view_count", "field": "views", "type": "int64"},
//!     {"path": "offers/offer", "field": "offers", "type": "object", "transform": "offer"}
//!   ],
//!   "offer": [
//!     {"path": "price", "type": "double"},
//!     {"path": "currency"}
//!   ]
//! }
//! ```
//!
//! Scalar mappings delegate to the copier entry point their `type` names;
//! `object` mappings recurse, building nested messages with another named
//! transform against a context rooted at each source node.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use pathproto_path::{parse, DocumentContext, ParseError};
use pathproto_schema::{FieldType, FieldValue, Message, MessageBuilder, Schema};

use crate::copier::Copier;
use crate::error::CopyError;

/// Fatal transform failure.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("unknown transform `{0}`")]
    UnknownTransform(String),
    #[error("object mapping for field `{field}` names no transform")]
    MissingTransform { field: String },
    #[error("field `{field}` is not a message field")]
    NotAMessageField { field: String },
    #[error("invalid transform definition: {0}")]
    Definition(#[source] serde_json::Error),
    #[error("invalid path: {0}")]
    Path(#[from] ParseError),
    #[error(transparent)]
    Copy(#[from] CopyError),
}

/// Named transforms, each an ordered list of field mappings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TransformDefinition {
    transforms: IndexMap<String, Vec<FieldMapping>>,
}

impl TransformDefinition {
    /// Parses a definition from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, TransformError> {
        serde_json::from_str(text).map_err(TransformError::Definition)
    }

    pub fn get(&self, name: &str) -> Option<&[FieldMapping]> {
        self.transforms.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transforms.keys().map(String::as_str)
    }
}

/// One mapping: where to read, where to write, how to coerce.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldMapping {
    pub path: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: MappingKind,
    #[serde(default)]
    pub transform: Option<String>,
}

impl FieldMapping {
    /// Target field name; shares the source path's spelling when omitted.
    pub fn target_field(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.path)
    }
}

/// How a mapping coerces: by the declared field type, by a forced scalar
/// type, or by building a nested message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingKind {
    #[default]
    Auto,
    Int32,
    Int64,
    Float,
    Double,
    Bool,
    String,
    Object,
}

/// Runs transform definitions against documents.
pub struct Transformer<'d> {
    definition: &'d TransformDefinition,
}

impl<'d> Transformer<'d> {
    pub fn new(definition: &'d TransformDefinition) -> Self {
        Self { definition }
    }

    /// Builds one message by running the named transform over `doc`.
    pub fn build_message(
        &self,
        transform: &str,
        doc: &Value,
        schema: Arc<Schema>,
    ) -> Result<Message, TransformError> {
        let mut builder = MessageBuilder::new(schema);
        self.apply(transform, DocumentContext::new(doc), &mut builder)?;
        Ok(builder.build())
    }

    fn apply(
        &self,
        transform: &str,
        context: DocumentContext<'_>,
        builder: &mut MessageBuilder,
    ) -> Result<(), TransformError> {
        let mappings = self
            .definition
            .get(transform)
            .ok_or_else(|| TransformError::UnknownTransform(transform.to_string()))?;
        for mapping in mappings {
            self.apply_mapping(mapping, context, builder)?;
        }
        Ok(())
    }

    fn apply_mapping(
        &self,
        mapping: &FieldMapping,
        context: DocumentContext<'_>,
        builder: &mut MessageBuilder,
    ) -> Result<(), TransformError> {
        let path = mapping.path.as_str();
        let field = mapping.target_field();
        match mapping.kind {
            MappingKind::Auto => {
                Copier::new(context, builder).copy_as_scalar(path, field)?;
            }
            MappingKind::Int32 => {
                Copier::new(context, builder).copy_as_int32(path, field)?;
            }
            MappingKind::Int64 => {
                Copier::new(context, builder).copy_as_int64(path, field)?;
            }
            MappingKind::Float => {
                Copier::new(context, builder).copy_as_float(path, field)?;
            }
            MappingKind::Double => {
                Copier::new(context, builder).copy_as_double(path, field)?;
            }
            MappingKind::Bool => {
                Copier::new(context, builder).copy_as_bool(path, field)?;
            }
            MappingKind::String => {
                Copier::new(context, builder).copy_as_string(path, field)?;
            }
            MappingKind::Object => {
                self.apply_object(mapping, field, context, builder)?;
            }
        }
        Ok(())
    }

    /// Builds nested messages for an `object` mapping. Repeated fields get
    /// one message per source node the path yields; singular fields narrow
    /// to the first node, or stay unset when there is none.
    fn apply_object(
        &self,
        mapping: &FieldMapping,
        field: &str,
        context: DocumentContext<'_>,
        builder: &mut MessageBuilder,
    ) -> Result<(), TransformError> {
        let name = mapping
            .transform
            .as_deref()
            .ok_or_else(|| TransformError::MissingTransform {
                field: field.to_string(),
            })?;
        let schema = builder.schema().clone();
        let descriptor = schema
            .field_by_name(field)
            .ok_or_else(|| CopyError::UnknownField(field.to_string()))?;
        let FieldType::Message(nested_schema) = descriptor.field_type() else {
            return Err(TransformError::NotAMessageField {
                field: field.to_string(),
            });
        };
        let path = parse(&mapping.path)?;
        if descriptor.is_repeated() {
            for node in context.iterate(&path) {
                if node.is_null() {
                    continue;
                }
                let mut nested = MessageBuilder::new(nested_schema.clone());
                self.apply(name, DocumentContext::new(node), &mut nested)?;
                Copier::new(context, builder)
                    .copy_object(Some(FieldValue::Message(nested.build())), field)?;
            }
        } else if let Some(scope) = context.relative_context(&path) {
            let mut nested = MessageBuilder::new(nested_schema.clone());
            self.apply(name, scope, &mut nested)?;
            Copier::new(context, builder)
                .copy_object(Some(FieldValue::Message(nested.build())), field)?;
        } else {
            tracing::debug!(field, "no source node; nested message not built");
        }
        Ok(())
    }
}
