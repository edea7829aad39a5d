//! The copier: path-addressed reads, text-based coercion, checked writes.

use serde_json::Value;

use pathproto_path::{parse, DocumentContext};
use pathproto_schema::{EnumDescriptor, FieldDescriptor, FieldType, FieldValue, MessageBuilder};

use crate::coerce;
use crate::error::{CopyError, CopyOutcome, SkipReason};

/// Copies values out of one document into one message under construction.
///
/// A copier binds a [`DocumentContext`] and a [`MessageBuilder`] for its
/// lifetime and carries no other state. Path-driven methods return
/// `&mut Self` so consecutive copies chain with `?`:
///
/// ```
/// use pathproto::{Copier, DocumentContext, FieldType, MessageBuilder, Schema};
/// use serde_json::json;
///
/// let doc = json!({"title": "desk lamp", "view_count": "1200"});
/// let schema = Schema::builder("Item")
///     .field("title", FieldType::String)
///     .field("views", FieldType::Int64)
///     .build()
///     .unwrap();
///
/// let mut builder = MessageBuilder::new(schema);
/// let mut copier = Copier::new(DocumentContext::new(&doc), &mut builder);
/// copier
///     .copy_field("title")?
///     .copy_as_int64("view_count", "views")?;
///
/// assert_eq!(builder.build().to_value(), json!({"title": "desk lamp", "views": 1200}));
/// # Ok::<(), pathproto::CopyError>(())
/// ```
///
/// Recoverable conditions (absent value, unparseable text, unknown enum
/// name) skip the assignment and keep going; fatal ones (unknown field,
/// unsupported field type, malformed path, rejected assignment) return
/// `Err` immediately. Skips are reported at debug level.
#[derive(Debug)]
pub struct Copier<'s, 'b> {
    source: DocumentContext<'s>,
    target: &'b mut MessageBuilder,
}

impl<'s, 'b> Copier<'s, 'b> {
    pub fn new(source: DocumentContext<'s>, target: &'b mut MessageBuilder) -> Self {
        Self { source, target }
    }

    /// The bound source context.
    pub fn source(&self) -> DocumentContext<'s> {
        self.source
    }

    /// Read access to the message under construction.
    pub fn target(&self) -> &MessageBuilder {
        self.target
    }

    /// First value at `path`, with `null` reported as absence.
    pub fn value(&self, path: &str) -> Result<Option<&'s Value>, CopyError> {
        let path = parse(path)?;
        Ok(self.source.value(&path))
    }

    /// Context narrowed to the first value at `path`, if any.
    pub fn relative_context(&self, path: &str) -> Result<Option<DocumentContext<'s>>, CopyError> {
        let path = parse(path)?;
        Ok(self.source.relative_context(&path))
    }

    // ── Value-driven copies ─────────────────────────────────────────────────
    //
    // These take an already-resolved raw value (or its absence) and perform
    // one coercion plus one assignment. The target field is resolved by name
    // at assignment time, every time; the schema stays the single source of
    // truth even across repeated calls.

    /// Copies `raw` into `field` according to the field's declared type.
    ///
    /// Bytes and message fields have no textual coercion and are fatal here;
    /// message values travel through [`Copier::copy_object`] instead.
    pub fn copy_scalar_value(
        &mut self,
        raw: Option<&Value>,
        field: &str,
        descriptor: &FieldDescriptor,
    ) -> Result<CopyOutcome, CopyError> {
        match descriptor.field_type() {
            FieldType::Int32 => self.copy_int32_value(raw, field),
            FieldType::Int64 => self.copy_int64_value(raw, field),
            FieldType::Float => self.copy_float_value(raw, field),
            FieldType::Double => self.copy_double_value(raw, field),
            FieldType::Bool => self.copy_bool_value(raw, field),
            FieldType::String => self.copy_string_value(raw, field),
            FieldType::Enum(en) => self.copy_enum_value(raw, field, en),
            FieldType::Bytes | FieldType::Message(_) => Err(CopyError::UnsupportedFieldType {
                field: field.to_string(),
                type_name: descriptor.field_type().to_string(),
            }),
        }
    }

    pub fn copy_int32_value(
        &mut self,
        raw: Option<&Value>,
        field: &str,
    ) -> Result<CopyOutcome, CopyError> {
        let Some(raw) = present(raw) else {
            return Ok(skip(field, SkipReason::AbsentValue));
        };
        let text = coerce::text_of(raw);
        match coerce::int32(&text) {
            Some(n) => self.assign(field, FieldValue::Int32(n)),
            None => Ok(skip(field, SkipReason::InvalidText { text })),
        }
    }

    pub fn copy_int64_value(
        &mut self,
        raw: Option<&Value>,
        field: &str,
    ) -> Result<CopyOutcome, CopyError> {
        let Some(raw) = present(raw) else {
            return Ok(skip(field, SkipReason::AbsentValue));
        };
        let text = coerce::text_of(raw);
        match coerce::int64(&text) {
            Some(n) => self.assign(field, FieldValue::Int64(n)),
            None => Ok(skip(field, SkipReason::InvalidText { text })),
        }
    }

    pub fn copy_float_value(
        &mut self,
        raw: Option<&Value>,
        field: &str,
    ) -> Result<CopyOutcome, CopyError> {
        let Some(raw) = present(raw) else {
            return Ok(skip(field, SkipReason::AbsentValue));
        };
        let text = coerce::text_of(raw);
        match coerce::float(&text) {
            Some(x) => self.assign(field, FieldValue::Float(x)),
            None => Ok(skip(field, SkipReason::InvalidText { text })),
        }
    }

    pub fn copy_double_value(
        &mut self,
        raw: Option<&Value>,
        field: &str,
    ) -> Result<CopyOutcome, CopyError> {
        let Some(raw) = present(raw) else {
            return Ok(skip(field, SkipReason::AbsentValue));
        };
        let text = coerce::text_of(raw);
        match coerce::double(&text) {
            Some(x) => self.assign(field, FieldValue::Double(x)),
            None => Ok(skip(field, SkipReason::InvalidText { text })),
        }
    }

    pub fn copy_bool_value(
        &mut self,
        raw: Option<&Value>,
        field: &str,
    ) -> Result<CopyOutcome, CopyError> {
        let Some(raw) = present(raw) else {
            return Ok(skip(field, SkipReason::AbsentValue));
        };
        let text = coerce::text_of(raw);
        match coerce::boolean(&text) {
            Some(b) => self.assign(field, FieldValue::Bool(b)),
            None => Ok(skip(field, SkipReason::InvalidText { text })),
        }
    }

    pub fn copy_string_value(
        &mut self,
        raw: Option<&Value>,
        field: &str,
    ) -> Result<CopyOutcome, CopyError> {
        let Some(raw) = present(raw) else {
            return Ok(skip(field, SkipReason::AbsentValue));
        };
        self.assign(field, FieldValue::String(coerce::text_of(raw)))
    }

    /// Copies `raw` as a constant of `en`, looked up by name.
    pub fn copy_enum_value(
        &mut self,
        raw: Option<&Value>,
        field: &str,
        en: &EnumDescriptor,
    ) -> Result<CopyOutcome, CopyError> {
        let Some(raw) = present(raw) else {
            return Ok(skip(field, SkipReason::AbsentValue));
        };
        let text = coerce::text_of(raw);
        match en.value_by_name(&text) {
            Some(value) => self.assign(field, FieldValue::Enum(value)),
            None => Ok(skip(field, SkipReason::UnknownEnumName { name: text })),
        }
    }

    // ── Path-driven copies ──────────────────────────────────────────────────

    /// Copies whatever `source_path` yields into `target_field`, honoring
    /// the field's declared type and cardinality.
    ///
    /// A repeated field consumes every yielded value, appending in document
    /// order; each element coerces independently, so one bad element skips
    /// without disturbing its siblings. A singular field takes the first
    /// match only. Appends made before a fatal error stand.
    pub fn copy_as_scalar(
        &mut self,
        source_path: &str,
        target_field: &str,
    ) -> Result<&mut Self, CopyError> {
        let path = parse(source_path)?;
        let schema = self.target.schema().clone();
        let descriptor = schema
            .field_by_name(target_field)
            .ok_or_else(|| CopyError::UnknownField(target_field.to_string()))?;
        let source = self.source;
        if descriptor.is_repeated() {
            for raw in source.iterate(&path) {
                self.copy_scalar_value(Some(raw), target_field, descriptor)?;
            }
        } else {
            self.copy_scalar_value(source.value(&path), target_field, descriptor)?;
        }
        Ok(self)
    }

    /// [`Copier::copy_as_scalar`] for the common case where the source path
    /// and the target field share a name.
    pub fn copy_field(&mut self, name: &str) -> Result<&mut Self, CopyError> {
        self.copy_as_scalar(name, name)
    }

    pub fn copy_as_int32(
        &mut self,
        source_path: &str,
        target_field: &str,
    ) -> Result<&mut Self, CopyError> {
        let raw = self.value(source_path)?;
        self.copy_int32_value(raw, target_field)?;
        Ok(self)
    }

    pub fn copy_as_int64(
        &mut self,
        source_path: &str,
        target_field: &str,
    ) -> Result<&mut Self, CopyError> {
        let raw = self.value(source_path)?;
        self.copy_int64_value(raw, target_field)?;
        Ok(self)
    }

    pub fn copy_as_float(
        &mut self,
        source_path: &str,
        target_field: &str,
    ) -> Result<&mut Self, CopyError> {
        let raw = self.value(source_path)?;
        self.copy_float_value(raw, target_field)?;
        Ok(self)
    }

    pub fn copy_as_double(
        &mut self,
        source_path: &str,
        target_field: &str,
    ) -> Result<&mut Self, CopyError> {
        let raw = self.value(source_path)?;
        self.copy_double_value(raw, target_field)?;
        Ok(self)
    }

    pub fn copy_as_bool(
        &mut self,
        source_path: &str,
        target_field: &str,
    ) -> Result<&mut Self, CopyError> {
        let raw = self.value(source_path)?;
        self.copy_bool_value(raw, target_field)?;
        Ok(self)
    }

    pub fn copy_as_string(
        &mut self,
        source_path: &str,
        target_field: &str,
    ) -> Result<&mut Self, CopyError> {
        let raw = self.value(source_path)?;
        self.copy_string_value(raw, target_field)?;
        Ok(self)
    }

    /// Writes an already-built value without coercion. `None` is a no-op,
    /// so optional sub-messages thread through cleanly; a present value
    /// must satisfy the target's own checks.
    pub fn copy_object(
        &mut self,
        value: Option<FieldValue>,
        target_field: &str,
    ) -> Result<&mut Self, CopyError> {
        let Some(value) = value else {
            return Ok(self);
        };
        self.assign(target_field, value)?;
        Ok(self)
    }

    /// One checked write. The descriptor is looked up fresh by name and its
    /// repeated flag decides between set and append.
    fn assign(&mut self, field: &str, value: FieldValue) -> Result<CopyOutcome, CopyError> {
        let schema = self.target.schema().clone();
        let descriptor = schema
            .field_by_name(field)
            .ok_or_else(|| CopyError::UnknownField(field.to_string()))?;
        if descriptor.is_repeated() {
            self.target.add_repeated_field(descriptor, value)?;
        } else {
            self.target.set_field(descriptor, value)?;
        }
        Ok(CopyOutcome::Applied)
    }
}

/// `null` is treated as absence wherever a raw value is consumed.
fn present(raw: Option<&Value>) -> Option<&Value> {
    raw.filter(|v| !v.is_null())
}

fn skip(field: &str, reason: SkipReason) -> CopyOutcome {
    tracing::debug!(field, reason = %reason, "value not copied");
    CopyOutcome::Skipped(reason)
}
