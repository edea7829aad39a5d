//! Outcome and error vocabulary of the copier.
//!
//! The copier distinguishes two tiers of failure. Recoverable conditions —
//! nothing at the source path, text that does not parse, an enum name the
//! table does not know — resolve to [`CopyOutcome::Skipped`]: the call
//! succeeds, the field is simply left alone. Fatal conditions — a target
//! field the schema does not declare, a field type scalar coercion cannot
//! serve, a malformed path, a rejected assignment — surface as [`CopyError`]
//! and abort the current call.

use std::fmt;

use thiserror::Error;

use pathproto_path::ParseError;
use pathproto_schema::BuilderError;

/// Result of one coercion attempt that did not fail fatally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The value was coerced and written to the target field.
    Applied,
    /// No assignment was made; the reason says why.
    Skipped(SkipReason),
}

impl CopyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CopyOutcome::Applied)
    }
}

/// Why a coercion left the target field unassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source path resolved to nothing, or to JSON `null`.
    AbsentValue,
    /// The value's text does not parse as the target type.
    InvalidText { text: String },
    /// The value's text is not a constant of the target enum.
    UnknownEnumName { name: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AbsentValue => f.write_str("no value at source path"),
            SkipReason::InvalidText { text } => {
                write!(f, "`{text}` does not parse as the target type")
            }
            SkipReason::UnknownEnumName { name } => {
                write!(f, "`{name}` is not a constant of the target enum")
            }
        }
    }
}

/// Fatal copy failure. These indicate a broken wiring between document,
/// paths, and schema, and are never downgraded to skips.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CopyError {
    #[error("unknown target field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` has type {type_name}, which scalar coercion does not support")]
    UnsupportedFieldType { field: String, type_name: String },
    #[error("invalid path: {0}")]
    Path(#[from] ParseError),
    #[error("assignment rejected: {0}")]
    Builder(#[from] BuilderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reasons_render_for_logging() {
        assert_eq!(SkipReason::AbsentValue.to_string(), "no value at source path");
        assert_eq!(
            SkipReason::InvalidText { text: "4x".into() }.to_string(),
            "`4x` does not parse as the target type"
        );
        assert_eq!(
            SkipReason::UnknownEnumName { name: "MEH".into() }.to_string(),
            "`MEH` is not a constant of the target enum"
        );
    }

    #[test]
    fn parse_errors_convert_to_fatal_copy_errors() {
        let parse_err = pathproto_path::parse("").unwrap_err();
        let err: CopyError = parse_err.clone().into();
        assert_eq!(err, CopyError::Path(parse_err));
    }
}
