//! Text-based coercion of raw document values.
//!
//! Source documents are loosely typed, so coercion goes through text: the
//! raw value's textual representation is handed to the target type's
//! standard parser. A string contributes its content unquoted; any other
//! value contributes its compact JSON spelling. This makes `"42"` and `42`
//! equally assignable to an integer field, while `"42.0"` is not — the
//! integer parser rejects it, and the copier skips.

use serde_json::Value;

/// Textual representation used for coercion.
pub(crate) fn text_of(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn int32(text: &str) -> Option<i32> {
    text.parse().ok()
}

pub(crate) fn int64(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Overflowing magnitudes parse to infinity rather than failing; the
/// assignment still happens and the rendering layer deals with it.
pub(crate) fn float(text: &str) -> Option<f32> {
    text.parse().ok()
}

pub(crate) fn double(text: &str) -> Option<f64> {
    text.parse().ok()
}

/// Only the literal spellings `true` and `false` are booleans. Anything
/// else is unrecognized, never a default.
pub(crate) fn boolean(text: &str) -> Option<bool> {
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_contribute_their_content() {
        assert_eq!(text_of(&json!("desk lamp")), "desk lamp");
        assert_eq!(text_of(&json!("42")), "42");
    }

    #[test]
    fn non_strings_contribute_compact_json() {
        assert_eq!(text_of(&json!(42)), "42");
        assert_eq!(text_of(&json!(2.5)), "2.5");
        assert_eq!(text_of(&json!(true)), "true");
        assert_eq!(text_of(&json!([1, 2])), "[1,2]");
        assert_eq!(text_of(&json!({"a": 1})), "{\"a\":1}");
    }

    #[test]
    fn integer_parsing_is_strict() {
        assert_eq!(int32("42"), Some(42));
        assert_eq!(int32("-7"), Some(-7));
        assert_eq!(int32("42.0"), None);
        assert_eq!(int32("4 2"), None);
        assert_eq!(int32(""), None);
        assert_eq!(int32("2147483648"), None);
        assert_eq!(int64("2147483648"), Some(2_147_483_648));
    }

    #[test]
    fn float_parsing_accepts_overflow_as_infinity() {
        assert_eq!(double("2.5"), Some(2.5));
        assert_eq!(double("1e999"), Some(f64::INFINITY));
        assert_eq!(float("3.5e38"), Some(f32::INFINITY));
        assert_eq!(double("price"), None);
    }

    #[test]
    fn boolean_parsing_knows_exactly_two_spellings() {
        assert_eq!(boolean("true"), Some(true));
        assert_eq!(boolean("false"), Some(false));
        assert_eq!(boolean("True"), None);
        assert_eq!(boolean("1"), None);
        assert_eq!(boolean("yes"), None);
    }
}
