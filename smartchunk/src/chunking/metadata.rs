//! Shared metadata helpers used by every splitter.
//!
//! Vector stores only accept scalar metadata values (string, integer, float,
//! boolean, null), so everything a splitter records goes through [`scalar`].

use serde_json::Value;
use uuid::Uuid;

use crate::models::{ContentType, Metadata};

/// Reduce an arbitrary JSON value to a storable scalar.
///
/// Lists become a single space-separated string; objects are stringified.
pub(crate) fn scalar(value: Value) -> Value {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value,
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(display_string)
                .collect::<Vec<_>>()
                .join(" ");
            Value::String(joined)
        }
        other => Value::String(other.to_string()),
    }
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a raw attribute string to its most specific scalar type:
/// `"true"`/`"false"` to boolean, all-digit to integer, single-decimal-point
/// numeric to float, anything else stays a string.
pub(crate) fn coerce_str(raw: &str) -> Value {
    let lowered = raw.to_lowercase();
    if lowered == "true" {
        return Value::Bool(true);
    }
    if lowered == "false" {
        return Value::Bool(false);
    }
    if is_all_digits(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::from(n);
        }
    }
    if raw.matches('.').count() == 1 && is_all_digits(&raw.replacen('.', "", 1)) {
        if let Ok(f) = raw.parse::<f64>() {
            return Value::from(f);
        }
    }
    Value::String(raw.to_string())
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Start a metadata map with its `chunk_type` tag.
pub(crate) fn base(chunk_type: ContentType) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(
        "chunk_type".to_string(),
        Value::String(chunk_type.to_string()),
    );
    metadata
}

/// Stamp a freshly generated `chunk_id` and the chunk's position in the
/// output sequence. Ids come from a v4 UUID, so concurrent calls never clash.
pub(crate) fn stamp(metadata: &mut Metadata, index: usize) {
    metadata.insert(
        "chunk_id".to_string(),
        Value::String(Uuid::new_v4().to_string()),
    );
    metadata.insert("chunk_index".to_string(), Value::from(index as u64));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_passthrough() {
        assert_eq!(scalar(Value::Null), Value::Null);
        assert_eq!(scalar(Value::Bool(true)), Value::Bool(true));
        assert_eq!(scalar(Value::from(3)), Value::from(3));
        assert_eq!(
            scalar(Value::String("x".into())),
            Value::String("x".into())
        );
    }

    #[test]
    fn test_scalar_joins_lists() {
        let list = serde_json::json!(["nav", "main", 2]);
        assert_eq!(scalar(list), Value::String("nav main 2".into()));
    }

    #[test]
    fn test_scalar_stringifies_objects() {
        let obj = serde_json::json!({"a": 1});
        assert_eq!(scalar(obj), Value::String("{\"a\":1}".into()));
    }

    #[test]
    fn test_coerce_booleans() {
        assert_eq!(coerce_str("true"), Value::Bool(true));
        assert_eq!(coerce_str("False"), Value::Bool(false));
    }

    #[test]
    fn test_coerce_integers() {
        assert_eq!(coerce_str("42"), Value::from(42));
        assert_eq!(coerce_str("0"), Value::from(0));
    }

    #[test]
    fn test_coerce_floats() {
        assert_eq!(coerce_str("3.5"), Value::from(3.5));
        assert_eq!(coerce_str(".5"), Value::from(0.5));
    }

    #[test]
    fn test_coerce_strings() {
        assert_eq!(coerce_str("1.2.3"), Value::String("1.2.3".into()));
        assert_eq!(coerce_str("-5"), Value::String("-5".into()));
        assert_eq!(coerce_str("hello"), Value::String("hello".into()));
    }

    #[test]
    fn test_stamp_unique_ids() {
        let mut a = base(ContentType::Text);
        let mut b = base(ContentType::Text);
        stamp(&mut a, 0);
        stamp(&mut b, 1);
        assert_ne!(a.get("chunk_id"), b.get("chunk_id"));
        assert_eq!(b.get("chunk_index"), Some(&Value::from(1)));
    }
}
