//! Runtime kinds of JSON values.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// The primitive kind of a value, as named in type checks.
///
/// `Object` is a mapping only; arrays have their own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        Self::of(value) == *self
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of_values() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn test_array_is_not_object() {
        assert!(!ValueKind::Object.matches(&json!([])));
        assert_eq!(ValueKind::Array.to_string(), "array");
    }
}
