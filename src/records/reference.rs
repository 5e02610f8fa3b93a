use serde_json::Value;

/// Tagged view of a foreign-key-like reference as found in exported rows.
///
/// Source exports encode the same logical reference in several shapes: a bare
/// id, a one-element list, a key/value record, or a *string serialization* of
/// a list. Classification is lossless; [`RefValue::resolve`] collapses the
/// shape into one canonical identifier.
#[derive(Clone, Debug, PartialEq)]
pub enum RefValue {
    /// No value: JSON null, or an empty/whitespace-only string.
    Absent,
    /// Plain scalar usable as an identifier (string, number, bool).
    Scalar(String),
    /// A genuine sequence of references.
    List(Vec<RefValue>),
    /// A key/value record carrying the identifier in a well-known field.
    Object(serde_json::Map<String, Value>),
    /// A `[`-prefixed string that did not parse as a list. Kept verbatim:
    /// the raw text may itself be the literal identifier.
    Raw(String),
}

/// Identifier fields probed on record-shaped references, in preference order.
const ID_FIELDS: [&str; 3] = ["unique_id", "_id", "id"];

impl RefValue {
    /// Classify an arbitrary JSON value as a reference shape.
    ///
    /// Total: any input maps to some variant, nothing is rejected.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(s) => Self::classify_str(s),
            Value::Bool(b) => Self::Scalar(b.to_string()),
            Value::Number(n) => Self::Scalar(n.to_string()),
            Value::Array(items) => Self::List(items.iter().map(Self::classify).collect()),
            Value::Object(map) => Self::Object(map.clone()),
        }
    }

    fn classify_str(s: &str) -> Self {
        if s.trim().is_empty() {
            return Self::Absent;
        }
        if !s.starts_with('[') {
            return Self::Scalar(s.to_string());
        }
        // Serialized-list strings are parsed as JSON. Parse failure (or a
        // parsed-but-empty list) keeps the original text: malformed data and
        // a literal id that happens to start with '[' are indistinguishable
        // here, so the raw string degrades gracefully instead of vanishing.
        match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) if !items.is_empty() => {
                Self::List(items.iter().map(Self::classify).collect())
            }
            _ => Self::Raw(s.to_string()),
        }
    }

    /// Collapse the reference into a single canonical identifier, or `None`
    /// when the value is absent. Never fails, never panics.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Scalar(s) | Self::Raw(s) => Some(s.clone()),
            Self::List(items) => items.first().and_then(Self::resolve),
            Self::Object(map) => ID_FIELDS
                .iter()
                .find_map(|key| map.get(*key))
                .and_then(|v| Self::classify(v).resolve()),
        }
    }
}

/// Normalize an arbitrary reference value into a canonical identifier.
///
/// Pure and total: the only "failure" mode is `None` for absent values.
pub fn normalize_ref(value: &Value) -> Option<String> {
    RefValue::classify(value).resolve()
}

#[cfg(test)]
#[path = "../../tests/unit/records/reference.rs"]
mod tests;
