//! Shape-sniffing of polymorphic Schema.org fields
//!
//! Schema.org producers freely write the same property as a bare string,
//! a nested typed object, or a list of either. Every converter resolves a
//! field through `sniff` once, then branches on the resulting `Shape`.

use serde_json::{Map, Value};

/// Source object fields
pub type Fields = Map<String, Value>;

/// Structural shape of a single source value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// Missing, `null`, or an empty string
    Absent,
    /// Non-empty string
    Text(&'a str),
    /// Nested object
    Object(&'a Fields),
    /// Anything else (numbers, booleans, arrays where a scalar was expected)
    Other,
}

/// Classify a value for the string-or-object branch.
pub fn sniff(value: Option<&Value>) -> Shape<'_> {
    match value {
        None | Some(Value::Null) => Shape::Absent,
        Some(Value::String(s)) if s.is_empty() => Shape::Absent,
        Some(Value::String(s)) => Shape::Text(s),
        Some(Value::Object(map)) => Shape::Object(map),
        Some(_) => Shape::Other,
    }
}

/// Items of a list-bearing field.
///
/// `None` when the field is absent; a bare value becomes a one-item list;
/// an empty array stays empty.
pub fn list_items(value: Option<&Value>) -> Option<Vec<&Value>> {
    match value {
        Some(Value::Array(items)) => Some(items.iter().collect()),
        other => match sniff(other) {
            Shape::Absent => None,
            _ => other.map(|v| vec![v]),
        },
    }
}

/// Declared `@type` of a source object.
///
/// `None` when the tag is missing or neither a string nor an array. For an
/// array the first element is authoritative; a non-string or missing first
/// element yields an empty type name.
pub fn type_tag(fields: &Fields) -> Option<&str> {
    match fields.get("@type")? {
        Value::String(s) => Some(s),
        Value::Array(items) => Some(items.first().and_then(Value::as_str).unwrap_or("")),
        _ => None,
    }
}

/// Whether the object's primary type equals `expected`
pub fn has_type(fields: &Fields, expected: &str) -> bool {
    type_tag(fields) == Some(expected)
}
