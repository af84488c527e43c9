//! JSON text validation

use super::result::{Valid, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

/// Parsed JSON payload and its top-level kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDocument {
    pub data: Value,
    /// One of `object`, `array`, `boolean`, `number`, `string`, or `scalar` for `null`
    pub type_token: String,
}

/// Check that `input` is well-formed JSON.
///
/// # Example
///
/// ```rust
/// use structured_data_sdk::validation::json::validate_json;
///
/// let result = validate_json(r#"{"name": "Ada"}"#).unwrap();
/// assert_eq!(result.data.type_token, "object");
/// assert!(validate_json("{not json").is_err());
/// ```
pub fn validate_json(input: &str) -> ValidationResult<JsonDocument> {
    let data: Value = serde_json::from_str(input).map_err(|e| {
        debug!("JSON parse failed: {}", e);
        ValidationError::failed_with(
            format!("Invalid JSON: {}", e),
            json!({ "line": e.line(), "column": e.column() }),
        )
    })?;

    let (type_token, message) = match &data {
        Value::Object(_) => ("object", "Is a valid JSON object"),
        Value::Array(_) => ("array", "Is a valid JSON array"),
        Value::Bool(_) => ("boolean", "Is a valid JSON boolean"),
        Value::Number(_) => ("number", "is a valid JSON number"),
        Value::String(_) => ("string", "is a valid JSON string"),
        Value::Null => ("scalar", "is valid JSON"),
    };

    Ok(Valid::new(
        message,
        JsonDocument {
            data,
            type_token: type_token.to_string(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tokens() {
        let cases = [
            ("{}", "object", "Is a valid JSON object"),
            ("[1, 2]", "array", "Is a valid JSON array"),
            ("true", "boolean", "Is a valid JSON boolean"),
            ("3.5", "number", "is a valid JSON number"),
            ("\"hi\"", "string", "is a valid JSON string"),
            ("null", "scalar", "is valid JSON"),
        ];
        for (input, token, message) in cases {
            let valid = validate_json(input).unwrap();
            assert_eq!(valid.data.type_token, token, "input: {}", input);
            assert_eq!(valid.message, message);
        }
    }

    #[test]
    fn test_parse_error_carries_position() {
        let err = validate_json("{\n  \"a\": }").unwrap_err();
        assert!(err.message().starts_with("Invalid JSON"));
        let context = err.context().unwrap();
        assert_eq!(context["line"], 2);
    }
}
