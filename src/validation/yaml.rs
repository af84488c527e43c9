//! YAML text validation
//!
//! Validates at two levels:
//! 1. Is the input well-formed YAML?
//! 2. If a schema is provided or referenced by the document, does the
//!    document conform to it?

use super::result::{Valid, ValidationError, ValidationResult};
use super::schema::{check_instance, extract_schema_reference, load_schema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Options for `validate_yaml`
#[derive(Debug, Clone, Default)]
pub struct YamlValidationOptions {
    /// Schema to validate against; overrides any in-document reference
    pub schema: Option<Value>,
    /// Reject schemas that use unknown formats instead of ignoring them
    pub strict: bool,
    /// Directory used to resolve relative schema file references
    pub base_dir: Option<PathBuf>,
}

/// Parsed YAML payload and the schema it was checked against, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamlDocument {
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Validate YAML structure and, when available, schema conformance.
///
/// # Example
///
/// ```rust
/// use structured_data_sdk::validation::yaml::{validate_yaml, YamlValidationOptions};
///
/// let result = validate_yaml("name: Ada\n", &YamlValidationOptions::default()).unwrap();
/// assert_eq!(result.message, "Valid YAML structure, no schema to validate against");
/// ```
pub fn validate_yaml(input: &str, options: &YamlValidationOptions) -> ValidationResult<YamlDocument> {
    let data: Value = serde_yaml::from_str(input).map_err(|e| {
        debug!("YAML parse failed: {}", e);
        ValidationError::failed(format!("Invalid YAML: {}", e))
    })?;

    let schema = match &options.schema {
        Some(schema) => Some(schema.clone()),
        None => match data.as_object().and_then(extract_schema_reference) {
            Some(reference) => match load_schema(reference, options.base_dir.as_deref())? {
                Some(schema) => Some(schema),
                None => {
                    return Err(ValidationError::failed(format!(
                        "Schema reference \"{}\" could not be resolved.",
                        reference
                    )));
                }
            },
            None => None,
        },
    };

    let Some(schema) = schema else {
        return Ok(Valid::new(
            "Valid YAML structure, no schema to validate against",
            YamlDocument { data, schema: None },
        ));
    };

    let errors = check_instance(&schema, &data, options.strict)?;
    if !errors.is_empty() {
        warn!("YAML failed schema validation with {} error(s)", errors.len());
        return Err(ValidationError::failed_with(
            "YAML failed schema validation",
            json!({ "errors": errors }),
        ));
    }

    Ok(Valid::new(
        "Valid YAML with valid schema",
        YamlDocument {
            data,
            schema: Some(schema),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_yaml_without_schema() {
        let valid = validate_yaml("a: 1\nb: [x, y]\n", &YamlValidationOptions::default()).unwrap();
        assert_eq!(valid.data.data, json!({"a": 1, "b": ["x", "y"]}));
        assert!(valid.data.schema.is_none());
    }

    #[test]
    fn test_malformed_yaml() {
        let err = validate_yaml("a: [1, 2\nb: }", &YamlValidationOptions::default()).unwrap_err();
        assert!(matches!(err, ValidationError::FailedValidation { .. }));
        assert!(err.message().starts_with("Invalid YAML"));
    }

    #[test]
    fn test_unreadable_reference_is_invalid_schema() {
        let err = validate_yaml(
            "$schema: ./nope/missing.json\nname: x\n",
            &YamlValidationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSchema { .. }));
    }
}
