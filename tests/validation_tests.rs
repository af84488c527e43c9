//! JSON and YAML validation tests

use serde_json::json;
use structured_data_sdk::validation::{
    Envelope, ValidationError, YamlValidationOptions, validate_json, validate_yaml,
};

mod json_tests {
    use super::*;

    #[test]
    fn test_valid_object() {
        let result = validate_json(r#"{"@type": "Person", "name": "Ada"}"#).unwrap();
        assert_eq!(result.message, "Is a valid JSON object");
        assert_eq!(result.data.type_token, "object");
        assert_eq!(result.data.data["name"], json!("Ada"));
    }

    #[test]
    fn test_scalar_documents() {
        assert_eq!(validate_json("42").unwrap().message, "is a valid JSON number");
        assert_eq!(validate_json("\"x\"").unwrap().message, "is a valid JSON string");
        assert_eq!(validate_json("false").unwrap().data.type_token, "boolean");
        let null = validate_json("null").unwrap();
        assert_eq!(null.message, "is valid JSON");
        assert_eq!(null.data.type_token, "scalar");
    }

    #[test]
    fn test_invalid_json() {
        let err = validate_json("{\"name\": \"Ada\",}").unwrap_err();
        assert!(matches!(err, ValidationError::FailedValidation { .. }));
        assert!(err.message().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_envelope_rendering() {
        let ok = serde_json::to_value(Envelope::from_result(&validate_json("[1]"))).unwrap();
        assert_eq!(ok["success"], json!(true));
        assert_eq!(ok["message"], json!("Is a valid JSON array"));
        assert_eq!(ok["data"]["typeToken"], json!("array"));

        let failed = serde_json::to_value(Envelope::from_result(&validate_json("["))).unwrap();
        assert_eq!(failed["success"], json!(false));
        assert_eq!(failed["error"]["kind"], json!("FailedValidation"));
    }
}

mod yaml_tests {
    use super::*;

    #[test]
    fn test_yaml_without_schema() {
        let result = validate_yaml(
            "name: Example\nitems:\n  - one\n  - two\n",
            &YamlValidationOptions::default(),
        )
        .unwrap();
        assert_eq!(result.message, "Valid YAML structure, no schema to validate against");
        assert_eq!(result.data.data, json!({"name": "Example", "items": ["one", "two"]}));
    }

    #[test]
    fn test_scalar_yaml_has_no_schema_reference() {
        let result = validate_yaml("just text", &YamlValidationOptions::default()).unwrap();
        assert_eq!(result.data.data, json!("just text"));
        assert!(result.data.schema.is_none());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = validate_yaml("key: [unclosed", &YamlValidationOptions::default()).unwrap_err();
        assert!(err.message().starts_with("Invalid YAML"));
    }

    #[test]
    fn test_non_string_reference_is_ignored() {
        let result = validate_yaml(
            "$schema:\n  type: object\nname: x\n",
            &YamlValidationOptions::default(),
        )
        .unwrap();
        assert!(result.data.schema.is_none());
    }

    #[cfg(not(feature = "remote-schemas"))]
    #[test]
    fn test_remote_reference_requires_feature() {
        let err = validate_yaml(
            "$schema: https://example.com/schema.json\nname: x\n",
            &YamlValidationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSchema { .. }));
        assert!(err.message().contains("remote-schemas"));
    }
}

#[cfg(feature = "schema-validation")]
mod schema_tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn person_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer", "minimum": 0}
            },
            "required": ["name"]
        })
    }

    #[test]
    fn test_explicit_schema_passes() {
        let options = YamlValidationOptions {
            schema: Some(person_schema()),
            ..Default::default()
        };
        let result = validate_yaml("name: Ada\nage: 36\n", &options).unwrap();
        assert_eq!(result.message, "Valid YAML with valid schema");
        assert_eq!(result.data.schema, Some(person_schema()));
    }

    #[test]
    fn test_explicit_schema_violations() {
        let options = YamlValidationOptions {
            schema: Some(person_schema()),
            ..Default::default()
        };
        let err = validate_yaml("age: -1\n", &options).unwrap_err();
        assert_eq!(err.message(), "YAML failed schema validation");
        let errors = err.context().unwrap()["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_referenced_schema_file() {
        let dir = tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("person.schema.json")).unwrap();
        write!(file, "{}", person_schema()).unwrap();

        let options = YamlValidationOptions {
            base_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        let result = validate_yaml("x-schema: person.schema.json\nname: Ada\n", &options).unwrap();
        assert_eq!(result.message, "Valid YAML with valid schema");

        let err = validate_yaml("schema: person.schema.json\nage: 3\n", &options).unwrap_err();
        assert_eq!(err.message(), "YAML failed schema validation");
    }

    #[test]
    fn test_unparseable_schema_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let options = YamlValidationOptions {
            base_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let err = validate_yaml("_schema: broken.json\nname: x\n", &options).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSchema { .. }));
        assert!(err.message().contains("broken.json"));
    }

    #[test]
    fn test_unknown_format_ignored_when_lenient() {
        let options = YamlValidationOptions {
            schema: Some(json!({
                "type": "object",
                "properties": {"code": {"type": "string", "format": "not-a-real-format"}}
            })),
            strict: false,
            ..Default::default()
        };
        assert!(validate_yaml("code: abc\n", &options).is_ok());
    }

    #[test]
    fn test_explicit_schema_overrides_reference() {
        let options = YamlValidationOptions {
            schema: Some(json!({"type": "object"})),
            ..Default::default()
        };
        let result = validate_yaml("$schema: ./does-not-exist.json\nname: x\n", &options).unwrap();
        assert_eq!(result.data.schema, Some(json!({"type": "object"})));
    }
}
