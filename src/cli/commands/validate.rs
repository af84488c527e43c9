//! Validate command implementation

use super::{load_input, render_envelope};
use crate::cli::error::CliError;
use crate::validation::schema::{check_instance, load_schema};
use crate::validation::{
    Envelope, ValidationError, YamlValidationOptions, validate_json, validate_yaml,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Document format for the validate command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateFormat {
    Json,
    Yaml,
}

/// Arguments for the validate command
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    pub format: ValidateFormat,
    /// Input file path or `-` for stdin
    pub input: String,
    /// JSON Schema file to validate against
    pub schema: Option<PathBuf>,
    /// Reject schemas with unknown formats
    pub strict: bool,
    pub pretty: bool,
}

fn read_schema(path: &Path) -> Result<Value, CliError> {
    let reference = path.to_string_lossy();
    match load_schema(&reference, None) {
        Ok(Some(schema)) => Ok(schema),
        Ok(None) => Err(CliError::FileNotFound(path.to_path_buf())),
        Err(e) => Err(CliError::InvalidArgument(e.to_string())),
    }
}

/// Run a validation and render its outcome as an envelope
pub fn run_validate(args: &ValidateArgs) -> Result<Envelope, CliError> {
    let content = load_input(&args.input)?;
    let schema = args.schema.as_deref().map(read_schema).transpose()?;

    let envelope = match args.format {
        ValidateFormat::Json => {
            let result = validate_json(&content).and_then(|valid| {
                let Some(schema) = &schema else {
                    return Ok(valid);
                };
                let errors = check_instance(schema, &valid.data.data, args.strict)?;
                if errors.is_empty() {
                    Ok(valid)
                } else {
                    Err(ValidationError::failed_with(
                        "JSON failed schema validation",
                        json!({ "errors": errors }),
                    ))
                }
            });
            Envelope::from_result(&result)
        }
        ValidateFormat::Yaml => {
            // In-document schema references resolve next to the input file
            let base_dir = match args.input.as_str() {
                "-" => None,
                path => Path::new(path).parent().map(Path::to_path_buf),
            };
            let options = YamlValidationOptions {
                schema,
                strict: args.strict,
                base_dir,
            };
            Envelope::from_result(&validate_yaml(&content, &options))
        }
    };

    Ok(envelope)
}

/// Handle the validate command
pub fn handle_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let envelope = run_validate(args)?;
    println!("{}", render_envelope(&envelope, args.pretty)?);

    match envelope.error() {
        Some(error) => Err(CliError::ValidationFailed(error.message().to_string())),
        None => Ok(()),
    }
}
