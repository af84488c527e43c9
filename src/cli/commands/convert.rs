//! Convert command implementation

use super::{load_input, render_envelope};
use crate::cli::error::CliError;
use crate::config::ConversionOptions;
use crate::convert::{convert_json, convert_single};
use crate::validation::{Envelope, ValidationError};
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Arguments for the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Input file path or `-` for stdin
    pub input: String,
    /// Directory searched for `.structured-data.toml` (current directory when unset)
    pub config_dir: Option<PathBuf>,
    /// Overrides the configured base URL
    pub base_url: Option<String>,
    /// Overrides the configured required-field validation
    pub validate_required: Option<bool>,
    /// Overrides the configured URL normalization
    pub normalize_urls: Option<bool>,
    /// Return only the first converted entity
    pub single: bool,
    pub pretty: bool,
}

/// Resolve options: config file and environment first, then command-line flags.
pub fn resolve_options(args: &ConvertArgs) -> Result<ConversionOptions, CliError> {
    let dir = match &args.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|e| CliError::InvalidArgument(format!("No working directory: {}", e)))?,
    };
    let mut options = ConversionOptions::load(&dir)?;

    if let Some(base_url) = &args.base_url {
        options.base_url = Some(base_url.clone());
    }
    if let Some(enabled) = args.validate_required {
        options.validate_required = enabled;
    }
    if let Some(enabled) = args.normalize_urls {
        options.normalize_urls = enabled;
    }

    debug!("Resolved conversion options: {:?}", options);
    Ok(options)
}

/// Run a conversion and render its outcome as an envelope
pub fn run_convert(args: &ConvertArgs) -> Result<Envelope, CliError> {
    let options = resolve_options(args)?;
    let content = load_input(&args.input)?;

    let envelope = if args.single {
        let result = serde_json::from_str::<Value>(&content)
            .map_err(|e| ValidationError::failed(format!("Invalid JSON: {}", e)))
            .and_then(|value| convert_single(&value, &options));
        Envelope::from_result(&result)
    } else {
        Envelope::from_result(&convert_json(&content, &options))
    };

    Ok(envelope)
}

/// Handle the convert command
pub fn handle_convert(args: &ConvertArgs) -> Result<(), CliError> {
    let envelope = run_convert(args)?;
    println!("{}", render_envelope(&envelope, args.pretty)?);

    match envelope.error() {
        Some(error) => Err(CliError::ConversionFailed(error.message().to_string())),
        None => Ok(()),
    }
}
