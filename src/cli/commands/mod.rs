//! CLI command implementations

pub mod config;
pub mod convert;
pub mod validate;

use crate::cli::error::CliError;
use crate::validation::Envelope;
use std::io::Read;
use std::path::PathBuf;

/// Load input content from a file path, or stdin for `-`
pub fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        if !path.exists() {
            return Err(CliError::FileNotFound(path));
        }
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Render an envelope as JSON
pub fn render_envelope(envelope: &Envelope, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(envelope)
    } else {
        serde_json::to_string(envelope)
    };
    rendered.map_err(|e| CliError::SerializationError(e.to_string()))
}
