//! JSON Schema loading and checking
//!
//! Schemas are referenced from documents by one of the well-known keys
//! (`$schema`, `schema`, `x-schema`, `_schema`) and loaded from a local JSON
//! file or, with the `remote-schemas` feature, over http(s).

use super::result::ValidationError;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Document keys that may carry a schema reference, in priority order
pub const SCHEMA_REFERENCE_KEYS: [&str; 4] = ["$schema", "schema", "x-schema", "_schema"];

/// First string-valued schema reference found in a document mapping
pub fn extract_schema_reference(doc: &Map<String, Value>) -> Option<&str> {
    SCHEMA_REFERENCE_KEYS
        .iter()
        .find_map(|key| doc.get(*key).and_then(|v| v.as_str()))
}

/// Load a schema by reference.
///
/// Returns `Ok(None)` when a remote server answered but did not serve the
/// schema (non-success status). Unreadable or unparseable schemas are
/// `InvalidSchema` errors.
pub fn load_schema(reference: &str, base_dir: Option<&Path>) -> Result<Option<Value>, ValidationError> {
    match url::Url::parse(reference) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => load_remote(url.as_str()),
        _ => load_file(&resolve_path(reference, base_dir))
            .map(Some)
            .map_err(|e| ValidationError::invalid_schema(format!("{:#}", e))),
    }
}

fn resolve_path(reference: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(reference);
    match base_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

fn load_file(path: &Path) -> Result<Value> {
    debug!("Loading schema from {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;
    let schema = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse schema file {}", path.display()))?;
    Ok(schema)
}

#[cfg(feature = "remote-schemas")]
fn load_remote(url: &str) -> Result<Option<Value>, ValidationError> {
    info!("Fetching remote schema {}", url);
    let fetch = || -> Result<Option<Value>> {
        let response = reqwest::blocking::get(url)
            .with_context(|| format!("Failed to fetch schema {}", url))?;
        if !response.status().is_success() {
            debug!("Schema fetch for {} returned {}", url, response.status());
            return Ok(None);
        }
        let schema = response
            .json::<Value>()
            .with_context(|| format!("Schema at {} is not valid JSON", url))?;
        Ok(Some(schema))
    };
    fetch().map_err(|e| ValidationError::invalid_schema(format!("{:#}", e)))
}

#[cfg(not(feature = "remote-schemas"))]
fn load_remote(url: &str) -> Result<Option<Value>, ValidationError> {
    info!("Remote schema {} requested without remote support", url);
    Err(ValidationError::invalid_schema(format!(
        "Remote schema references are not enabled ({}). Enable the 'remote-schemas' feature.",
        url
    )))
}

/// Check `instance` against `schema`, returning every violation message.
///
/// An empty list means the instance conforms. Formats are always
/// validated; in `strict` mode a schema using an unknown format fails to
/// compile instead of having that format ignored.
#[cfg(feature = "schema-validation")]
pub fn check_instance(
    schema: &Value,
    instance: &Value,
    strict: bool,
) -> Result<Vec<String>, ValidationError> {
    let validator = jsonschema::options()
        .should_validate_formats(true)
        .should_ignore_unknown_formats(!strict)
        .build(schema)
        .map_err(|e| ValidationError::invalid_schema(format!("Failed to compile schema: {}", e)))?;

    Ok(validator
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect())
}

#[cfg(not(feature = "schema-validation"))]
pub fn check_instance(
    _schema: &Value,
    _instance: &Value,
    _strict: bool,
) -> Result<Vec<String>, ValidationError> {
    Err(ValidationError::invalid_schema(
        "Schema validation support not enabled. Enable the 'schema-validation' feature.",
    ))
}
