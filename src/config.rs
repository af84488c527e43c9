//! Conversion configuration
//!
//! `ConversionOptions` is the single immutable record threaded through the
//! whole Schema.org conversion. It can be built in code, deserialized from
//! camelCase JSON, or loaded from a `.structured-data.toml` file with
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".structured-data.toml";

/// Environment variable toggling required-field diagnostics
pub const ENV_VALIDATE_REQUIRED: &str = "STRUCTURED_DATA_VALIDATE_REQUIRED";

/// Environment variable toggling URL canonicalization
pub const ENV_NORMALIZE_URLS: &str = "STRUCTURED_DATA_NORMALIZE_URLS";

/// Environment variable for the relative URL resolution base
pub const ENV_BASE_URL: &str = "STRUCTURED_DATA_BASE_URL";

/// Errors raised while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Config error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Options controlling a conversion call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionOptions {
    /// Emit diagnostics for missing mandatory fields
    pub validate_required: bool,
    /// Reserved: default-value injection
    pub include_fallbacks: bool,
    /// Reserved: pass-through of unmapped source fields
    pub preserve_unknown: bool,
    /// Reserved: per-type custom field renaming (type -> source -> target)
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub property_mappings: HashMap<String, HashMap<String, String>>,
    /// Reserved: URL-bearing fields are resolved regardless of this flag
    pub normalize_urls: bool,
    /// Base for resolving relative URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            validate_required: true,
            include_fallbacks: true,
            preserve_unknown: false,
            property_mappings: HashMap::new(),
            normalize_urls: true,
            base_url: None,
        }
    }
}

/// On-disk layout of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    conversion: ConversionOptions,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_validate_required(mut self, enabled: bool) -> Self {
        self.validate_required = enabled;
        self
    }

    pub fn with_normalize_urls(mut self, enabled: bool) -> Self {
        self.normalize_urls = enabled;
        self
    }

    /// Non-empty resolution base, if configured
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|b| !b.is_empty())
    }

    /// Load options from a directory
    ///
    /// Looks for `.structured-data.toml` in `dir`. Falls back to defaults
    /// if not found, then applies environment overrides.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut options = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        options.apply_env_overrides();
        Ok(options)
    }

    /// Parse options from a TOML string with a `[conversion]` table
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str::<ConfigFile>(content)
            .map(|file| file.conversion)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Write options to `dir/.structured-data.toml`
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        std::fs::write(dir.join(CONFIG_FILENAME), content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        let file = ConfigFile {
            conversion: self.clone(),
        };
        toml::to_string_pretty(&file).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(ENV_VALIDATE_REQUIRED)
            && let Some(enabled) = parse_flag(&value)
        {
            self.validate_required = enabled;
        }

        if let Ok(value) = std::env::var(ENV_NORMALIZE_URLS)
            && let Some(enabled) = parse_flag(&value)
        {
            self.normalize_urls = enabled;
        }

        if let Ok(base) = std::env::var(ENV_BASE_URL) {
            self.base_url = Some(base);
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Structured data SDK configuration

[conversion]
# Emit diagnostics for missing mandatory fields (name, startDate for events)
validateRequired = true

# Base for resolving relative URLs such as "/profile"
# baseUrl = "https://example.com"

# Reserved options, accepted but not applied yet
includeFallbacks = true
preserveUnknown = false
normalizeUrls = true
"#
}
