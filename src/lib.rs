//! Structured Data SDK - Schema.org normalization and document validation
//!
//! Provides unified interfaces for:
//! - Converting Schema.org JSON-LD (Person, Organization, Product, Event)
//!   into typed, normalized entities with non-fatal diagnostics
//! - Validating JSON and YAML text, optionally against a JSON Schema
//! - Loading conversion options from config files and the environment

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, ConversionOptions};
pub use convert::{
    BatchConversion, SchemaOrgConverter, SingleConversion, convert_batch, convert_json,
    convert_single,
};
pub use models::{
    Agent, Diagnostic, EntityType, Event, NormalizedEntity, Organization, Person, Product,
    Provenance, is_of_type,
};
pub use validation::{
    Envelope, JsonDocument, Valid, ValidationError, ValidationResult, YamlDocument,
    YamlValidationOptions, validate_json, validate_yaml,
};
