//! Validation functionality
//!
//! Provides:
//! - The success/failure envelope shared with the Schema.org converter
//! - JSON text validation
//! - YAML text validation with optional JSON Schema conformance

pub mod json;
pub mod result;
pub mod schema;
pub mod yaml;

pub use json::{JsonDocument, validate_json};
pub use result::{Envelope, Valid, ValidationError, ValidationResult};
pub use yaml::{YamlDocument, YamlValidationOptions, validate_yaml};
