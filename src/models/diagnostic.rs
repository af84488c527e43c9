//! Conversion diagnostics
//!
//! Non-fatal findings raised while normalizing a batch. They are plain data:
//! collected in order, returned next to the converted entities, and never
//! stop the conversion of sibling items.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Reason recorded when an item has no usable `@type`
pub const INVALID_TYPE_REASON: &str = "Invalid or missing @type field";

/// A single non-fatal conversion finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source field that triggered the diagnostic (e.g. `@type`, `name`)
    pub field: String,
    /// Original offending value; `None` when the field was absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Human-readable reason
    pub reason: String,
    /// Location within the batch: item index first, then nested segments
    #[serde(default)]
    pub path: Vec<String>,
}

impl Diagnostic {
    pub fn new(field: impl Into<String>, value: Option<Value>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value,
            reason: reason.into(),
            path: Vec::new(),
        }
    }

    /// Diagnostic for a mandatory field that is missing or unusable
    pub fn required(field: &str, value: Option<&Value>) -> Self {
        Self::new(
            field,
            value.cloned(),
            format!("Required field '{}' is missing or invalid", field),
        )
    }

    /// Prefix the path with an outer segment (e.g. a batch index)
    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.field, self.reason)
        } else {
            write!(f, "[{}] {}: {}", self.path.join("."), self.field, self.reason)
        }
    }
}
