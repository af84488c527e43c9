//! Success/failure envelope shared by every validator and converter
//!
//! Success is a `Valid<T>` (message plus payload); failure is a
//! `ValidationError`. `Envelope` renders either side into the
//! `{"success": ..}` JSON shape used at process boundaries.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Successful validation or conversion outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "validation results should be inspected"]
pub struct Valid<T> {
    /// Textual description of the success
    pub message: String,
    /// Parsed or converted payload
    pub data: T,
}

impl<T> Valid<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Valid<U> {
        Valid {
            message: self.message,
            data: f(self.data),
        }
    }
}

/// Failure of a validation or conversion call
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValidationError {
    /// The check ran but the content did not pass
    #[error("{message}")]
    FailedValidation {
        message: String,
        /// Structured detail (diagnostics, schema errors, original fault)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Value>,
    },

    /// The check could not run because the schema is unusable
    #[error("Invalid schema: {message}")]
    InvalidSchema { message: String },
}

impl ValidationError {
    pub fn failed(message: impl Into<String>) -> Self {
        ValidationError::FailedValidation {
            message: message.into(),
            context: None,
        }
    }

    pub fn failed_with(message: impl Into<String>, context: Value) -> Self {
        ValidationError::FailedValidation {
            message: message.into(),
            context: Some(context),
        }
    }

    pub fn invalid_schema(message: impl Into<String>) -> Self {
        ValidationError::InvalidSchema {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationError::FailedValidation { message, .. } => message,
            ValidationError::InvalidSchema { message } => message,
        }
    }

    pub fn context(&self) -> Option<&Value> {
        match self {
            ValidationError::FailedValidation { context, .. } => context.as_ref(),
            ValidationError::InvalidSchema { .. } => None,
        }
    }
}

/// Result type for validators and converters
pub type ValidationResult<T> = Result<Valid<T>, ValidationError>;

/// Wire shape of a `ValidationResult`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Success {
        success: bool,
        message: String,
        data: Value,
    },
    Failure {
        success: bool,
        error: ValidationError,
    },
}

impl Envelope {
    /// Render a result, serializing the success payload to JSON
    pub fn from_result<T: Serialize>(result: &ValidationResult<T>) -> Self {
        match result {
            Ok(valid) => match serde_json::to_value(&valid.data) {
                Ok(data) => Envelope::Success {
                    success: true,
                    message: valid.message.clone(),
                    data,
                },
                Err(e) => Envelope::Failure {
                    success: false,
                    error: ValidationError::failed_with(
                        "Result could not be serialized",
                        json!({ "originalError": e.to_string() }),
                    ),
                },
            },
            Err(error) => Envelope::Failure {
                success: false,
                error: error.clone(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    /// The failure, when this envelope carries one
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Envelope::Failure { error, .. } => Some(error),
            Envelope::Success { .. } => None,
        }
    }
}
