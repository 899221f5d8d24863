//! Evaluation error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvalError>;

/// Terminal failure of a single evaluation call.
///
/// The payload names the offending model element (field, rule, layer, ...)
/// where one is available.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Model is not scorable: {0}")]
    NotScorable(String),
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Missing result: {0}")]
    MissingResult(String),
    #[error("Type mismatch for field {field}: expected {expected}")]
    TypeMismatch { field: String, expected: String },
}

impl EvalError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        EvalError::MissingField(field.into())
    }

    pub fn unsupported(feature: impl Into<String>) -> Self {
        EvalError::UnsupportedFeature(feature.into())
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        EvalError::InvalidConfiguration(detail.into())
    }

    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>) -> Self {
        EvalError::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
        }
    }
}
