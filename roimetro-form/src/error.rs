//! Form error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid amount for {field}: {reason}")]
    InvalidAmount { field: String, reason: String },

    #[error("Negative amount for {field}: {value}")]
    NegativeAmount { field: String, value: f64 },

    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),
}

/// Result type alias for form operations.
pub type FormResult<T> = Result<T, FormError>;
