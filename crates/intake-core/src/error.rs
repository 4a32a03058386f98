//! Centralized error types for intake.

use thiserror::Error;

/// Main error type for intake operations.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Malformed message: {0}")]
    MalformedMessage(String),
}

/// Result type for intake operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

impl IntakeError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a malformed message error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedMessage(msg.into())
    }
}
