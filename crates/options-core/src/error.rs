//! Option domain error types.

use thiserror::Error;

/// Errors that can occur while loading or checking option sets.
#[derive(Error, Debug)]
pub enum OptionsError {
    /// The option set document could not be parsed.
    #[error("Invalid option set document: {0}")]
    InvalidDocument(String),

    /// An option set failed validation.
    #[error("Option set {set} failed validation with {errors} error(s)")]
    ValidationFailed { set: String, errors: usize },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for OptionsError {
    fn from(e: serde_json::Error) -> Self {
        OptionsError::SerializationError(e.to_string())
    }
}
