//! Transform error types.
//!
//! Only whole-document problems are errors. Anything wrong with a single
//! line is handled inside the transform and leaves that line untouched.

use thiserror::Error;

/// Errors that can occur around a transform invocation.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The input document is not a cart snapshot.
    #[error("Invalid transform input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    /// The result could not be serialized.
    #[error("Failed to serialize transform output: {0}")]
    Output(#[source] serde_json::Error),
}
