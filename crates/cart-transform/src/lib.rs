//! Checkout cart transform for product option surcharges.
//!
//! The storefront attaches an additional-price signal to each cart line. This
//! crate rewrites the unit price of such lines to `base + signal` exactly once
//! and marks the replacement so later pricing passes leave it alone.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_transform::{run_json, StructuredLogger};
//!
//! let output = run_json(&stdin, &StructuredLogger::default())?;
//! ```

pub mod error;
pub mod input;
pub mod output;
pub mod simulate;
pub mod transform;

pub use error::TransformError;
pub use input::Input;
pub use options_observability::StructuredLogger;
pub use output::FunctionResult;
pub use transform::{classify, run, LineDecision, NoSignalReason};

/// Parse an input document, run the transform and serialize the result.
pub fn run_json(input: &str, logger: &StructuredLogger) -> Result<String, TransformError> {
    let input: Input = serde_json::from_str(input).map_err(TransformError::InvalidInput)?;
    let result = run(&input, logger);
    serde_json::to_string(&result).map_err(TransformError::Output)
}
