//! Observability for the product options platform.
//!
//! This crate provides:
//! - `RequestId` - Correlation identifier for a render or transform invocation
//! - `StructuredLogger` - Structured logging with request context

mod context;
mod logging;

pub use context::*;
pub use logging::*;
