//! Storefront rendering of product options.
//!
//! Turns an option set into HTML for the product form:
//!
//! - **Renderers**: one per option type, dispatched by `OptionKind`
//! - **Conditional wrapper**: toggled by the runtime when a radio changes
//! - **Styles**: generated for the configured class prefix, emitted once
//! - **Runtime**: a small script that filters, clamps and sums surcharges
//!   into the reserved cart properties
//!
//! # Example
//!
//! ```rust,ignore
//! use options_render::{OptionForm, RenderConfig};
//!
//! let config = RenderConfig::default();
//! let html = OptionForm::new(&set, &config).render(&logger)?;
//! ```

pub mod conditional;
pub mod config;
pub mod context;
pub mod form;
pub mod fragment;
pub mod renderers;
pub mod script;
pub mod styles;

pub use conditional::wrap_conditional;
pub use config::RenderConfig;
pub use context::RenderContext;
pub use form::OptionForm;
pub use fragment::{html_escape, Fragment};
pub use renderers::render_option;
pub use styles::StyleRegistry;
