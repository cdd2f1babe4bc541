//! Render configuration.

use options_core::rules::NumberBounds;
use options_core::Currency;
use serde::{Deserialize, Serialize};

/// Configuration shared by every renderer of one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// CSS class prefix for all option form elements.
    pub class_prefix: String,
    /// Currency used for price metadata.
    pub currency: Currency,
    /// Accepted range of number options.
    pub bounds: NumberBounds,
    /// How long the clamp notice stays visible, in milliseconds.
    pub notice_ms: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            class_prefix: "po".to_string(),
            currency: Currency::USD,
            bounds: NumberBounds::default(),
            notice_ms: 2500,
        }
    }
}

impl RenderConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// `{prefix}-{suffix}`.
    pub fn class(&self, suffix: &str) -> String {
        format!("{}-{}", self.class_prefix, suffix)
    }
}
