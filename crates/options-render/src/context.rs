//! Per-render context handed to every renderer.

use options_core::ids::OptionId;
use options_core::money::Money;
use options_core::option::ProductOption;
use options_core::visibility::{Gate, RadioState, VisibilityResolver};
use options_observability::StructuredLogger;

use crate::config::RenderConfig;
use crate::fragment::html_escape;
use crate::styles::StyleRegistry;

/// Everything a renderer may look at besides the option itself.
///
/// Built once per form. Holds the sibling options (through the resolver) and
/// the initial radio state, so conditional options can be rendered in their
/// initial visibility without any global state.
pub struct RenderContext<'a> {
    config: &'a RenderConfig,
    resolver: VisibilityResolver<'a>,
    state: RadioState,
    styles: StyleRegistry,
    logger: StructuredLogger,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        config: &'a RenderConfig,
        options: &'a [ProductOption],
        logger: &StructuredLogger,
    ) -> Self {
        let logger = logger.child("options-render");
        Self {
            config,
            resolver: VisibilityResolver::new(options, &logger),
            state: RadioState::defaults(options),
            styles: StyleRegistry::new(config.class_prefix.clone()),
            logger,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    pub fn options(&self) -> &'a [ProductOption] {
        self.resolver.options()
    }

    pub fn resolver(&self) -> &VisibilityResolver<'a> {
        &self.resolver
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    pub fn gate(&self, option: &ProductOption) -> &Gate {
        self.resolver.gate(&option.id)
    }

    /// Initial visibility of `option`.
    pub fn is_visible(&self, option: &ProductOption) -> bool {
        self.resolver.is_visible(&option.id, &self.state)
    }

    /// Initially selected label of a radio.
    pub fn selected(&self, radio: &OptionId) -> Option<&str> {
        self.state.selected(radio)
    }

    pub fn class(&self, suffix: &str) -> String {
        self.config.class(suffix)
    }

    /// Element id of an option's primary input.
    pub fn input_id(&self, option: &ProductOption) -> String {
        html_escape(&format!("{}-input-{}", self.config.class_prefix, option.id))
    }

    /// Escaped `properties[<name>]` field name.
    pub fn field_name(&self, option: &ProductOption) -> String {
        html_escape(&format!("properties[{}]", option.name))
    }

    /// Decimal string for `data-price` attributes; `0` when unpriced.
    pub fn price_attr(&self, price: Option<Money>) -> String {
        price
            .map(|m| m.display_amount())
            .unwrap_or_else(|| Money::zero(self.config.currency).display_amount())
    }
}
