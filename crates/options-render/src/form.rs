//! Composition root: a whole option set as one form block.

use options_core::error::OptionsError;
use options_core::option::OptionSet;
use options_core::properties::{LineProperties, ADDITIONAL_PRICE_KEY, OPTIONS_BLOB_KEY};
use options_core::selection::Selections;
use options_observability::StructuredLogger;

use crate::config::RenderConfig;
use crate::context::RenderContext;
use crate::fragment::{html_escape, Fragment};
use crate::renderers::render_option;
use crate::script::option_form_script;

/// Renders an option set for the product form.
///
/// The output is meant to sit inside the storefront's add-to-cart `<form>`,
/// so it is a `<div>` block rather than a form of its own.
pub struct OptionForm<'a> {
    set: &'a OptionSet,
    config: &'a RenderConfig,
}

impl<'a> OptionForm<'a> {
    pub fn new(set: &'a OptionSet, config: &'a RenderConfig) -> Self {
        Self { set, config }
    }

    /// Stylesheet, option block with the reserved hidden inputs, and runtime.
    pub fn render(&self, logger: &StructuredLogger) -> Result<Fragment, OptionsError> {
        let ctx = RenderContext::new(self.config, &self.set.options, logger);
        let style = ctx.styles().take().unwrap_or_default();

        let options: Fragment = self
            .set
            .options
            .iter()
            .map(|option| render_option(option, &ctx))
            .collect();

        // Radios start on their first value, so the blob is not empty even
        // before the runtime runs.
        let initial = LineProperties::build(
            ctx.resolver(),
            &Selections::new(),
            &self.config.bounds,
            self.config.currency,
        )?;

        let hidden_count = self
            .set
            .options
            .iter()
            .filter(|o| !ctx.is_visible(o))
            .count();
        ctx.logger()
            .info_builder("rendered option form")
            .field("option_set", self.set.id.as_str())
            .field_i64("options", self.set.options.len() as i64)
            .field_i64("initially_hidden", hidden_count as i64)
            .emit();

        Ok(Fragment::new(format!(
            r#"{style}
<div class="{form}" data-option-form data-option-set="{set}" data-currency="{currency}" data-decimals="{decimals}" data-notice-ms="{notice}">
{options}
<input type="hidden" name="properties[{price_key}]" value="" data-additional-price disabled>
<input type="hidden" name="properties[{blob_key}]" value="{blob}" data-options-blob>
</div>
{script}"#,
            style = style,
            form = ctx.class("form"),
            set = html_escape(self.set.id.as_str()),
            currency = self.config.currency.code(),
            decimals = self.config.currency.decimal_places(),
            notice = self.config.notice_ms,
            options = options,
            price_key = ADDITIONAL_PRICE_KEY,
            blob_key = OPTIONS_BLOB_KEY,
            blob = html_escape(&initial.blob()),
            script = option_form_script(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use options_core::option::{OptionKind, OptionValue, ProductOption};
    use options_observability::LogLevel;

    fn set() -> OptionSet {
        OptionSet::new("engraving-set", "Engraving")
            .with_option(ProductOption::new(
                "personalize",
                "Personalize",
                OptionKind::Radio {
                    values: vec![OptionValue::new("n", "No"), OptionValue::new("y", "Yes")],
                },
            ))
            .with_option(
                ProductOption::new("engraving", "Engraving", OptionKind::Text { price: Some(5.5) })
                    .required()
                    .shown_when("personalize", "Yes"),
            )
            .with_option(ProductOption::new(
                "count",
                "Count",
                OptionKind::Number { price: None },
            ))
    }

    #[test]
    fn test_form_structure() {
        let set = set();
        let config = RenderConfig::default();
        let html = OptionForm::new(&set, &config)
            .render(&StructuredLogger::quiet())
            .unwrap()
            .into_string();

        assert_eq!(html.matches("<style").count(), 1);
        assert_eq!(html.matches("<script>").count(), 1);
        assert!(html.contains(r#"data-option-set="engraving-set""#));
        assert!(html.contains(r#"name="properties[_additional_price]" value="" data-additional-price disabled"#));
        assert!(html.contains(r#"value="{&quot;Personalize&quot;:&quot;No&quot;}""#));
        assert!(html.contains("disabled hidden"));

        let personalize = html.find("data-option-id=\"personalize\"").unwrap();
        let engraving = html.find("data-option-id=\"engraving\"").unwrap();
        let count = html.find("data-option-id=\"count\"").unwrap();
        assert!(personalize < engraving && engraving < count);
    }

    #[test]
    fn test_render_logs_summary() {
        let set = set();
        let config = RenderConfig::default().with_prefix("shop");
        let (logger, capture) = StructuredLogger::capturing();
        let html = OptionForm::new(&set, &config).render(&logger).unwrap();

        assert!(html.as_str().contains("class=\"shop-form\""));
        let info = capture.at_level(LogLevel::Info);
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].field("option_set"), Some("engraving-set"));
        assert_eq!(info[0].fields["initially_hidden"], serde_json::json!(1));
    }
}
