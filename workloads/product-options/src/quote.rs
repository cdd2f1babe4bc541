//! `POST /options/quote`: line properties for a set of selections.

use anyhow::{Context, Result};
use options_core::catalog::{OptionCatalog, OptionSetSource};
use options_core::option::ProductRef;
use options_core::properties::{LineItemProperty, LineProperties};
use options_core::selection::Selections;
use options_core::visibility::VisibilityResolver;
use options_observability::StructuredLogger;
use options_render::RenderConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub selections: Selections,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub option_set: String,
    pub properties: Vec<LineItemProperty>,
    /// Full cart line attributes including the reserved keys.
    pub attributes: Vec<LineItemProperty>,
    pub additional_price: String,
    pub currency: String,
}

/// Quote `body`; `Ok(None)` when no option set applies.
pub fn quote(
    catalog: &OptionCatalog,
    config: &RenderConfig,
    body: &[u8],
    logger: &StructuredLogger,
) -> Result<Option<QuoteResponse>> {
    let request: QuoteRequest =
        serde_json::from_slice(body).context("Quote request is not valid JSON")?;

    let product = request
        .tags
        .iter()
        .fold(
            ProductRef::new(request.handle.clone().unwrap_or_default()),
            |product, tag| product.with_tag(tag.clone()),
        );
    let Some(set) = catalog.option_set_for(&product) else {
        return Ok(None);
    };

    let resolver = VisibilityResolver::new(&set.options, logger);
    let props = LineProperties::build(&resolver, &request.selections, &config.bounds, config.currency)?;

    logger
        .info_builder("quoted selections")
        .field("option_set", set.id.as_str())
        .field("additional_price", props.additional_price.display_amount())
        .emit();

    Ok(Some(QuoteResponse {
        option_set: set.id.to_string(),
        attributes: props.attributes(),
        additional_price: props.additional_price.display_amount(),
        currency: config.currency.code().to_string(),
        properties: props.properties,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load;

    #[test]
    fn test_quote_engraving() {
        let catalog = load().unwrap();
        let body = br#"{
            "tags": ["engravable"],
            "selections": {"Personalize": "Yes", "Engraving": "Anna", "Font": "Script", "Finish": "Black"}
        }"#;
        let response = quote(&catalog, &RenderConfig::default(), body, &StructuredLogger::quiet())
            .unwrap()
            .unwrap();

        assert_eq!(response.option_set, "engraving");
        assert_eq!(response.additional_price, "14.75");
        assert!(response
            .attributes
            .iter()
            .any(|a| a.name == "_additional_price" && a.value == "14.75"));
    }

    #[test]
    fn test_hidden_selections_are_free() {
        let catalog = load().unwrap();
        let body = br#"{"tags": ["engravable"], "selections": {"Engraving": "Anna"}}"#;
        let response = quote(&catalog, &RenderConfig::default(), body, &StructuredLogger::quiet())
            .unwrap()
            .unwrap();
        assert_eq!(response.additional_price, "0.00");
        assert!(response.properties.iter().all(|p| p.name != "Engraving"));
    }

    #[test]
    fn test_bad_body() {
        let catalog = load().unwrap();
        assert!(quote(&catalog, &RenderConfig::default(), b"nope", &StructuredLogger::quiet()).is_err());
    }
}
