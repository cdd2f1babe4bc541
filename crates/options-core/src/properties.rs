//! Cart line properties built from option selections.
//!
//! The storefront sends selections to checkout as line item properties. Three
//! reserved keys ride along; the leading underscore keeps them out of the
//! customer-facing property list.

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::money::{Currency, Money};
use crate::option::{OptionKind, ProductOption};
use crate::rules::{is_answered, sanitize_text, NumberBounds};
use crate::selection::Selections;
use crate::surcharge;
use crate::visibility::{RadioState, VisibilityResolver};

/// JSON object of option name → selected value.
pub const OPTIONS_BLOB_KEY: &str = "_options";
/// Decimal string with the summed option surcharge.
pub const ADDITIONAL_PRICE_KEY: &str = "_additional_price";
/// Set on lines whose price already includes the surcharge.
pub const PROCESSED_KEY: &str = "_options_processed";

/// Whether `key` is one of the reserved bookkeeping keys.
pub fn is_reserved(key: &str) -> bool {
    matches!(key, OPTIONS_BLOB_KEY | ADDITIONAL_PRICE_KEY | PROCESSED_KEY)
}

/// A custom property on a line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItemProperty {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: String,
}

impl LineItemProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Everything a cart line carries for its options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineProperties {
    /// Customer-visible properties, in option order.
    pub properties: Vec<LineItemProperty>,
    /// Summed surcharge of the visible, answered options.
    pub additional_price: Money,
}

impl LineProperties {
    /// Build the properties for `selections`.
    ///
    /// Hidden options and unanswered fields are left out; values are
    /// normalized the way the browser runtime normalizes them (digits
    /// stripped from text, numbers clamped, unknown labels dropped).
    pub fn build(
        resolver: &VisibilityResolver<'_>,
        selections: &Selections,
        bounds: &NumberBounds,
        currency: Currency,
    ) -> Result<Self, OptionsError> {
        let options = resolver.options();
        let state = RadioState::from_selections(options, selections);

        let properties = options
            .iter()
            .filter(|o| resolver.is_visible(&o.id, &state))
            .filter_map(|o| {
                let raw = match selections.get(&o.name) {
                    Some(raw) => raw,
                    None if o.is_radio() => state.selected(&o.id)?,
                    None => return None,
                };
                let value = normalize(o, raw, bounds)?;
                Some(LineItemProperty::new(o.name.clone(), value))
            })
            .collect();

        let additional_price = surcharge::compute(resolver, selections, bounds, currency)?.total;

        Ok(Self {
            properties,
            additional_price,
        })
    }

    /// The `_options` blob.
    pub fn blob(&self) -> String {
        let map: serde_json::Map<String, serde_json::Value> = self
            .properties
            .iter()
            .map(|p| (p.name.clone(), serde_json::Value::String(p.value.clone())))
            .collect();
        serde_json::Value::Object(map).to_string()
    }

    /// Full attribute list for the cart line, reserved keys last.
    ///
    /// The additional-price signal is only attached when positive.
    pub fn attributes(&self) -> Vec<LineItemProperty> {
        let mut attributes = self.properties.clone();
        attributes.push(LineItemProperty::new(OPTIONS_BLOB_KEY, self.blob()));
        if self.additional_price.is_positive() {
            attributes.push(LineItemProperty::new(
                ADDITIONAL_PRICE_KEY,
                self.additional_price.display_amount(),
            ));
        }
        attributes
    }
}

fn normalize(option: &ProductOption, raw: &str, bounds: &NumberBounds) -> Option<String> {
    match &option.kind {
        OptionKind::Text { .. } => {
            let text = sanitize_text(raw);
            is_answered(&text).then(|| text.trim().to_string())
        }
        OptionKind::Number { .. } => bounds.read(raw).value().map(|v| v.to_string()),
        OptionKind::Dropdown { .. }
        | OptionKind::DropdownThumbnail { .. }
        | OptionKind::Radio { .. } => option.find_value(raw).map(|v| v.label.clone()),
    }
}

/// Parse an `_options` blob leniently, keeping the blob's key order.
///
/// Missing or malformed blobs, and non-object documents, yield nothing.
/// Strings are kept as-is, null becomes an empty value, and every other value
/// is carried as its JSON text.
pub fn parse_blob(raw: Option<&str>) -> Vec<(String, String)> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(raw) else {
        return Vec::new();
    };
    map.into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionValue;
    use options_observability::StructuredLogger;

    fn options() -> Vec<ProductOption> {
        vec![
            ProductOption::new(
                "personalize",
                "Personalize",
                OptionKind::Radio {
                    values: vec![OptionValue::new("n", "No"), OptionValue::new("y", "Yes")],
                },
            ),
            ProductOption::new("engraving", "Engraving", OptionKind::Text { price: Some(5.5) })
                .shown_when("personalize", "Yes"),
            ProductOption::new("count", "Count", OptionKind::Number { price: None }),
        ]
    }

    fn build(selections: &Selections) -> LineProperties {
        let options = options();
        let resolver = VisibilityResolver::new(&options, &StructuredLogger::quiet());
        LineProperties::build(&resolver, selections, &NumberBounds::default(), Currency::USD)
            .unwrap()
    }

    #[test]
    fn test_visible_answers_with_signal() {
        let props = build(
            &Selections::new()
                .select("Personalize", "Yes")
                .select("Engraving", "Anna 1")
                .select("Count", "150"),
        );

        assert_eq!(
            props.properties,
            vec![
                LineItemProperty::new("Personalize", "Yes"),
                LineItemProperty::new("Engraving", "Anna"),
                LineItemProperty::new("Count", "99"),
            ]
        );
        assert_eq!(props.additional_price, Money::new(550, Currency::USD));

        let attributes = props.attributes();
        let signal = attributes.iter().find(|a| a.name == ADDITIONAL_PRICE_KEY).unwrap();
        assert_eq!(signal.value, "5.50");
    }

    #[test]
    fn test_hidden_option_is_dropped() {
        let props = build(&Selections::new().select("Engraving", "Anna"));
        assert_eq!(
            props.properties,
            vec![LineItemProperty::new("Personalize", "No")]
        );
        assert!(props
            .attributes()
            .iter()
            .all(|a| a.name != ADDITIONAL_PRICE_KEY));
    }

    #[test]
    fn test_blob_round_trips_through_parse() {
        let props = build(&Selections::new().select("Count", "3"));
        assert_eq!(
            parse_blob(Some(&props.blob())),
            vec![
                ("Personalize".to_string(), "No".to_string()),
                ("Count".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_blob_is_lenient() {
        assert!(parse_blob(None).is_empty());
        assert!(parse_blob(Some("{broken")).is_empty());
        assert!(parse_blob(Some("[1, 2]")).is_empty());
    }

    #[test]
    fn test_parse_blob_keeps_order_and_every_value() {
        let parsed = parse_blob(Some(
            r#"{"Zeta": "z", "Alpha": "a", "Sizes": ["S", "M"], "Note": null, "n": 2, "b": true, "o": {"k": 1}}"#,
        ));
        let expected = [
            ("Zeta", "z"),
            ("Alpha", "a"),
            ("Sizes", r#"["S","M"]"#),
            ("Note", ""),
            ("n", "2"),
            ("b", "true"),
            ("o", r#"{"k":1}"#),
        ];
        let parsed: Vec<(&str, &str)> = parsed
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_reserved_keys() {
        assert!(is_reserved("_additional_price"));
        assert!(is_reserved("_options_processed"));
        assert!(!is_reserved("Engraving"));
    }
}
