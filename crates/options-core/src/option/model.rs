//! Option and option value types.

use serde::{Deserialize, Serialize};

use super::price::lenient_price;
use crate::ids::{OptionId, OptionValueId};
use crate::money::{Currency, Money};

/// One selectable value of a multi-value option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionValue {
    /// Unique within the owning option's values.
    pub id: OptionValueId,
    /// Display text, also sent as the cart line property value.
    pub label: String,
    /// Swatch image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Per-value surcharge; only dropdown_thumbnail reads it.
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
}

impl OptionValue {
    pub fn new(id: impl Into<OptionValueId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            image: None,
            price: None,
        }
    }

    /// Set the swatch image.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Set the per-value price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// The per-value price as money.
    pub fn surcharge(&self, currency: Currency) -> Option<Money> {
        self.price
            .map(|p| Money::from_decimal(p, currency))
            .filter(Money::is_positive)
    }
}

/// The control type of an option, carrying only the fields meaningful for it.
///
/// Flat `price` lives on text, number and dropdown. Dropdown thumbnails price
/// each value instead; radios never carry a price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionKind {
    Text {
        #[serde(
            default,
            deserialize_with = "lenient_price",
            skip_serializing_if = "Option::is_none"
        )]
        price: Option<f64>,
    },
    Number {
        #[serde(
            default,
            deserialize_with = "lenient_price",
            skip_serializing_if = "Option::is_none"
        )]
        price: Option<f64>,
    },
    Dropdown {
        #[serde(default)]
        values: Vec<OptionValue>,
        #[serde(
            default,
            deserialize_with = "lenient_price",
            skip_serializing_if = "Option::is_none"
        )]
        price: Option<f64>,
    },
    DropdownThumbnail {
        #[serde(default)]
        values: Vec<OptionValue>,
    },
    Radio {
        #[serde(default)]
        values: Vec<OptionValue>,
    },
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Text { .. } => "text",
            OptionKind::Number { .. } => "number",
            OptionKind::Dropdown { .. } => "dropdown",
            OptionKind::DropdownThumbnail { .. } => "dropdown_thumbnail",
            OptionKind::Radio { .. } => "radio",
        }
    }
}

/// The radio an option's visibility depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Id of the governing radio option.
    pub on: OptionId,
    /// Label that must be selected for the dependent option to show.
    pub show_when: String,
}

/// One configurable control on a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    /// Unique within its option set.
    pub id: OptionId,
    /// Display label and storefront form field key.
    pub name: String,
    /// Enforced at render time while the control is visible.
    #[serde(default)]
    pub required: bool,
    /// Control type and type-specific fields.
    #[serde(flatten)]
    pub kind: OptionKind,
    /// Radio option this option's visibility depends on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depend_on_option_id: Option<OptionId>,
    /// Radio label that must be selected for this option to show.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_when_value: Option<String>,
}

impl ProductOption {
    /// Create an unconditional option.
    pub fn new(id: impl Into<OptionId>, name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            required: false,
            kind,
            depend_on_option_id: None,
            show_when_value: None,
        }
    }

    /// Mark the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Show this option only while `radio` has `value` selected.
    pub fn shown_when(mut self, radio: impl Into<OptionId>, value: impl Into<String>) -> Self {
        self.depend_on_option_id = Some(radio.into());
        self.show_when_value = Some(value.into());
        self
    }

    /// Type name as it appears in option documents.
    pub fn type_name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn is_radio(&self) -> bool {
        matches!(self.kind, OptionKind::Radio { .. })
    }

    /// Declared values, empty for text and number options.
    pub fn values(&self) -> &[OptionValue] {
        match &self.kind {
            OptionKind::Dropdown { values, .. }
            | OptionKind::DropdownThumbnail { values }
            | OptionKind::Radio { values } => values,
            OptionKind::Text { .. } | OptionKind::Number { .. } => &[],
        }
    }

    /// Find a declared value by its label (exact match).
    pub fn find_value(&self, label: &str) -> Option<&OptionValue> {
        self.values().iter().find(|v| v.label == label)
    }

    /// The value selected when nothing else has been chosen.
    pub fn default_value(&self) -> Option<&OptionValue> {
        self.values().first()
    }

    /// Flat surcharge for text, number and dropdown options.
    pub fn flat_surcharge(&self, currency: Currency) -> Option<Money> {
        let price = match &self.kind {
            OptionKind::Text { price }
            | OptionKind::Number { price }
            | OptionKind::Dropdown { price, .. } => *price,
            OptionKind::DropdownThumbnail { .. } | OptionKind::Radio { .. } => None,
        };
        price
            .map(|p| Money::from_decimal(p, currency))
            .filter(Money::is_positive)
    }

    /// The declared dependency, if any.
    ///
    /// An empty `dependOnOptionId` counts as no dependency. This says nothing
    /// about whether the target exists; see the visibility resolver.
    pub fn dependency(&self) -> Option<Dependency> {
        let on = self
            .depend_on_option_id
            .as_ref()
            .filter(|id| !id.as_str().trim().is_empty())?;
        Some(Dependency {
            on: on.clone(),
            show_when: self.show_when_value.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_dropdown() {
        let option: ProductOption = serde_json::from_value(json!({
            "id": "opt-1",
            "type": "dropdown",
            "name": "Gift wrap",
            "required": true,
            "price": "2.50",
            "values": [
                {"id": "v1", "label": "Red"},
                {"id": "v2", "label": "Blue", "image": "https://cdn/blue.png"}
            ]
        }))
        .unwrap();

        assert_eq!(option.type_name(), "dropdown");
        assert!(option.required);
        assert_eq!(option.values().len(), 2);
        assert_eq!(
            option.flat_surcharge(Currency::USD),
            Some(Money::new(250, Currency::USD))
        );
        assert_eq!(option.default_value().map(|v| v.label.as_str()), Some("Red"));
    }

    #[test]
    fn test_deserialize_conditional_text() {
        let option: ProductOption = serde_json::from_value(json!({
            "id": "engraving",
            "type": "text",
            "name": "Engraving",
            "price": 5,
            "dependOnOptionId": "personalize",
            "showWhenValue": "Yes"
        }))
        .unwrap();

        let dependency = option.dependency().unwrap();
        assert_eq!(dependency.on, OptionId::new("personalize"));
        assert_eq!(dependency.show_when, "Yes");
    }

    #[test]
    fn test_empty_dependency_is_none() {
        let option: ProductOption = serde_json::from_value(json!({
            "id": "a",
            "type": "number",
            "name": "Count",
            "dependOnOptionId": ""
        }))
        .unwrap();
        assert!(option.dependency().is_none());
    }

    #[test]
    fn test_thumbnail_prices_live_on_values() {
        let option: ProductOption = serde_json::from_value(json!({
            "id": "finish",
            "type": "dropdown_thumbnail",
            "name": "Finish",
            "price": 9,
            "values": [
                {"id": "m", "label": "Matte", "price": 3},
                {"id": "g", "label": "Gloss", "price": "bogus"}
            ]
        }))
        .unwrap();

        assert_eq!(option.flat_surcharge(Currency::USD), None);
        let matte = option.find_value("Matte").unwrap();
        assert_eq!(matte.surcharge(Currency::USD), Some(Money::new(300, Currency::USD)));
        assert_eq!(option.find_value("Gloss").unwrap().price, None);
    }

    #[test]
    fn test_round_trip_keeps_type_tag() {
        let option = ProductOption::new(
            "size",
            "Size",
            OptionKind::Radio {
                values: vec![OptionValue::new("s", "Small")],
            },
        );
        let value = serde_json::to_value(&option).unwrap();
        assert_eq!(value["type"], "radio");
        assert!(value.get("dependOnOptionId").is_none());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<ProductOption, _> = serde_json::from_value(json!({
            "id": "x",
            "type": "slider",
            "name": "X"
        }));
        assert!(result.is_err());
    }
}
