//! Surcharge calculation for a customer's selections.
//!
//! Price models per option type:
//! - text / number: the flat price once the field holds an answer
//! - dropdown: the flat price once any declared value is selected
//! - dropdown_thumbnail: the selected value's own price
//! - radio: never priced
//!
//! Hidden options contribute nothing; their fields are disabled and never
//! submitted.

use serde::Serialize;

use crate::error::OptionsError;
use crate::ids::OptionId;
use crate::money::{Currency, Money};
use crate::option::{OptionKind, ProductOption};
use crate::rules::{is_answered, sanitize_text, NumberBounds};
use crate::selection::Selections;
use crate::visibility::{RadioState, VisibilityResolver};

/// One priced option in a surcharge breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurchargeItem {
    pub option_id: OptionId,
    pub name: String,
    pub amount: Money,
}

/// Total surcharge with its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surcharge {
    pub items: Vec<SurchargeItem>,
    pub total: Money,
}

impl Surcharge {
    pub fn is_zero(&self) -> bool {
        self.total.is_zero()
    }
}

/// The surcharge a single option adds for the raw form value `raw`.
pub fn option_surcharge(
    option: &ProductOption,
    raw: Option<&str>,
    bounds: &NumberBounds,
    currency: Currency,
) -> Option<Money> {
    let raw = raw?;
    match &option.kind {
        OptionKind::Text { .. } => {
            if is_answered(&sanitize_text(raw)) {
                option.flat_surcharge(currency)
            } else {
                None
            }
        }
        OptionKind::Number { .. } => bounds
            .read(raw)
            .value()
            .and_then(|_| option.flat_surcharge(currency)),
        OptionKind::Dropdown { .. } => option
            .find_value(raw)
            .and_then(|_| option.flat_surcharge(currency)),
        OptionKind::DropdownThumbnail { .. } => option
            .find_value(raw)
            .and_then(|value| value.surcharge(currency)),
        OptionKind::Radio { .. } => None,
    }
}

/// Sum the surcharges of every visible option.
pub fn compute(
    resolver: &VisibilityResolver<'_>,
    selections: &Selections,
    bounds: &NumberBounds,
    currency: Currency,
) -> Result<Surcharge, OptionsError> {
    let options = resolver.options();
    let state = RadioState::from_selections(options, selections);

    let items: Vec<SurchargeItem> = options
        .iter()
        .filter(|o| resolver.is_visible(&o.id, &state))
        .filter_map(|o| {
            let amount = option_surcharge(o, selections.get(&o.name), bounds, currency)?;
            Some(SurchargeItem {
                option_id: o.id.clone(),
                name: o.name.clone(),
                amount,
            })
        })
        .collect();

    let total = Money::try_sum(items.iter().map(|i| &i.amount), currency)
        .ok_or(OptionsError::Overflow)?;

    Ok(Surcharge { items, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionValue;
    use options_observability::StructuredLogger;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

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
            ProductOption::new("count", "Count", OptionKind::Number { price: Some(1.0) }),
            ProductOption::new(
                "wrap",
                "Wrap",
                OptionKind::Dropdown {
                    values: vec![OptionValue::new("r", "Red"), OptionValue::new("b", "Blue")],
                    price: Some(2.0),
                },
            ),
            ProductOption::new(
                "finish",
                "Finish",
                OptionKind::DropdownThumbnail {
                    values: vec![
                        OptionValue::new("m", "Matte").with_price(3.0),
                        OptionValue::new("g", "Gloss").with_price(4.25),
                        OptionValue::new("p", "Plain"),
                    ],
                },
            ),
        ]
    }

    fn total(selections: &Selections) -> Money {
        let options = options();
        let resolver = VisibilityResolver::new(&options, &StructuredLogger::quiet());
        compute(&resolver, selections, &NumberBounds::default(), Currency::USD)
            .unwrap()
            .total
    }

    #[test]
    fn test_nothing_selected() {
        assert_eq!(total(&Selections::new()), usd(0));
    }

    #[test]
    fn test_hidden_text_is_not_priced() {
        let selections = Selections::new().select("Engraving", "Anna");
        assert_eq!(total(&selections), usd(0));

        let selections = selections.select("Personalize", "Yes");
        assert_eq!(total(&selections), usd(550));
    }

    #[test]
    fn test_text_needs_non_digit_content() {
        let selections = Selections::new()
            .select("Personalize", "Yes")
            .select("Engraving", "  2024 ");
        assert_eq!(total(&selections), usd(0));
    }

    #[test]
    fn test_number_priced_once_entered() {
        assert_eq!(total(&Selections::new().select("Count", "150")), usd(100));
        assert_eq!(total(&Selections::new().select("Count", "")), usd(0));
        assert_eq!(total(&Selections::new().select("Count", "many")), usd(0));
    }

    #[test]
    fn test_dropdown_flat_price_regardless_of_value() {
        assert_eq!(total(&Selections::new().select("Wrap", "Red")), usd(200));
        assert_eq!(total(&Selections::new().select("Wrap", "Blue")), usd(200));
        assert_eq!(total(&Selections::new().select("Wrap", "Green")), usd(0));
    }

    #[test]
    fn test_thumbnail_uses_selected_value_price() {
        assert_eq!(total(&Selections::new().select("Finish", "Matte")), usd(300));
        // Changing the selection replaces the surcharge.
        assert_eq!(total(&Selections::new().select("Finish", "Gloss")), usd(425));
        assert_eq!(total(&Selections::new().select("Finish", "Plain")), usd(0));
    }

    #[test]
    fn test_breakdown() {
        let options = options();
        let resolver = VisibilityResolver::new(&options, &StructuredLogger::quiet());
        let selections = Selections::new()
            .select("Personalize", "Yes")
            .select("Engraving", "Jo")
            .select("Wrap", "Red")
            .select("Finish", "Gloss");
        let surcharge =
            compute(&resolver, &selections, &NumberBounds::default(), Currency::USD).unwrap();

        let names: Vec<&str> = surcharge.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Engraving", "Wrap", "Finish"]);
        assert_eq!(surcharge.total, usd(550 + 200 + 425));
    }
}
