//! Per-line classification and the price rewrite.
//!
//! Every line ends up in one of three states:
//!
//! - **Unprocessed**: positive signal, no marker. The line is expanded into a
//!   single item priced `base + signal` and tagged with the marker.
//! - **Processed**: the marker is present. Nothing to do.
//! - **NoSignal**: no usable signal, or a line the input could not decode.
//!   Nothing to do.
//!
//! Problems with one line never affect the others and never fail the run.

use options_core::properties::{is_reserved, parse_blob, PROCESSED_KEY};
use options_core::{Currency, Money};
use options_observability::StructuredLogger;

use crate::input::{CartLine, Input};
use crate::output::{
    AttributeOutput, CartOperation, ExpandOperation, ExpandedItem, ExpandedItemPrice, FixedPrice,
    FunctionResult, PriceAdjustment,
};

/// Value written to the processed-marker.
pub const PROCESSED_VALUE: &str = "true";

/// Why a line carries no usable signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSignalReason {
    Missing,
    NotNumeric,
    NotPositive,
    InvalidBasePrice,
    NoMerchandise,
    Overflow,
    Malformed,
}

impl NoSignalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoSignalReason::Missing => "missing",
            NoSignalReason::NotNumeric => "not_numeric",
            NoSignalReason::NotPositive => "not_positive",
            NoSignalReason::InvalidBasePrice => "invalid_base_price",
            NoSignalReason::NoMerchandise => "no_merchandise",
            NoSignalReason::Overflow => "overflow",
            NoSignalReason::Malformed => "malformed",
        }
    }
}

/// Outcome of classifying one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineDecision {
    Unprocessed {
        merchandise_id: String,
        price: Money,
        attributes: Vec<AttributeOutput>,
    },
    Processed,
    NoSignal(NoSignalReason),
}

/// Currency of a line; unknown codes fall back to the default currency.
fn line_currency(line: &CartLine) -> Currency {
    line.cost
        .amount_per_quantity
        .currency_code
        .as_deref()
        .and_then(Currency::from_code)
        .unwrap_or_default()
}

/// Decide what to do with one line.
pub fn classify(line: &CartLine) -> LineDecision {
    if line.is_processed() {
        return LineDecision::Processed;
    }

    let currency = line_currency(line);
    let Some(raw) = line.additional_price() else {
        return LineDecision::NoSignal(NoSignalReason::Missing);
    };
    let Some(signal) = Money::parse_decimal(raw, currency) else {
        return LineDecision::NoSignal(NoSignalReason::NotNumeric);
    };
    if !signal.is_positive() {
        return LineDecision::NoSignal(NoSignalReason::NotPositive);
    }

    let Some(base) = Money::parse_decimal(&line.cost.amount_per_quantity.amount, currency) else {
        return LineDecision::NoSignal(NoSignalReason::InvalidBasePrice);
    };
    let Some(merchandise_id) = line.merchandise.id.clone() else {
        return LineDecision::NoSignal(NoSignalReason::NoMerchandise);
    };
    let Some(price) = base.try_add(&signal) else {
        return LineDecision::NoSignal(NoSignalReason::Overflow);
    };

    LineDecision::Unprocessed {
        merchandise_id,
        price,
        attributes: carried_attributes(line),
    }
}

/// Customer-visible attributes from the blob, plus the marker once.
fn carried_attributes(line: &CartLine) -> Vec<AttributeOutput> {
    let mut attributes: Vec<AttributeOutput> = parse_blob(line.options_blob())
        .into_iter()
        .filter(|(key, _)| !is_reserved(key))
        .map(|(key, value)| AttributeOutput::new(key, value))
        .collect();
    attributes.push(AttributeOutput::new(PROCESSED_KEY, PROCESSED_VALUE));
    attributes
}

/// Run the transform over a cart snapshot.
pub fn run(input: &Input, logger: &StructuredLogger) -> FunctionResult {
    let mut operations = Vec::new();

    for rejected in &input.cart.rejected {
        logger
            .warn_builder("ignoring cart line")
            .field_i64("index", rejected.index as i64)
            .field("line_id", rejected.id.as_deref().unwrap_or(""))
            .field("reason", NoSignalReason::Malformed.as_str())
            .field("error", rejected.error.as_str())
            .emit();
    }

    for line in &input.cart.lines {
        match classify(line) {
            LineDecision::Unprocessed {
                merchandise_id,
                price,
                attributes,
            } => {
                logger
                    .debug_builder("adjusting line price")
                    .field("line_id", line.id.as_str())
                    .field("price", price.display_amount())
                    .emit();
                operations.push(CartOperation::Expand(ExpandOperation {
                    cart_line_id: line.id.clone(),
                    expanded_cart_items: vec![ExpandedItem {
                        merchandise_id,
                        quantity: 1,
                        price: Some(ExpandedItemPrice {
                            adjustment: PriceAdjustment {
                                fixed_price_per_unit: FixedPrice {
                                    amount: price.display_amount(),
                                },
                            },
                        }),
                        attributes,
                    }],
                }));
            }
            LineDecision::Processed => {
                logger
                    .debug_builder("line already processed")
                    .field("line_id", line.id.as_str())
                    .emit();
            }
            LineDecision::NoSignal(NoSignalReason::Missing) => {}
            LineDecision::NoSignal(reason) => {
                logger
                    .warn_builder("ignoring additional price signal")
                    .field("line_id", line.id.as_str())
                    .field("reason", reason.as_str())
                    .emit();
            }
        }
    }

    logger
        .info_builder("cart transform complete")
        .field_i64("lines", input.cart.lines.len() as i64)
        .field_i64("rejected", input.cart.rejected.len() as i64)
        .field_i64("operations", operations.len() as i64)
        .emit();

    FunctionResult { operations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Attribute, CartLineCost, Merchandise, MoneyV2};

    fn line(amount: &str, signal: Option<&str>) -> CartLine {
        CartLine {
            id: "line-1".to_string(),
            quantity: 1,
            merchandise: Merchandise {
                typename: Some("ProductVariant".to_string()),
                id: Some("variant-1".to_string()),
            },
            cost: CartLineCost {
                amount_per_quantity: MoneyV2 {
                    amount: amount.to_string(),
                    currency_code: Some("USD".to_string()),
                },
            },
            options: None,
            additional_price: signal.map(|s| Attribute::new("_additional_price", s)),
            processed: None,
        }
    }

    #[test]
    fn test_unprocessed_line() {
        match classify(&line("20.00", Some("5.50"))) {
            LineDecision::Unprocessed {
                merchandise_id,
                price,
                attributes,
            } => {
                assert_eq!(merchandise_id, "variant-1");
                assert_eq!(price.display_amount(), "25.50");
                assert_eq!(attributes, vec![AttributeOutput::new(PROCESSED_KEY, "true")]);
            }
            other => panic!("unexpected decision: {:?}", other),
        }
    }

    #[test]
    fn test_no_signal_reasons() {
        let cases = [
            (None, NoSignalReason::Missing),
            (Some("abc"), NoSignalReason::NotNumeric),
            (Some("inf"), NoSignalReason::NotNumeric),
            (Some("0"), NoSignalReason::NotPositive),
            (Some("-3.00"), NoSignalReason::NotPositive),
        ];
        for (signal, reason) in cases {
            assert_eq!(
                classify(&line("20.00", signal)),
                LineDecision::NoSignal(reason),
                "signal {:?}",
                signal
            );
        }
    }

    #[test]
    fn test_bad_base_and_missing_merchandise() {
        assert_eq!(
            classify(&line("free", Some("1.00"))),
            LineDecision::NoSignal(NoSignalReason::InvalidBasePrice)
        );

        let mut custom = line("10.00", Some("1.00"));
        custom.merchandise.id = None;
        assert_eq!(
            classify(&custom),
            LineDecision::NoSignal(NoSignalReason::NoMerchandise)
        );
    }

    #[test]
    fn test_marker_wins_over_signal() {
        let mut processed = line("25.50", Some("5.50"));
        processed.processed = Some(Attribute::new(PROCESSED_KEY, "true"));
        assert_eq!(classify(&processed), LineDecision::Processed);
    }

    #[test]
    fn test_reserved_keys_not_carried() {
        let mut l = line("10.00", Some("2.00"));
        l.options = Some(Attribute::new(
            "_options",
            r#"{"Engraving":"Anna","_additional_price":"2.00","_options_processed":"x"}"#,
        ));
        let LineDecision::Unprocessed { attributes, .. } = classify(&l) else {
            panic!("expected an adjustment");
        };
        assert_eq!(
            attributes,
            vec![
                AttributeOutput::new("Engraving", "Anna"),
                AttributeOutput::new(PROCESSED_KEY, "true"),
            ]
        );
    }

    #[test]
    fn test_zero_decimal_currency() {
        let mut l = line("1200", Some("300"));
        l.cost.amount_per_quantity.currency_code = Some("JPY".to_string());
        let LineDecision::Unprocessed { price, .. } = classify(&l) else {
            panic!("expected an adjustment");
        };
        assert_eq!(price.display_amount(), "1500");
    }
}
