//! Replays a transform result onto a cart snapshot.
//!
//! The pricing engine replaces each expanded line by its items and runs the
//! transform again on the result. `apply` produces that next snapshot so
//! repeated passes can be checked locally.

use options_core::properties::{is_reserved, PROCESSED_KEY};

use crate::input::{Attribute, CartLine, CartLineCost, Input, Merchandise, MoneyV2};
use crate::output::{ExpandedItem, FunctionResult};

/// The snapshot the next pass would see after `result` is applied.
///
/// The storefront keeps sending the additional-price signal, so replacement
/// lines inherit it from their parent.
pub fn apply(input: &Input, result: &FunctionResult) -> Input {
    let mut next = input.clone();
    next.cart.lines = input
        .cart
        .lines
        .iter()
        .flat_map(|line| match result.expand_for(&line.id) {
            Some(expand) => expand
                .expanded_cart_items
                .iter()
                .enumerate()
                .map(|(i, item)| expanded_line(line, item, i))
                .collect(),
            None => vec![line.clone()],
        })
        .collect();
    next
}

fn expanded_line(parent: &CartLine, item: &ExpandedItem, index: usize) -> CartLine {
    let amount = item
        .price
        .as_ref()
        .map(|p| p.adjustment.fixed_price_per_unit.amount.clone())
        .unwrap_or_else(|| parent.cost.amount_per_quantity.amount.clone());

    let blob: serde_json::Map<String, serde_json::Value> = item
        .attributes
        .iter()
        .filter(|a| !is_reserved(&a.key))
        .map(|a| (a.key.clone(), serde_json::Value::String(a.value.clone())))
        .collect();

    let processed = item
        .attributes
        .iter()
        .find(|a| a.key == PROCESSED_KEY)
        .map(|a| Attribute::new(PROCESSED_KEY, a.value.clone()));

    CartLine {
        id: format!("{}/{}", parent.id, index),
        quantity: parent.quantity.saturating_mul(item.quantity),
        merchandise: Merchandise {
            typename: parent.merchandise.typename.clone(),
            id: Some(item.merchandise_id.clone()),
        },
        cost: CartLineCost {
            amount_per_quantity: MoneyV2 {
                amount,
                currency_code: parent.cost.amount_per_quantity.currency_code.clone(),
            },
        },
        options: Some(Attribute::new(
            options_core::properties::OPTIONS_BLOB_KEY,
            serde_json::Value::Object(blob).to_string(),
        )),
        additional_price: parent.additional_price.clone(),
        processed,
    }
}
