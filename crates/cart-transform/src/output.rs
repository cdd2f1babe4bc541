//! Operations returned to the checkout engine.

use serde::{Deserialize, Serialize};

/// Transform output document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResult {
    pub operations: Vec<CartOperation>,
}

impl FunctionResult {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The expand operation targeting `line_id`, if any.
    pub fn expand_for(&self, line_id: &str) -> Option<&ExpandOperation> {
        self.operations
            .iter()
            .map(|op| match op {
                CartOperation::Expand(expand) => expand,
            })
            .find(|expand| expand.cart_line_id == line_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CartOperation {
    /// Replace a line by its expanded items.
    Expand(ExpandOperation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandOperation {
    pub cart_line_id: String,
    pub expanded_cart_items: Vec<ExpandedItem>,
}

/// One replacement item. `quantity` is per unit of the parent line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedItem {
    pub merchandise_id: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<ExpandedItemPrice>,
    #[serde(default)]
    pub attributes: Vec<AttributeOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedItemPrice {
    pub adjustment: PriceAdjustment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAdjustment {
    pub fixed_price_per_unit: FixedPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedPrice {
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOutput {
    pub key: String,
    pub value: String,
}

impl AttributeOutput {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_result_shape() {
        let json = serde_json::to_value(FunctionResult::default()).unwrap();
        assert_eq!(json, json!({"operations": []}));
    }

    #[test]
    fn test_expand_shape() {
        let result = FunctionResult {
            operations: vec![CartOperation::Expand(ExpandOperation {
                cart_line_id: "line-1".to_string(),
                expanded_cart_items: vec![ExpandedItem {
                    merchandise_id: "variant-1".to_string(),
                    quantity: 1,
                    price: Some(ExpandedItemPrice {
                        adjustment: PriceAdjustment {
                            fixed_price_per_unit: FixedPrice {
                                amount: "25.50".to_string(),
                            },
                        },
                    }),
                    attributes: vec![AttributeOutput::new("Engraving", "Anna")],
                }],
            })],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json["operations"][0]["expand"]["expandedCartItems"][0]["price"]["adjustment"]
                ["fixedPricePerUnit"]["amount"],
            "25.50"
        );
        assert_eq!(json["operations"][0]["expand"]["cartLineId"], "line-1");
        assert!(result.expand_for("line-1").is_some());
        assert!(result.expand_for("line-2").is_none());
    }
}
