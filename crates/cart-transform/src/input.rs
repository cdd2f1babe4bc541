//! Cart snapshot handed to the transform by the checkout engine.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Transform input document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default)]
    pub cart: Cart,
}

/// The cart lines.
///
/// Lines are decoded one at a time. A line that does not fit the contract is
/// kept aside in `rejected` so the rest of the cart is still processed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCart")]
pub struct Cart {
    pub lines: Vec<CartLine>,
    #[serde(skip)]
    pub rejected: Vec<RejectedLine>,
}

/// A line that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    /// Position in the input line list.
    pub index: usize,
    /// The line id, when one could be read.
    pub id: Option<String>,
    pub error: String,
}

#[derive(Deserialize)]
struct RawCart {
    #[serde(default)]
    lines: Vec<Value>,
}

impl From<RawCart> for Cart {
    fn from(raw: RawCart) -> Self {
        let mut cart = Cart::default();
        for (index, value) in raw.lines.into_iter().enumerate() {
            let id = value.get("id").and_then(Value::as_str).map(str::to_string);
            match serde_json::from_value::<CartLine>(value) {
                Ok(line) => cart.lines.push(line),
                Err(e) => cart.rejected.push(RejectedLine {
                    index,
                    id,
                    error: e.to_string(),
                }),
            }
        }
        cart
    }
}

/// One cart line with the attributes the input query asks for.
///
/// The query aliases the reserved line attributes, so each arrives as its
/// own optional field rather than inside a generic list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub merchandise: Merchandise,
    pub cost: CartLineCost,
    /// `_options` blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Attribute>,
    /// `_additional_price` signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_price: Option<Attribute>,
    /// `_options_processed` marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed: Option<Attribute>,
}

fn default_quantity() -> i64 {
    1
}

impl CartLine {
    pub fn options_blob(&self) -> Option<&str> {
        self.options.as_ref().and_then(Attribute::as_str)
    }

    pub fn additional_price(&self) -> Option<&str> {
        self.additional_price.as_ref().and_then(Attribute::as_str)
    }

    /// Whether the processed-marker is present with a non-empty value.
    pub fn is_processed(&self) -> bool {
        self.processed
            .as_ref()
            .and_then(Attribute::as_str)
            .is_some_and(|v| !v.trim().is_empty())
    }
}

/// A line attribute; `value` is null when the attribute is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "attribute_value")]
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchandise {
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    /// Variant id; custom products have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCost {
    pub amount_per_quantity: MoneyV2,
}

/// Decimal amount as sent by the checkout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    #[serde(deserialize_with = "decimal_string")]
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

/// Amounts are decimal strings, but plain JSON numbers are accepted too.
fn decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Attribute values are strings, but numbers and booleans are read as their
/// text. Anything else counts as absent.
fn attribute_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}
