//! Lenient price parsing for option documents.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a price that may be a JSON number or a numeric string.
///
/// Anything unparsable, non-finite or not strictly positive becomes `None`.
pub(crate) fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(price_from_value))
}

fn price_from_value(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (price.is_finite() && price > 0.0).then_some(price)
}
