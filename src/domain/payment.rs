use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Generic payment request shared by every payment method.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentDetails {
    #[serde(default)]
    pub transaction: TransactionDetails,
    #[serde(default)]
    pub customer: CustomerDetails,
    #[serde(default)]
    pub items: Vec<ItemDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionDetails {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub currency_code: Option<String>,
    /// Provider-side payment source, e.g. `knet` or `cc`.
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: String,
}

/// Line item; carried for other methods, never sent to Upayments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDetails {
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "loose_decimal"
    )]
    pub price: Option<Decimal>,
    #[serde(default = "one", deserialize_with = "loose_quantity")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

/// Order ids and phone numbers arrive as either JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Accepts `2.5`, `"2.5"` or null.
fn loose_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) if s.trim().is_empty() => return Ok(None),
        serde_json::Value::String(s) => s.trim().to_string(),
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected decimal, got {other}"
            )))
        }
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid decimal '{raw}': {e}")))
}

/// Accepts `3`, `"3"` or null (one).
fn loose_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(one()),
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|q| u32::try_from(q).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid quantity {n}"))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid quantity '{s}': {e}"))),
        other => Err(serde::de::Error::custom(format!(
            "expected quantity, got {other}"
        ))),
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

pub fn error_envelope(code: &str, message: impl Into<String>) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.into(),
            details: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_ids_and_phones() {
        let details: PaymentDetails = serde_json::from_value(serde_json::json!({
            "transaction": {"id": 42, "price": 10.5, "currency_code": "KWD"},
            "customer": {"name": "Sara", "email": "sara@example.com", "phone": 96550000000u64},
        }))
        .unwrap();
        assert_eq!(details.transaction.id, "42");
        assert_eq!(details.transaction.price, Some(Decimal::new(105, 1)));
        assert_eq!(details.customer.phone, "96550000000");
        assert!(details.items.is_empty());
    }

    #[test]
    fn every_section_is_optional() {
        let details: PaymentDetails = serde_json::from_str("{}").unwrap();
        assert!(details.transaction.id.is_empty());
        assert!(details.transaction.price.is_none());
        assert!(details.customer.name.is_empty());
    }

    #[test]
    fn item_quantity_defaults_to_one() {
        let item: ItemDetails =
            serde_json::from_value(serde_json::json!({"name": "Tea", "price": 2})).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price, Some(Decimal::new(2, 0)));
    }

    #[test]
    fn loosely_typed_items_do_not_reject_the_payment() {
        let details: PaymentDetails = serde_json::from_value(serde_json::json!({
            "transaction": {"id": "1"},
            "items": [
                {"name": "x", "price": "2.5", "quantity": "1"},
                {"name": "y"},
                {"name": "z", "price": null, "quantity": null},
            ],
        }))
        .unwrap();
        assert_eq!(details.items.len(), 3);
        assert_eq!(details.items[0].price, Some(Decimal::new(25, 1)));
        assert_eq!(details.items[0].quantity, 1);
        assert!(details.items[1].price.is_none());
        assert_eq!(details.items[1].quantity, 1);
        assert!(details.items[2].price.is_none());
        assert_eq!(details.items[2].quantity, 1);
    }

    #[test]
    fn garbage_quantity_is_still_an_error() {
        let res = serde_json::from_value::<ItemDetails>(serde_json::json!({
            "name": "x", "quantity": "many"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn rejects_structured_ids() {
        let res = serde_json::from_value::<PaymentDetails>(serde_json::json!({
            "transaction": {"id": {"nested": true}}
        }));
        assert!(res.is_err());
    }
}
