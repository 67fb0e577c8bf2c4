//! Payment messages: receipts with itemized lines and failure notices.

use serde_json::Value;

use crate::fields::{local_part, number_or, text, text_or};

/// One line on a payment receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: Option<u32>,
    pub amount: f64,
}

impl LineItem {
    fn from_value(v: &Value) -> Self {
        LineItem {
            description: text_or(v, "description", ""),
            quantity: quantity(v),
            amount: number_or(v, "amount", 0.0),
        }
    }
}

/// Sent after a successful charge.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub customer_name: String,
    pub transaction_number: String,
    pub amount: f64,
    pub method: String,
    pub date: String,
    pub items: Vec<LineItem>,
}

/// Sent when a charge could not be completed.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFailed {
    pub customer_name: String,
    pub amount: f64,
    pub method: Option<String>,
    pub reason: String,
    pub retry_url: Option<String>,
}

pub fn receipt(recipient: &str, meta: &Value) -> PaymentReceipt {
    PaymentReceipt {
        customer_name: text(meta, "customerName").unwrap_or_else(|| local_part(recipient)),
        transaction_number: text_or(meta, "transactionNumber", ""),
        amount: number_or(meta, "amount", 0.0),
        method: text_or(meta, "method", ""),
        date: text_or(meta, "date", ""),
        items: items(meta),
    }
}

pub fn failed(recipient: &str, meta: &Value) -> PaymentFailed {
    PaymentFailed {
        customer_name: text(meta, "customerName").unwrap_or_else(|| local_part(recipient)),
        amount: number_or(meta, "amount", 0.0),
        method: text(meta, "method"),
        reason: text_or(meta, "reason", "Payment could not be processed"),
        retry_url: text(meta, "retryUrl"),
    }
}

/// Receipt line items; a missing or malformed list is simply empty, and each
/// entry is normalized independently.
fn items(meta: &Value) -> Vec<LineItem> {
    meta.get("items")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(LineItem::from_value).collect())
        .unwrap_or_default()
}

fn quantity(v: &Value) -> Option<u32> {
    match v.get("quantity") {
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|q| q as u32)
            .or_else(|| n.as_f64().map(|q| q as u32)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_receipt_coerces_item_amounts() {
        let meta = json!({"items": [{"description": "A", "amount": "100.50"}]});
        let msg = receipt("jane@example.com", &meta);
        assert_eq!(msg.items.len(), 1);
        assert_eq!(msg.items[0].description, "A");
        assert_eq!(msg.items[0].amount, 100.50);
        assert_eq!(msg.items[0].quantity, None);
    }

    #[test]
    fn test_receipt_item_quantity_variants() {
        let meta = json!({"items": [
            {"description": "Day pass", "quantity": 3, "amount": 15},
            {"description": "Towel", "quantity": "2", "amount": "4.50"},
            {"description": "Locker", "quantity": "lots", "amount": 1}
        ]});
        let msg = receipt("jane@example.com", &meta);
        assert_eq!(msg.items[0].quantity, Some(3));
        assert_eq!(msg.items[1].quantity, Some(2));
        assert_eq!(msg.items[2].quantity, None);
    }

    #[test]
    fn test_receipt_missing_items_is_empty_list() {
        let msg = receipt("jane@example.com", &json!({"amount": 25}));
        assert!(msg.items.is_empty());
        assert_eq!(msg.amount, 25.0);
    }

    #[test]
    fn test_receipt_unusable_amount_defaults_to_zero() {
        let msg = receipt("jane@example.com", &json!({"amount": {"value": 25}}));
        assert_eq!(msg.amount, 0.0);
    }

    #[test]
    fn test_failed_default_reason() {
        let msg = failed("jane@example.com", &json!({"amount": "12.00"}));
        assert_eq!(msg.reason, "Payment could not be processed");
        assert_eq!(msg.amount, 12.0);
        assert_eq!(msg.customer_name, "jane");
    }
}
