//! Extraction helpers for the untyped metadata bag.
//!
//! Producers are web-application code; keys arrive camelCase and values are
//! whatever the form layer captured. Helpers here are lenient on purpose:
//! a number where text is expected is rendered, a numeric-looking string is
//! parsed, and anything unusable falls back to the caller's default.

use serde_json::Value;

/// String field. Numbers are rendered to text so `"bookingNumber": 1042`
/// still yields a usable value; empty strings count as absent.
pub(crate) fn text(meta: &Value, key: &str) -> Option<String> {
    match meta.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn text_or(meta: &Value, key: &str, default: &str) -> String {
    text(meta, key).unwrap_or_else(|| default.to_string())
}

/// Numeric field. Numeric-like strings (`"100.50"`) are coerced; anything
/// that cannot be parsed falls back to `default` rather than erroring.
pub(crate) fn number_or(meta: &Value, key: &str, default: f64) -> f64 {
    match meta.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}

/// Local part of an email address, the fallback display name when the
/// producer didn't supply one.
pub(crate) fn local_part(recipient: &str) -> String {
    recipient.split('@').next().unwrap_or(recipient).to_string()
}
