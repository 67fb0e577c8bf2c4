//! System messages: operator alerts and account verification codes.

use serde_json::Value;

use courier_common::types::NotificationKind;

use crate::NormalizeError;
use crate::fields::{local_part, number_or, text, text_or};

/// Sent to the operations inbox when something needs human attention.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminAlert {
    pub title: String,
    pub detail: String,
    pub reference_url: Option<String>,
}

/// Sent to verify ownership of an email address. The one-time code is the
/// whole point of the message, so its absence is a normalization error
/// rather than an empty-code email.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub customer_name: String,
    pub code: String,
    pub expires_minutes: u32,
}

pub fn admin_alert(meta: &Value) -> AdminAlert {
    AdminAlert {
        title: text_or(meta, "title", "System alert"),
        detail: text_or(meta, "detail", ""),
        reference_url: text(meta, "referenceUrl"),
    }
}

pub fn verification(recipient: &str, meta: &Value) -> Result<Verification, NormalizeError> {
    let code = text(meta, "code").ok_or(NormalizeError::MissingField {
        kind: NotificationKind::Verification,
        field: "code",
    })?;

    Ok(Verification {
        customer_name: text(meta, "customerName").unwrap_or_else(|| local_part(recipient)),
        code,
        expires_minutes: number_or(meta, "expiresMinutes", 10.0) as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_alert_defaults() {
        let msg = admin_alert(&json!({}));
        assert_eq!(msg.title, "System alert");
        assert_eq!(msg.detail, "");
    }

    #[test]
    fn test_verification_requires_code() {
        let err = verification("jane@example.com", &json!({})).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::MissingField {
                kind: NotificationKind::Verification,
                field: "code",
            }
        );
    }

    #[test]
    fn test_verification_numeric_code_rendered() {
        let msg = verification("jane@example.com", &json!({"code": 482913})).unwrap();
        assert_eq!(msg.code, "482913");
        assert_eq!(msg.customer_name, "jane");
        assert_eq!(msg.expires_minutes, 10);
    }

    #[test]
    fn test_verification_custom_expiry() {
        let msg = verification(
            "jane@example.com",
            &json!({"code": "482913", "expiresMinutes": "30"}),
        )
        .unwrap();
        assert_eq!(msg.expires_minutes, 30);
    }
}
