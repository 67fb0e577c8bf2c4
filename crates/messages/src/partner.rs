//! Partner onboarding messages: the outcome of a gym's application review.

use serde_json::Value;

use crate::fields::{local_part, text, text_or};

/// Sent when a partner application is approved.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerApproval {
    pub partner_name: String,
    pub gym_name: String,
    pub dashboard_url: Option<String>,
}

/// Sent when a partner application is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerRejection {
    pub partner_name: String,
    pub gym_name: String,
    pub reason: Option<String>,
}

pub fn approval(recipient: &str, meta: &Value) -> PartnerApproval {
    PartnerApproval {
        partner_name: text(meta, "partnerName").unwrap_or_else(|| local_part(recipient)),
        gym_name: text_or(meta, "gymName", ""),
        dashboard_url: text(meta, "dashboardUrl"),
    }
}

pub fn rejection(recipient: &str, meta: &Value) -> PartnerRejection {
    PartnerRejection {
        partner_name: text(meta, "partnerName").unwrap_or_else(|| local_part(recipient)),
        gym_name: text_or(meta, "gymName", ""),
        reason: text(meta, "reason"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_approval_defaults() {
        let msg = approval("owner@irontemple.com", &json!({"gymName": "Iron Temple"}));
        assert_eq!(msg.partner_name, "owner");
        assert_eq!(msg.gym_name, "Iron Temple");
        assert_eq!(msg.dashboard_url, None);
    }

    #[test]
    fn test_rejection_carries_reason() {
        let meta = json!({
            "partnerName": "Sam",
            "gymName": "Iron Temple",
            "reason": "Incomplete insurance documentation"
        });
        let msg = rejection("owner@irontemple.com", &meta);
        assert_eq!(
            msg.reason.as_deref(),
            Some("Incomplete insurance documentation")
        );
    }
}
