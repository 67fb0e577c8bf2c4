use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categories of transactional notifications the queue can carry.
///
/// Each kind determines the shape of the metadata bag and which typed
/// provider send function handles delivery. `Generic` carries pre-rendered
/// content only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BookingConfirmation,
    BookingReminder,
    EventReminder,
    PaymentReceipt,
    PaymentFailed,
    PartnerApproval,
    PartnerRejection,
    AdminAlert,
    Verification,
    Generic,
}

impl NotificationKind {
    /// All kinds with a typed payload contract (everything except `Generic`).
    pub const TYPED: &[NotificationKind] = &[
        NotificationKind::BookingConfirmation,
        NotificationKind::BookingReminder,
        NotificationKind::EventReminder,
        NotificationKind::PaymentReceipt,
        NotificationKind::PaymentFailed,
        NotificationKind::PartnerApproval,
        NotificationKind::PartnerRejection,
        NotificationKind::AdminAlert,
        NotificationKind::Verification,
    ];
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::BookingConfirmation => write!(f, "booking_confirmation"),
            NotificationKind::BookingReminder => write!(f, "booking_reminder"),
            NotificationKind::EventReminder => write!(f, "event_reminder"),
            NotificationKind::PaymentReceipt => write!(f, "payment_receipt"),
            NotificationKind::PaymentFailed => write!(f, "payment_failed"),
            NotificationKind::PartnerApproval => write!(f, "partner_approval"),
            NotificationKind::PartnerRejection => write!(f, "partner_rejection"),
            NotificationKind::AdminAlert => write!(f, "admin_alert"),
            NotificationKind::Verification => write!(f, "verification"),
            NotificationKind::Generic => write!(f, "generic"),
        }
    }
}

impl FromStr for NotificationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking_confirmation" => Ok(NotificationKind::BookingConfirmation),
            "booking_reminder" => Ok(NotificationKind::BookingReminder),
            "event_reminder" => Ok(NotificationKind::EventReminder),
            "payment_receipt" => Ok(NotificationKind::PaymentReceipt),
            "payment_failed" => Ok(NotificationKind::PaymentFailed),
            "partner_approval" => Ok(NotificationKind::PartnerApproval),
            "partner_rejection" => Ok(NotificationKind::PartnerRejection),
            "admin_alert" => Ok(NotificationKind::AdminAlert),
            "verification" => Ok(NotificationKind::Verification),
            "generic" => Ok(NotificationKind::Generic),
            _ => Err(()),
        }
    }
}

/// Delivery provider identifiers, in global preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Resend,
    Postmark,
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderId::Resend => write!(f, "resend"),
            ProviderId::Postmark => write!(f, "postmark"),
        }
    }
}

impl FromStr for ProviderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resend" => Ok(ProviderId::Resend),
            "postmark" => Ok(ProviderId::Postmark),
            _ => Err(()),
        }
    }
}

/// Lifecycle status of a queue item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Pending,
    Processing,
    Sent,
    Failed,
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueStatus::Pending => write!(f, "pending"),
            QueueStatus::Processing => write!(f, "processing"),
            QueueStatus::Sent => write!(f, "sent"),
            QueueStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One notification awaiting (or having undergone) a delivery attempt.
///
/// `kind` and `preferred_provider` are stored as raw text: producers outside
/// this subsystem write them, and an unrecognized kind must degrade to the
/// generic delivery path rather than fail the whole batch fetch with a
/// decode error. The typed accessors below are the only readers of the raw
/// strings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QueueItem {
    pub id: Uuid,
    pub recipient: String,
    pub kind: String,
    pub subject: String,
    pub body_html: String,
    pub body_text: Option<String>,
    pub metadata: serde_json::Value,
    pub preferred_provider: Option<String>,
    pub status: QueueStatus,
    pub retry_count: i32,
    pub max_retries: i32,
    pub next_retry_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub provider_message_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QueueItem {
    /// Parsed kind; unknown tags fall back to `Generic` so the pre-rendered
    /// subject/body are used verbatim.
    pub fn kind(&self) -> NotificationKind {
        self.kind.parse().unwrap_or(NotificationKind::Generic)
    }

    /// Parsed provider hint; an unknown provider name is no hint at all.
    pub fn preferred_provider(&self) -> Option<ProviderId> {
        self.preferred_provider
            .as_deref()
            .and_then(|p| p.parse().ok())
    }

    /// Whether the item has used up its retry budget.
    pub fn retries_exhausted(&self) -> bool {
        self.retry_count >= self.max_retries
    }
}

/// Queue depth broken down by status, served by `GET /stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueStats {
    pub pending: i64,
    pub processing: i64,
    pub sent: i64,
    pub failed: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in NotificationKind::TYPED {
            let parsed: NotificationKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
        let generic: NotificationKind = "generic".parse().unwrap();
        assert_eq!(generic, NotificationKind::Generic);
    }

    #[test]
    fn test_unknown_kind_degrades_to_generic() {
        let item = QueueItem {
            id: Uuid::new_v4(),
            recipient: "user@example.com".to_string(),
            kind: "loyalty_points_expiring".to_string(),
            subject: "Subject".to_string(),
            body_html: "<p>Body</p>".to_string(),
            body_text: None,
            metadata: serde_json::json!({}),
            preferred_provider: Some("smtp2go".to_string()),
            status: QueueStatus::Pending,
            retry_count: 0,
            max_retries: 3,
            next_retry_at: None,
            last_error: None,
            provider_message_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(item.kind(), NotificationKind::Generic);
        assert_eq!(item.preferred_provider(), None);
    }

    #[test]
    fn test_provider_id_parse() {
        assert_eq!("resend".parse::<ProviderId>().unwrap(), ProviderId::Resend);
        assert_eq!(
            "postmark".parse::<ProviderId>().unwrap(),
            ProviderId::Postmark
        );
        assert!("sendgrid".parse::<ProviderId>().is_err());
    }
}
