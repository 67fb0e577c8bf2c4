//! Payload normalization.
//!
//! Producers enqueue notifications with an untyped `metadata` bag whose shape
//! varies by kind. This crate is the single place that touches the raw bag:
//! it extracts the fields each kind needs, applies defaults and numeric
//! coercions, and hands the rest of the pipeline a typed [`Message`].
//! Generic and unrecognized kinds bypass normalization entirely and carry the
//! item's pre-rendered subject/body verbatim.

pub mod booking;
pub mod partner;
pub mod payment;
pub mod system;

mod fields;

use courier_common::types::{NotificationKind, QueueItem};
use thiserror::Error;

pub use booking::{BookingConfirmation, BookingReminder, EventReminder};
pub use partner::{PartnerApproval, PartnerRejection};
pub use payment::{LineItem, PaymentFailed, PaymentReceipt};
pub use system::{AdminAlert, Verification};

/// A field the message cannot be rendered without. Returned, never panicked,
/// so the caller can route it into the standard failure path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("missing required field `{field}` for {kind} message")]
    MissingField {
        kind: NotificationKind,
        field: &'static str,
    },
}

/// A fully normalized, kind-specific message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    BookingConfirmation(BookingConfirmation),
    BookingReminder(BookingReminder),
    EventReminder(EventReminder),
    PaymentReceipt(PaymentReceipt),
    PaymentFailed(PaymentFailed),
    PartnerApproval(PartnerApproval),
    PartnerRejection(PartnerRejection),
    AdminAlert(AdminAlert),
    Verification(Verification),
}

impl Message {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Message::BookingConfirmation(_) => NotificationKind::BookingConfirmation,
            Message::BookingReminder(_) => NotificationKind::BookingReminder,
            Message::EventReminder(_) => NotificationKind::EventReminder,
            Message::PaymentReceipt(_) => NotificationKind::PaymentReceipt,
            Message::PaymentFailed(_) => NotificationKind::PaymentFailed,
            Message::PartnerApproval(_) => NotificationKind::PartnerApproval,
            Message::PartnerRejection(_) => NotificationKind::PartnerRejection,
            Message::AdminAlert(_) => NotificationKind::AdminAlert,
            Message::Verification(_) => NotificationKind::Verification,
        }
    }
}

/// What the dispatcher delivers: a typed message, or the item's pre-rendered
/// content for kinds with no typed contract.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Typed(Message),
    Raw {
        subject: String,
        html: String,
        text: Option<String>,
    },
}

/// Normalize a queue item's metadata into a deliverable payload.
pub fn normalize(item: &QueueItem) -> Result<Payload, NormalizeError> {
    let meta = &item.metadata;
    let message = match item.kind() {
        NotificationKind::BookingConfirmation => {
            Message::BookingConfirmation(booking::confirmation(&item.recipient, meta))
        }
        NotificationKind::BookingReminder => {
            Message::BookingReminder(booking::reminder(&item.recipient, meta))
        }
        NotificationKind::EventReminder => {
            Message::EventReminder(booking::event_reminder(&item.recipient, meta))
        }
        NotificationKind::PaymentReceipt => {
            Message::PaymentReceipt(payment::receipt(&item.recipient, meta))
        }
        NotificationKind::PaymentFailed => {
            Message::PaymentFailed(payment::failed(&item.recipient, meta))
        }
        NotificationKind::PartnerApproval => {
            Message::PartnerApproval(partner::approval(&item.recipient, meta))
        }
        NotificationKind::PartnerRejection => {
            Message::PartnerRejection(partner::rejection(&item.recipient, meta))
        }
        NotificationKind::AdminAlert => Message::AdminAlert(system::admin_alert(meta)),
        NotificationKind::Verification => {
            Message::Verification(system::verification(&item.recipient, meta)?)
        }
        NotificationKind::Generic => {
            return Ok(Payload::Raw {
                subject: item.subject.clone(),
                html: item.body_html.clone(),
                text: item.body_text.clone(),
            });
        }
    };

    tracing::debug!(kind = %message.kind(), item_id = %item.id, "Normalized payload");
    Ok(Payload::Typed(message))
}
