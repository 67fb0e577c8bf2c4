//! Delivery dispatch.
//!
//! Takes a routed provider order and a normalized payload and makes exactly
//! one delivery attempt against the first provider. Every provider-side
//! fault, including a timeout, comes back as a failure result; this module
//! never propagates an error up.

use std::time::Duration;

use courier_common::types::{ProviderId, QueueItem};
use courier_messages::{Message, Payload};
use courier_providers::{EmailProvider, ProviderSet, SendOutcome};

/// Uniform result of one delivery attempt.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub success: bool,
    pub provider_message_id: Option<String>,
    pub error: Option<String>,
}

impl DispatchResult {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            provider_message_id: None,
            error: Some(error.into()),
        }
    }

    fn from_outcome(outcome: SendOutcome) -> Self {
        if outcome.success {
            Self {
                success: true,
                provider_message_id: outcome.id,
                error: None,
            }
        } else {
            Self::failure(
                outcome
                    .error
                    .unwrap_or_else(|| "provider reported failure".to_string()),
            )
        }
    }
}

/// Attempt delivery via the first provider in `order`.
///
/// Routing already encodes preference; a failed attempt is handed back to
/// the retry scheduler rather than probed against the next provider within
/// the same attempt.
pub async fn dispatch(
    set: &ProviderSet,
    order: &[ProviderId],
    item: &QueueItem,
    payload: &Payload,
    timeout: Duration,
) -> DispatchResult {
    let Some(&chosen) = order.first() else {
        return DispatchResult::failure(format!(
            "no configured provider available for kind {}",
            item.kind()
        ));
    };
    let Some(provider) = set.get(chosen) else {
        return DispatchResult::failure(format!("routed provider {chosen} is not registered"));
    };

    match tokio::time::timeout(timeout, send_via(provider, item, payload)).await {
        Ok(outcome) => DispatchResult::from_outcome(outcome),
        Err(_) => DispatchResult::failure(format!(
            "{chosen} call timed out after {}s",
            timeout.as_secs()
        )),
    }
}

/// Pick the provider operation matching the payload: the kind's typed send
/// when the provider has one, the generic send with the item's pre-rendered
/// content otherwise.
async fn send_via(provider: &dyn EmailProvider, item: &QueueItem, payload: &Payload) -> SendOutcome {
    let to = item.recipient.as_str();

    match payload {
        Payload::Typed(message) if provider.supports(message.kind()) => match message {
            Message::BookingConfirmation(msg) => provider.send_booking_confirmation(to, msg).await,
            Message::BookingReminder(msg) => provider.send_booking_reminder(to, msg).await,
            Message::EventReminder(msg) => provider.send_event_reminder(to, msg).await,
            Message::PaymentReceipt(msg) => provider.send_payment_receipt(to, msg).await,
            Message::PaymentFailed(msg) => provider.send_payment_failed(to, msg).await,
            Message::PartnerApproval(msg) => provider.send_partner_approval(to, msg).await,
            Message::PartnerRejection(msg) => provider.send_partner_rejection(to, msg).await,
            Message::AdminAlert(msg) => provider.send_admin_alert(to, msg).await,
            Message::Verification(msg) => provider.send_verification(to, msg).await,
        },
        _ => {
            provider
                .send(to, &item.subject, &item.body_html, item.body_text.as_deref())
                .await
        }
    }
}
