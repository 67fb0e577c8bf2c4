//! Delivery providers.
//!
//! Every outbound email leaves through an [`EmailProvider`]. The trait gives
//! each notification kind a typed send function with a fixed parameter
//! struct, plus the generic `send` that carries pre-rendered content. The
//! typed sends are default methods: they render the kind's template and
//! funnel into the provider's transport, so a concrete provider only has to
//! implement its wire call and capability answers.
//!
//! Providers report failure through [`SendOutcome`], never through panics or
//! errors: auth failures, rate limits, and transport faults all come back as
//! `success: false` with an error string for the retry machinery.

pub mod postmark;
pub mod resend;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;

use courier_common::config::AppConfig;
use courier_common::types::{NotificationKind, ProviderId};
use courier_messages::{
    AdminAlert, BookingConfirmation, BookingReminder, EventReminder, PartnerApproval,
    PartnerRejection, PaymentFailed, PaymentReceipt, Verification,
};

pub use postmark::PostmarkProvider;
pub use resend::ResendProvider;

/// Result of one provider send call.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub success: bool,
    /// Provider-assigned message identifier, set on success.
    pub id: Option<String>,
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn delivered(id: Option<String>) -> Self {
        Self {
            success: true,
            id,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(error.into()),
        }
    }
}

/// A delivery backend capable of transmitting rendered messages.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Whether the credentials this provider needs are present.
    fn is_configured(&self) -> bool;

    /// Whether this provider has a delivery path for `kind`. The generic
    /// send is always available on a configured provider regardless of this
    /// answer.
    fn supports(&self, kind: NotificationKind) -> bool;

    /// Generic send: the transport every typed send funnels into.
    async fn send(&self, to: &str, subject: &str, html: &str, text: Option<&str>) -> SendOutcome;

    async fn send_booking_confirmation(&self, to: &str, msg: &BookingConfirmation) -> SendOutcome {
        let (subject, html) = templates::booking_confirmation(msg);
        self.send(to, &subject, &html, None).await
    }

    async fn send_booking_reminder(&self, to: &str, msg: &BookingReminder) -> SendOutcome {
        let (subject, html) = templates::booking_reminder(msg);
        self.send(to, &subject, &html, None).await
    }

    async fn send_event_reminder(&self, to: &str, msg: &EventReminder) -> SendOutcome {
        let (subject, html) = templates::event_reminder(msg);
        self.send(to, &subject, &html, None).await
    }

    async fn send_payment_receipt(&self, to: &str, msg: &PaymentReceipt) -> SendOutcome {
        let (subject, html) = templates::payment_receipt(msg);
        self.send(to, &subject, &html, None).await
    }

    async fn send_payment_failed(&self, to: &str, msg: &PaymentFailed) -> SendOutcome {
        let (subject, html) = templates::payment_failed(msg);
        self.send(to, &subject, &html, None).await
    }

    async fn send_partner_approval(&self, to: &str, msg: &PartnerApproval) -> SendOutcome {
        let (subject, html) = templates::partner_approval(msg);
        self.send(to, &subject, &html, None).await
    }

    async fn send_partner_rejection(&self, to: &str, msg: &PartnerRejection) -> SendOutcome {
        let (subject, html) = templates::partner_rejection(msg);
        self.send(to, &subject, &html, None).await
    }

    async fn send_admin_alert(&self, to: &str, msg: &AdminAlert) -> SendOutcome {
        let (subject, html) = templates::admin_alert(msg);
        self.send(to, &subject, &html, None).await
    }

    async fn send_verification(&self, to: &str, msg: &Verification) -> SendOutcome {
        let (subject, html) = templates::verification(msg);
        self.send(to, &subject, &html, None).await
    }
}

/// Read-only view over the configured providers, injected into the router
/// and dispatcher. Holding the providers behind the trait keeps fakes
/// substitutable in tests.
pub struct ProviderSet {
    /// Global preference order; earlier wins when no hint applies.
    providers: Vec<Arc<dyn EmailProvider>>,
}

impl ProviderSet {
    pub fn new(providers: Vec<Arc<dyn EmailProvider>>) -> Self {
        Self { providers }
    }

    /// Build the production set from configuration: Resend first, Postmark
    /// as the fallback.
    pub fn from_config(config: &AppConfig) -> Self {
        let from = config
            .email_from
            .clone()
            .unwrap_or_else(|| "no-reply@courier.local".to_string());

        Self::new(vec![
            Arc::new(ResendProvider::new(config.resend_api_key.clone(), from.clone())),
            Arc::new(PostmarkProvider::new(
                config.postmark_server_token.clone(),
                from,
            )),
        ])
    }

    pub fn get(&self, id: ProviderId) -> Option<&dyn EmailProvider> {
        self.providers
            .iter()
            .find(|p| p.id() == id)
            .map(|p| p.as_ref())
    }

    /// Providers in global preference order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn EmailProvider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    pub fn any_configured(&self) -> bool {
        self.providers.iter().any(|p| p.is_configured())
    }
}
