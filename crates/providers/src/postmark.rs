//! Postmark delivery backend.
//!
//! Talks to the Postmark HTTP API (`POST /email`, server-token header).
//! Fallback provider: only the customer-facing transactional kinds are
//! enabled on this account; partner and operator mail stays on the primary.

use async_trait::async_trait;

use courier_common::types::{NotificationKind, ProviderId};

use crate::{EmailProvider, SendOutcome};

const POSTMARK_API_URL: &str = "https://api.postmarkapp.com/email";

pub struct PostmarkProvider {
    http: reqwest::Client,
    server_token: Option<String>,
    from: String,
}

impl PostmarkProvider {
    pub fn new(server_token: Option<String>, from: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            server_token,
            from,
        }
    }
}

#[async_trait]
impl EmailProvider for PostmarkProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Postmark
    }

    fn is_configured(&self) -> bool {
        self.server_token.is_some()
    }

    fn supports(&self, kind: NotificationKind) -> bool {
        !matches!(
            kind,
            NotificationKind::PartnerApproval
                | NotificationKind::PartnerRejection
                | NotificationKind::AdminAlert
        )
    }

    async fn send(&self, to: &str, subject: &str, html: &str, text: Option<&str>) -> SendOutcome {
        let Some(token) = &self.server_token else {
            return SendOutcome::failure("Postmark server token not configured");
        };

        let mut body = serde_json::json!({
            "From": self.from,
            "To": to,
            "Subject": subject,
            "HtmlBody": html,
        });
        if let Some(text) = text {
            body["TextBody"] = serde_json::Value::String(text.to_string());
        }

        let response = self
            .http
            .post(POSTMARK_API_URL)
            .header("X-Postmark-Server-Token", token)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => {
                let id = res.json::<serde_json::Value>().await.ok().and_then(|v| {
                    v.get("MessageID").and_then(|i| i.as_str()).map(str::to_string)
                });
                tracing::debug!(to, provider = "postmark", message_id = ?id, "Email accepted");
                SendOutcome::delivered(id)
            }
            Ok(res) => {
                let status = res.status();
                let detail = res.text().await.unwrap_or_default();
                SendOutcome::failure(format!("Postmark returned {status}: {detail}"))
            }
            Err(e) => SendOutcome::failure(format!("Postmark request failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_send_fails_without_network() {
        let provider = PostmarkProvider::new(None, "no-reply@example.com".to_string());
        assert!(!provider.is_configured());

        let outcome = provider.send("to@example.com", "s", "<p>b</p>", None).await;
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("not configured"));
    }

    #[test]
    fn test_partner_kinds_not_supported() {
        let provider = PostmarkProvider::new(
            Some("token".to_string()),
            "no-reply@example.com".to_string(),
        );
        assert!(!provider.supports(NotificationKind::PartnerRejection));
        assert!(provider.supports(NotificationKind::PaymentReceipt));
        assert!(provider.supports(NotificationKind::Generic));
    }
}
