//! Resend delivery backend.
//!
//! Talks to the Resend HTTP API (`POST /emails`, bearer auth). The primary
//! provider: first in the global preference order and supports every kind.

use async_trait::async_trait;

use courier_common::types::{NotificationKind, ProviderId};

use crate::{EmailProvider, SendOutcome};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

pub struct ResendProvider {
    http: reqwest::Client,
    api_key: Option<String>,
    from: String,
}

impl ResendProvider {
    pub fn new(api_key: Option<String>, from: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Resend
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn supports(&self, _kind: NotificationKind) -> bool {
        true
    }

    async fn send(&self, to: &str, subject: &str, html: &str, text: Option<&str>) -> SendOutcome {
        let Some(api_key) = &self.api_key else {
            return SendOutcome::failure("Resend API key not configured");
        };

        let mut body = serde_json::json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "html": html,
        });
        if let Some(text) = text {
            body["text"] = serde_json::Value::String(text.to_string());
        }

        let response = self
            .http
            .post(RESEND_API_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => {
                let id = res
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|v| v.get("id").and_then(|i| i.as_str()).map(str::to_string));
                tracing::debug!(to, provider = "resend", message_id = ?id, "Email accepted");
                SendOutcome::delivered(id)
            }
            Ok(res) => {
                let status = res.status();
                let detail = res.text().await.unwrap_or_default();
                SendOutcome::failure(format!("Resend returned {status}: {detail}"))
            }
            Err(e) => SendOutcome::failure(format!("Resend request failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_send_fails_without_network() {
        let provider = ResendProvider::new(None, "no-reply@example.com".to_string());
        assert!(!provider.is_configured());

        let outcome = provider.send("to@example.com", "s", "<p>b</p>", None).await;
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("not configured"));
    }
}
