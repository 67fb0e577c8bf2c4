//! Shared-secret authentication for the scheduler-facing routes.
//!
//! `POST /process` is triggered by an external cron. When `PROCESS_SECRET`
//! is configured the caller must present it as a bearer token; with no
//! secret configured the check is disabled (local development).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use courier_common::error::AppError;

use crate::state::AppState;

/// Extractor that rejects requests not carrying the shared secret.
///
/// Use on routes only the scheduler may call:
/// ```ignore
/// async fn handler(_auth: CronAuth) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CronAuth;

/// Check an `Authorization` header value against the configured secret.
pub fn authorize(secret: Option<&str>, authorization: Option<&str>) -> bool {
    match secret {
        None => true,
        Some(secret) => authorization
            .and_then(|value| value.strip_prefix("Bearer "))
            .is_some_and(|token| token == secret),
    }
}

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let authorized = authorize(
            state.config.process_secret.as_deref(),
            parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok()),
        );

        async move {
            if authorized {
                Ok(CronAuth)
            } else {
                Err(AppError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_secret_allows_everything() {
        assert!(authorize(None, None));
        assert!(authorize(None, Some("Bearer whatever")));
    }

    #[test]
    fn test_matching_bearer_token_accepted() {
        assert!(authorize(Some("s3cret"), Some("Bearer s3cret")));
    }

    #[test]
    fn test_missing_or_wrong_token_rejected() {
        assert!(!authorize(Some("s3cret"), None));
        assert!(!authorize(Some("s3cret"), Some("Bearer wrong")));
        assert!(!authorize(Some("s3cret"), Some("s3cret")));
        assert!(!authorize(Some("s3cret"), Some("Basic s3cret")));
    }
}
