//! Provider routing.
//!
//! One declarative pass over the injected capability view decides which
//! providers may carry an item and in what order. Call sites never branch on
//! kind themselves.

use courier_common::types::{NotificationKind, ProviderId};
use courier_providers::ProviderSet;

/// Decide which providers to try for an item, most preferred first.
///
/// The producer's hint wins when that provider is configured and supports
/// the kind; after it comes the global preference order filtered the same
/// way. A typed kind no configured provider declares support for still has
/// the item's pre-rendered fallback body, so every configured provider is
/// returned for delivery over the generic path. The result is empty only
/// when no provider is configured at all.
pub fn select(
    set: &ProviderSet,
    kind: NotificationKind,
    preferred: Option<ProviderId>,
) -> Vec<ProviderId> {
    let mut order: Vec<ProviderId> = Vec::new();

    if let Some(id) = preferred
        && let Some(provider) = set.get(id)
        && provider.is_configured()
        && provider.supports(kind)
    {
        order.push(id);
    }

    for provider in set.iter() {
        if provider.is_configured() && provider.supports(kind) && !order.contains(&provider.id()) {
            order.push(provider.id());
        }
    }

    if order.is_empty() {
        for provider in set.iter() {
            if provider.is_configured() {
                order.push(provider.id());
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use courier_providers::{PostmarkProvider, ResendProvider};

    fn make_set(resend_key: Option<&str>, postmark_token: Option<&str>) -> ProviderSet {
        ProviderSet::new(vec![
            Arc::new(ResendProvider::new(
                resend_key.map(str::to_string),
                "no-reply@example.com".to_string(),
            )),
            Arc::new(PostmarkProvider::new(
                postmark_token.map(str::to_string),
                "no-reply@example.com".to_string(),
            )),
        ])
    }

    #[test]
    fn test_global_order_when_no_hint() {
        let set = make_set(Some("key"), Some("token"));
        let order = select(&set, NotificationKind::BookingConfirmation, None);
        assert_eq!(order, vec![ProviderId::Resend, ProviderId::Postmark]);
    }

    #[test]
    fn test_preferred_provider_first() {
        let set = make_set(Some("key"), Some("token"));
        let order = select(
            &set,
            NotificationKind::BookingConfirmation,
            Some(ProviderId::Postmark),
        );
        assert_eq!(order, vec![ProviderId::Postmark, ProviderId::Resend]);
    }

    #[test]
    fn test_unconfigured_preferred_ignored() {
        let set = make_set(Some("key"), None);
        let order = select(
            &set,
            NotificationKind::BookingConfirmation,
            Some(ProviderId::Postmark),
        );
        assert_eq!(order, vec![ProviderId::Resend]);
    }

    #[test]
    fn test_unsupporting_preferred_ignored() {
        // Postmark has no typed path for partner mail.
        let set = make_set(Some("key"), Some("token"));
        let order = select(
            &set,
            NotificationKind::PartnerApproval,
            Some(ProviderId::Postmark),
        );
        assert_eq!(order, vec![ProviderId::Resend]);
    }

    #[test]
    fn test_unsupported_kind_falls_back_to_generic_carriers() {
        // Only Postmark configured, and it has no typed path for admin
        // alerts: it still carries the pre-rendered fallback body.
        let set = make_set(None, Some("token"));
        let order = select(&set, NotificationKind::AdminAlert, None);
        assert_eq!(order, vec![ProviderId::Postmark]);
    }

    #[test]
    fn test_nothing_configured_is_empty() {
        let set = make_set(None, None);
        let order = select(&set, NotificationKind::Generic, None);
        assert!(order.is_empty());
    }
}
