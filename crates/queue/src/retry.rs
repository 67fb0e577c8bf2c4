//! Retry scheduling.
//!
//! Owns the attempt counters and backoff math. Mutations happen on the
//! in-memory item only; the status tracker writes them back in one place.

use std::time::Duration;

use chrono::{DateTime, Utc};

use courier_common::types::{QueueItem, QueueStatus};

/// Exponential backoff policy with a ceiling.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    base_secs: u64,
    cap_secs: u64,
}

impl RetryPolicy {
    pub fn new(base_secs: u64, cap_secs: u64) -> Self {
        Self {
            base_secs,
            cap_secs,
        }
    }

    /// Delay before retry attempt `attempt` (1-based): base, 2x base,
    /// 4x base, ... capped at the ceiling. The exponent is clamped so large
    /// attempt numbers cannot overflow the shift.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let secs = self
            .base_secs
            .saturating_mul(1u64 << exponent)
            .min(self.cap_secs);
        Duration::from_secs(secs)
    }

    /// Mark an item delivered. `sent` is terminal: error and retry state are
    /// cleared and the item is never selected again.
    pub fn on_success(
        &self,
        item: &mut QueueItem,
        provider_message_id: Option<String>,
        now: DateTime<Utc>,
    ) {
        item.status = QueueStatus::Sent;
        item.provider_message_id = provider_message_id;
        item.last_error = None;
        item.next_retry_at = None;
        item.updated_at = now;
    }

    /// Record a retryable failure: bump the attempt counter and either
    /// schedule the next attempt or, with the budget exhausted, leave the
    /// item terminally failed.
    pub fn on_failure(&self, item: &mut QueueItem, error: String, now: DateTime<Utc>) {
        item.retry_count = (item.retry_count + 1).min(item.max_retries);
        item.status = QueueStatus::Failed;
        item.last_error = Some(error);
        item.updated_at = now;

        if item.retry_count < item.max_retries {
            let backoff = self.backoff(item.retry_count as u32);
            item.next_retry_at = Some(now + chrono::Duration::seconds(backoff.as_secs() as i64));
        } else {
            item.next_retry_at = None;
        }
    }

    /// Record a permanent failure (an unfixable payload): the attempt counts,
    /// but no retry is scheduled regardless of remaining budget.
    pub fn on_permanent_failure(&self, item: &mut QueueItem, error: String, now: DateTime<Utc>) {
        item.retry_count = (item.retry_count + 1).min(item.max_retries);
        item.status = QueueStatus::Failed;
        item.last_error = Some(error);
        item.next_retry_at = None;
        item.updated_at = now;
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(60, 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_item(retry_count: i32, max_retries: i32) -> QueueItem {
        QueueItem {
            id: Uuid::new_v4(),
            recipient: "jane@example.com".to_string(),
            kind: "generic".to_string(),
            subject: "s".to_string(),
            body_html: "<p>b</p>".to_string(),
            body_text: None,
            metadata: serde_json::json!({}),
            preferred_provider: None,
            status: QueueStatus::Processing,
            retry_count,
            max_retries,
            next_retry_at: None,
            last_error: None,
            provider_message_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let policy = RetryPolicy::new(60, 3600);
        assert_eq!(policy.backoff(1), Duration::from_secs(60));
        assert_eq!(policy.backoff(2), Duration::from_secs(120));
        assert_eq!(policy.backoff(3), Duration::from_secs(240));
        assert_eq!(policy.backoff(7), Duration::from_secs(3600));
        assert_eq!(policy.backoff(100), Duration::from_secs(3600));
    }

    #[test]
    fn test_backoff_non_decreasing() {
        let policy = RetryPolicy::default();
        let mut last = Duration::ZERO;
        for attempt in 1..40 {
            let delay = policy.backoff(attempt);
            assert!(delay >= last, "backoff decreased at attempt {attempt}");
            last = delay;
        }
    }

    #[test]
    fn test_failure_increments_and_schedules_retry() {
        let policy = RetryPolicy::default();
        let mut item = make_item(0, 3);
        let now = Utc::now();

        policy.on_failure(&mut item, "connection reset".to_string(), now);

        assert_eq!(item.status, QueueStatus::Failed);
        assert_eq!(item.retry_count, 1);
        assert_eq!(item.last_error.as_deref(), Some("connection reset"));
        assert!(item.next_retry_at.unwrap() > now);
    }

    #[test]
    fn test_final_failure_is_terminal() {
        let policy = RetryPolicy::default();
        let mut item = make_item(2, 3);
        let now = Utc::now();

        policy.on_failure(&mut item, "still broken".to_string(), now);

        assert_eq!(item.status, QueueStatus::Failed);
        assert_eq!(item.retry_count, 3);
        assert!(item.retries_exhausted());
        assert_eq!(item.next_retry_at, None);
    }

    #[test]
    fn test_success_clears_retry_state() {
        let policy = RetryPolicy::default();
        let mut item = make_item(1, 3);
        item.last_error = Some("previous failure".to_string());
        item.next_retry_at = Some(Utc::now());
        let now = Utc::now();

        policy.on_success(&mut item, Some("msg-42".to_string()), now);

        assert_eq!(item.status, QueueStatus::Sent);
        assert_eq!(item.provider_message_id.as_deref(), Some("msg-42"));
        assert_eq!(item.last_error, None);
        assert_eq!(item.next_retry_at, None);
    }

    #[test]
    fn test_permanent_failure_skips_remaining_budget() {
        let policy = RetryPolicy::default();
        let mut item = make_item(0, 3);
        let now = Utc::now();

        policy.on_permanent_failure(&mut item, "missing required field".to_string(), now);

        assert_eq!(item.status, QueueStatus::Failed);
        assert_eq!(item.retry_count, 1);
        assert_eq!(item.next_retry_at, None, "no retry for an unfixable payload");
    }
}
