//! Batch orchestration.
//!
//! One call processes one bounded batch of due items:
//! 1. Return stale claims from dead runs to the pool
//! 2. Fetch due items, oldest first
//! 3. Per item: claim, normalize, route, dispatch, retry bookkeeping, persist
//!
//! Every per-item failure is absorbed into the run summary; a slow or broken
//! item never blocks its siblings, and only fetch-level faults escape to the
//! caller.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use courier_common::config::AppConfig;
use courier_common::error::AppError;
use courier_common::types::{QueueItem, QueueStatus};
use courier_providers::ProviderSet;

use crate::dispatcher;
use crate::retry::RetryPolicy;
use crate::router;
use crate::tracker::StatusTracker;

/// Aggregate statistics for one batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub processed: u32,
    pub sent: u32,
    pub failed: u32,
    pub skipped: u32,
    pub errors: Vec<String>,
}

impl RunSummary {
    /// True when the run found nothing to do.
    pub fn is_empty(&self) -> bool {
        self.processed == 0 && self.skipped == 0
    }
}

/// Drives due queue items through the delivery pipeline.
pub struct QueueProcessor {
    providers: ProviderSet,
    retry: RetryPolicy,
    batch_size: i64,
    dispatch_timeout: Duration,
    stale_claim_secs: u64,
}

impl QueueProcessor {
    pub fn new(providers: ProviderSet, retry: RetryPolicy) -> Self {
        Self {
            providers,
            retry,
            batch_size: 50,
            dispatch_timeout: Duration::from_secs(15),
            stale_claim_secs: 600,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            providers: ProviderSet::from_config(config),
            retry: RetryPolicy::new(config.retry_base_secs, config.retry_cap_secs),
            batch_size: config.queue_batch_size,
            dispatch_timeout: Duration::from_secs(config.dispatch_timeout_secs),
            stale_claim_secs: config.stale_claim_secs,
        }
    }

    pub fn with_batch_size(mut self, batch_size: i64) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_dispatch_timeout(mut self, timeout: Duration) -> Self {
        self.dispatch_timeout = timeout;
        self
    }

    /// Run one bounded batch and report what happened.
    ///
    /// Errors escape only from the reclaim/fetch steps; everything after an
    /// item is claimed lands in the summary instead.
    pub async fn process_batch(&self, pool: &PgPool) -> Result<RunSummary, AppError> {
        StatusTracker::reclaim_stale(pool, self.stale_claim_secs).await?;

        let due = StatusTracker::fetch_due(pool, self.batch_size).await?;
        if due.is_empty() {
            return Ok(RunSummary::default());
        }

        tracing::info!(batch = due.len(), "Processing notification batch");

        let mut summary = RunSummary::default();
        for item in due {
            match StatusTracker::claim(pool, &item).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(item_id = %item.id, "Item no longer claimable, skipping");
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    tracing::error!(item_id = %item.id, error = %e, "Claim failed, skipping item");
                    summary.skipped += 1;
                    continue;
                }
            }

            let mut item = item;
            item.status = QueueStatus::Processing;
            summary.processed += 1;

            self.process_item(pool, &mut item, &mut summary).await;
        }

        tracing::info!(
            processed = summary.processed,
            sent = summary.sent,
            failed = summary.failed,
            skipped = summary.skipped,
            "Batch complete"
        );

        Ok(summary)
    }

    /// Steps 2 through 5 for one claimed item. Never errors: every failure
    /// ends up in the item state and the summary.
    async fn process_item(&self, pool: &PgPool, item: &mut QueueItem, summary: &mut RunSummary) {
        let now = Utc::now();

        match courier_messages::normalize(item) {
            Ok(payload) => {
                let order =
                    router::select(&self.providers, item.kind(), item.preferred_provider());
                let result = dispatcher::dispatch(
                    &self.providers,
                    &order,
                    item,
                    &payload,
                    self.dispatch_timeout,
                )
                .await;

                if result.success {
                    self.retry.on_success(item, result.provider_message_id, now);
                } else {
                    let error = result
                        .error
                        .unwrap_or_else(|| "delivery failed".to_string());
                    tracing::warn!(
                        item_id = %item.id,
                        kind = %item.kind(),
                        retry_count = item.retry_count,
                        error = %error,
                        "Delivery attempt failed"
                    );
                    self.retry.on_failure(item, error, now);
                }
            }
            Err(e) => {
                // The payload is permanently invalid; retrying buys nothing.
                tracing::warn!(item_id = %item.id, error = %e, "Payload normalization failed");
                self.retry.on_permanent_failure(item, e.to_string(), now);
            }
        }

        if let Err(e) = StatusTracker::persist(pool, item).await {
            tracing::error!(
                item_id = %item.id,
                error = %e,
                "Failed to persist item state; the item may be reprocessed next run"
            );
            summary.errors.push(format!("{}: persist failed: {}", item.id, e));
        }

        if item.status == QueueStatus::Sent {
            summary.sent += 1;
        } else {
            summary.failed += 1;
            if let Some(error) = &item.last_error {
                summary.errors.push(format!("{}: {}", item.id, error));
            }
        }
    }
}
