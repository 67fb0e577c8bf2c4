//! Queue-item persistence.
//!
//! The only component that writes queue-item state. Claims are an atomic
//! compare-and-swap on `status`, so two overlapping runs can never both take
//! the same item, and claims from a crashed run are returned to the pool
//! once they go stale.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use courier_common::error::AppError;
use courier_common::types::{QueueItem, QueueStats, QueueStatus};

/// Retry budget applied when the producer doesn't specify one.
pub const DEFAULT_MAX_RETRIES: i32 = 3;

/// Parameters for enqueuing a new notification (the producer contract).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EnqueueParams {
    pub recipient: String,
    pub kind: String,
    pub subject: String,
    pub body_html: String,
    pub body_text: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub preferred_provider: Option<String>,
    pub max_retries: Option<i32>,
}

pub struct StatusTracker;

impl StatusTracker {
    /// Insert a new pending item.
    pub async fn enqueue(pool: &PgPool, params: &EnqueueParams) -> Result<QueueItem, AppError> {
        let id = Uuid::new_v4();
        let metadata = params
            .metadata
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));

        let item: QueueItem = sqlx::query_as(
            r#"
            INSERT INTO notification_queue
                (id, recipient, kind, subject, body_html, body_text, metadata,
                 preferred_provider, status, retry_count, max_retries)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', 0, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&params.recipient)
        .bind(&params.kind)
        .bind(&params.subject)
        .bind(&params.body_html)
        .bind(&params.body_text)
        .bind(&metadata)
        .bind(&params.preferred_provider)
        .bind(params.max_retries.unwrap_or(DEFAULT_MAX_RETRIES))
        .fetch_one(pool)
        .await?;

        tracing::info!(
            item_id = %item.id,
            kind = %item.kind,
            recipient = %item.recipient,
            "Notification enqueued"
        );

        Ok(item)
    }

    /// Fetch up to `limit` due items, oldest first. Due means `pending`, or
    /// `failed` with a scheduled retry that has come around and budget left.
    pub async fn fetch_due(pool: &PgPool, limit: i64) -> Result<Vec<QueueItem>, AppError> {
        let items: Vec<QueueItem> = sqlx::query_as(
            r#"
            SELECT * FROM notification_queue
            WHERE status = 'pending'
               OR (status = 'failed'
                   AND next_retry_at IS NOT NULL
                   AND next_retry_at <= now()
                   AND retry_count < max_retries)
            ORDER BY created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Atomically claim an item for this run.
    ///
    /// The update only matches while the row still holds the status observed
    /// at fetch time; returns `false` when another run moved it first.
    pub async fn claim(pool: &PgPool, item: &QueueItem) -> Result<bool, AppError> {
        if !matches!(item.status, QueueStatus::Pending | QueueStatus::Failed) {
            return Ok(false);
        }

        let result = sqlx::query(
            r#"
            UPDATE notification_queue
            SET status = 'processing', updated_at = now()
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(item.id)
        .bind(item.status)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Write back the fields mutated by dispatch and retry bookkeeping.
    pub async fn persist(pool: &PgPool, item: &QueueItem) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE notification_queue
            SET status = $2,
                retry_count = $3,
                next_retry_at = $4,
                last_error = $5,
                provider_message_id = $6,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(item.id)
        .bind(item.status)
        .bind(item.retry_count)
        .bind(item.next_retry_at)
        .bind(&item.last_error)
        .bind(&item.provider_message_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Return claims left `processing` by a dead run to `pending`.
    pub async fn reclaim_stale(pool: &PgPool, older_than_secs: u64) -> Result<u64, AppError> {
        let cutoff = Utc::now() - chrono::Duration::seconds(older_than_secs as i64);

        let result = sqlx::query(
            r#"
            UPDATE notification_queue
            SET status = 'pending', updated_at = now()
            WHERE status = 'processing' AND updated_at < $1
            "#,
        )
        .bind(cutoff)
        .execute(pool)
        .await?;

        let reclaimed = result.rows_affected();
        if reclaimed > 0 {
            tracing::warn!(reclaimed, "Reclaimed stale processing claims");
        }

        Ok(reclaimed)
    }

    /// Queue depth broken down by status.
    pub async fn stats(pool: &PgPool) -> Result<QueueStats, AppError> {
        let rows: Vec<(QueueStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM notification_queue GROUP BY status")
                .fetch_all(pool)
                .await?;

        let mut stats = QueueStats::default();
        for (status, count) in rows {
            match status {
                QueueStatus::Pending => stats.pending = count,
                QueueStatus::Processing => stats.processing = count,
                QueueStatus::Sent => stats.sent = count,
                QueueStatus::Failed => stats.failed = count,
            }
            stats.total += count;
        }

        Ok(stats)
    }
}
