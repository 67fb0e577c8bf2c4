//! Shared application state for the Axum API server.

use std::sync::Arc;

use sqlx::PgPool;

use courier_common::config::AppConfig;
use courier_queue::orchestrator::QueueProcessor;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: AppConfig,
    pub processor: Arc<QueueProcessor>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig, processor: Arc<QueueProcessor>) -> Self {
        Self {
            pool,
            config,
            processor,
        }
    }
}
