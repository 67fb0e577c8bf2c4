//! Queue statistics route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use courier_queue::tracker::StatusTracker;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(queue_stats))
}

/// GET /stats: read-only queue depth broken down by status.
async fn queue_stats(State(state): State<AppState>) -> Response {
    match StatusTracker::stats(&state.pool).await {
        Ok(stats) => Json(json!({ "success": true, "stats": stats })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read queue stats");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
