//! Batch trigger route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use crate::middleware::auth::CronAuth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/process", post(process_queue))
}

/// POST /process: run one batch over the due queue items.
///
/// "The run executed" is reported independently of individual deliveries:
/// a run that failed every one of its items is still a 200, with the
/// failures listed in `results`. Only a fault before item processing starts
/// (the due-item fetch itself) surfaces as a 500.
async fn process_queue(State(state): State<AppState>, _auth: CronAuth) -> Response {
    match state.processor.process_batch(&state.pool).await {
        Ok(summary) if summary.is_empty() => Json(json!({
            "success": true,
            "message": "No pending emails to process",
            "processed": 0,
        }))
        .into_response(),
        Ok(summary) => Json(json!({
            "success": true,
            "message": format!("Processed {} notifications", summary.processed),
            "results": summary,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Batch run failed before item processing");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Failed to process notification queue",
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
