pub mod health;
pub mod process;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(process::router())
        .merge(stats::router())
        .with_state(state)
}
