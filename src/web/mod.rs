//! # Web API
//!
//! axum router exposing run details, live status streams, workflow
//! triggering, completed run history and platform metrics.

pub mod errors;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;

pub use errors::{ApiError, ApiResult};
pub use state::AppState;

/// Build the dashboard router over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::basic_health))
        .route("/api/workflows/runs", get(handlers::runs::list_runs))
        .route("/api/workflows/runs/:id", get(handlers::runs::get_run))
        .route(
            "/api/workflows/stream/:run_id",
            get(handlers::stream::stream_run_status),
        )
        .route(
            "/api/workflows/trigger",
            post(handlers::trigger::trigger_workflow),
        )
        .route("/api/workflows/history", get(handlers::history::list_history))
        .route("/api/metrics", get(handlers::metrics::platform_metrics))
        .with_state(state)
}
