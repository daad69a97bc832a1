//! # Platform Metrics Handler

use axum::extract::State;
use axum::Json;
use tracing::error;

use crate::metrics::{compute_platform_metrics, PlatformMetrics};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Platform health summary: GET /api/metrics
pub async fn platform_metrics(State(state): State<AppState>) -> ApiResult<Json<PlatformMetrics>> {
    let (runs, queue) = tokio::try_join!(
        state.api.list_runs(state.config.metrics_sample_size),
        state.api.queue_metrics(),
    )
    .map_err(|e| {
        error!(error = %e, "Failed to fetch metrics");
        ApiError::from(e)
    })?;

    Ok(Json(compute_platform_metrics(&runs, queue, chrono::Utc::now())))
}
