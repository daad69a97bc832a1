//! # Workflow Run Handlers
//!
//! Listing and detail views of orchestrator runs.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::models::orchestrator::RawRunSummary;
use crate::models::run::RunResponse;
use crate::transform::transform_run_details;
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListRunsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RunListResponse {
    pub success: bool,
    pub runs: Vec<RawRunSummary>,
    pub total: usize,
}

/// List recent runs: GET /api/workflows/runs
pub async fn list_runs(
    State(state): State<AppState>,
    Query(query): Query<ListRunsQuery>,
) -> ApiResult<Json<RunListResponse>> {
    let limit = query
        .limit
        .filter(|l| *l > 0)
        .unwrap_or(state.config.metrics_sample_size);

    let runs = state.api.list_runs(limit).await.map_err(|e| {
        error!(error = %e, "Failed to list workflow runs");
        ApiError::from(e)
    })?;

    Ok(Json(RunListResponse {
        success: true,
        total: runs.len(),
        runs,
    }))
}

/// Run detail with grouped steps and activity log: GET /api/workflows/runs/:id
pub async fn get_run(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> ApiResult<Json<RunResponse>> {
    if run_id.trim().is_empty() {
        return Err(ApiError::bad_request("Run ID is required"));
    }

    let details = state.api.get_run(&run_id).await.map_err(|e| {
        if !e.is_not_found() {
            error!(run_id = %run_id, error = %e, "Failed to fetch workflow run");
        }
        ApiError::from(e)
    })?;

    let response = transform_run_details(&details);
    debug!(
        run_id = %response.run_id,
        status = %response.status,
        steps = response.total_steps,
        groups = response.grouped_steps.iter().filter(|i| i.as_group().is_some()).count(),
        "Transformed workflow run"
    );

    Ok(Json(response))
}
