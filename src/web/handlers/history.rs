//! # Completed Run History Handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::history::CompletedRun;
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub runs: Vec<CompletedRun>,
    pub total: usize,
}

/// Recently completed runs, newest first: GET /api/workflows/history
pub async fn list_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let runs = state.completed_runs();
    Json(HistoryResponse {
        total: runs.len(),
        runs,
    })
}
