//! # Workflow Trigger Handler

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    pub success: bool,
    pub workflow_run_id: String,
    pub message: String,
}

/// Validated trigger request
#[derive(Debug, PartialEq)]
pub struct TriggerRequest {
    pub workflow_name: String,
    pub input: Value,
}

impl TriggerRequest {
    /// Parse and validate a raw request body
    pub fn parse(body: &[u8]) -> ApiResult<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|_| {
            ApiError::bad_request("Invalid JSON - missing or malformed req body")
        })?;

        let workflow_name = match value.get("workflowName").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => {
                return Err(ApiError::bad_request(
                    "Invalid JSON - missing or malformed workflowName field",
                ))
            }
        };

        let input = match value.get("input") {
            Some(input @ Value::Object(_)) => input.clone(),
            _ => {
                return Err(ApiError::bad_request(
                    "Invalid JSON - missing or malformed input field",
                ))
            }
        };

        Ok(Self {
            workflow_name,
            input,
        })
    }
}

/// Start a workflow run: POST /api/workflows/trigger
pub async fn trigger_workflow(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<TriggerResponse>> {
    let request = TriggerRequest::parse(&body)?;

    info!(workflow = %request.workflow_name, "Triggering workflow");

    let run_id = state
        .api
        .trigger_workflow(&request.workflow_name, request.input)
        .await
        .map_err(|e| {
            error!(workflow = %request.workflow_name, error = %e, "Error triggering workflow");
            ApiError::from(e)
        })?;

    info!(workflow = %request.workflow_name, run_id = %run_id, "Triggered workflow");

    Ok(Json(TriggerResponse {
        success: true,
        message: format!("Workflow \"{}\" triggered successfully", request.workflow_name),
        workflow_run_id: run_id,
    }))
}
