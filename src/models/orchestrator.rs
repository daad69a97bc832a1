//! # Orchestrator Payloads
//!
//! Raw REST shapes returned by the external orchestrator. Every field is
//! optional or defaulted: the dashboard degrades rather than rejecting a
//! partially populated response. Timestamps stay as strings here and are
//! parsed leniently by the transformer.

use serde::{Deserialize, Serialize};

use crate::models::run::RunStatus;
use crate::models::shape::StepDescriptor;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Run-level fields of a run detail response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRun {
    #[serde(default)]
    pub metadata: Option<ResourceMetadata>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub finished_at: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
}

/// Execution record of a single task within a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(default)]
    pub metadata: Option<ResourceMetadata>,
    #[serde(default)]
    pub step_id: Option<String>,
    #[serde(default)]
    pub action_id: Option<String>,
    #[serde(default)]
    pub status: String,
    /// `createdAt` is frequently a zero date; queue entry time is the reliable origin
    #[serde(default)]
    pub task_inserted_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub finished_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTaskEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub time_first_seen: Option<String>,
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub step_id: Option<String>,
    #[serde(default)]
    pub step_name: Option<String>,
}

/// Full run detail: run, task executions, task events and the DAG shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRunDetails {
    #[serde(default)]
    pub run: RawRun,
    #[serde(default)]
    pub tasks: Vec<RawTask>,
    #[serde(default)]
    pub task_events: Vec<RawTaskEvent>,
    #[serde(default)]
    pub shape: Vec<StepDescriptor>,
}

/// Row of the run listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRunSummary {
    #[serde(default)]
    pub metadata: Option<ResourceMetadata>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub finished_at: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
}

impl RawRunDetails {
    /// Id of the run, empty when the orchestrator omitted metadata
    pub fn run_id(&self) -> &str {
        self.run
            .metadata
            .as_ref()
            .map(|m| m.id.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRunList {
    #[serde(default)]
    pub rows: Vec<RawRunSummary>,
}

/// Tenant-wide queue counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueTotals {
    #[serde(default)]
    pub num_pending: u64,
    #[serde(default)]
    pub num_queued: u64,
    #[serde(default)]
    pub num_running: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQueueMetrics {
    #[serde(default)]
    pub total: Option<QueueTotals>,
}
