//! # Run View Models
//!
//! Run-level status, activity log entries and the run-detail payload served to
//! the browser.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grouping::StepItem;
use crate::models::step::WorkflowStep;

/// Run states as reported by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Queued,
    Pending,
    Running,
    Succeeded,
    Completed,
    Failed,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Check if this is a terminal state (the run will not change again)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Completed | Self::Failed | Self::Cancelled
        )
    }

    /// The orchestrator reports success as either COMPLETED or SUCCEEDED
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Completed)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "QUEUED"),
            Self::Pending => write!(f, "PENDING"),
            Self::Running => write!(f, "RUNNING"),
            Self::Succeeded => write!(f, "SUCCEEDED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// UI severity of an activity log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    /// Translate an orchestrator task event type into a UI log level
    pub fn from_event_type(event_type: &str) -> Self {
        match event_type {
            "COMPLETED" | "FINISHED" | "SUCCEEDED" => Self::Success,
            "FAILED" => Self::Error,
            "CANCELLED" | "REQUEUED_NO_WORKER" => Self::Warn,
            // ASSIGNED, SENT_TO_WORKER, STARTED, QUEUED, ... are informational
            _ => Self::Info,
        }
    }
}

/// One entry of a run's activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
}

/// Run detail payload served by `GET /api/workflows/runs/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub run_id: String,
    pub workflow_name: String,
    pub status: RunStatus,
    pub triggered_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub duration: i64,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub steps: Vec<WorkflowStep>,
    pub grouped_steps: Vec<StepItem>,
    pub activity_logs: Vec<ActivityLogEvent>,
}
