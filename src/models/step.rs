//! # Workflow Step View Model
//!
//! Runtime record of one task within a run, built once per run-detail fetch by
//! merging raw task execution data with the parallel-group tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Step states as reported by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    Queued,
    Pending,
    Running,
    Completed,
    Succeeded,
    Failed,
    Cancelled,
}

impl StepStatus {
    /// Map an orchestrator status string, falling back to `Pending`
    pub fn from_wire(status: &str) -> Self {
        status.parse().unwrap_or(Self::Pending)
    }

    /// Check if the step finished successfully
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed | Self::Succeeded)
    }

    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Succeeded | Self::Failed | Self::Cancelled
        )
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "QUEUED"),
            Self::Pending => write!(f, "PENDING"),
            Self::Running => write!(f, "RUNNING"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Succeeded => write!(f, "SUCCEEDED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUEUED" => Ok(Self::Queued),
            "PENDING" => Ok(Self::Pending),
            "RUNNING" => Ok(Self::Running),
            "COMPLETED" => Ok(Self::Completed),
            "SUCCEEDED" => Ok(Self::Succeeded),
            "FAILED" => Ok(Self::Failed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

/// One unit of work within a run, ready for display.
///
/// `is_parallel == true` implies `parent_group` names the group. Durations are
/// milliseconds and display-only: external data may not satisfy
/// `duration == queue_time + run_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub id: String,
    pub name: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub is_parallel: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group: Option<String>,
}

impl WorkflowStep {
    /// A sequential step with no timing data
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: StepStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            duration: None,
            queue_time: None,
            run_time: None,
            created_at: None,
            started_at: None,
            finished_at: None,
            error: None,
            is_parallel: false,
            parent_group: None,
        }
    }

    /// Tag the step as a member of a parallel group
    pub fn in_group(mut self, group_name: impl Into<String>) -> Self {
        self.is_parallel = true;
        self.parent_group = Some(group_name.into());
        self
    }

    pub fn with_run_time(mut self, run_time_ms: i64) -> Self {
        self.run_time = Some(run_time_ms);
        self
    }

    pub fn with_duration(mut self, duration_ms: i64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    /// Group this step is displayed in, if it is a tagged parallel member
    pub fn parallel_group(&self) -> Option<&str> {
        if !self.is_parallel {
            return None;
        }
        self.parent_group.as_deref().filter(|name| !name.is_empty())
    }

    /// Cost metric used to find the slowest member of a parallel group.
    ///
    /// Run time excludes queueing so it reflects concurrent execution better
    /// than the total duration. Missing or negative values count as zero.
    pub fn cost_metric(&self) -> i64 {
        self.run_time.or(self.duration).unwrap_or(0).max(0)
    }
}
