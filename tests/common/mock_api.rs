//! In-memory orchestrator used by the web API tests

use async_trait::async_trait;
use parking_lot::Mutex;
use run_dashboard::error::{DashboardError, Result};
use run_dashboard::models::orchestrator::{
    QueueTotals, RawRun, RawRunDetails, RawRunSummary, RawTask, ResourceMetadata,
};
use run_dashboard::models::{RunStatus, StepDescriptor};
use run_dashboard::WorkflowApi;
use std::collections::{HashMap, VecDeque};

#[derive(Default)]
pub struct MockWorkflowApi {
    /// Scripted detail responses per run id; the last one repeats
    runs: Mutex<HashMap<String, VecDeque<RawRunDetails>>>,
    summaries: Mutex<Vec<RawRunSummary>>,
    queue: Mutex<QueueTotals>,
    /// Status code returned by every call when set
    failure: Mutex<Option<u16>>,
    triggered: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockWorkflowApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_run(self, details: RawRunDetails) -> Self {
        self.script_run(details.run_id().to_string(), vec![details]);
        self
    }

    pub fn script_run(&self, run_id: impl Into<String>, script: Vec<RawRunDetails>) {
        self.runs.lock().insert(run_id.into(), script.into());
    }

    pub fn with_summaries(self, summaries: Vec<RawRunSummary>) -> Self {
        *self.summaries.lock() = summaries;
        self
    }

    pub fn with_queue(self, queue: QueueTotals) -> Self {
        *self.queue.lock() = queue;
        self
    }

    pub fn failing_with(self, status: u16) -> Self {
        *self.failure.lock() = Some(status);
        self
    }

    pub fn triggered(&self) -> Vec<(String, serde_json::Value)> {
        self.triggered.lock().clone()
    }

    fn check_failure(&self) -> Result<()> {
        match *self.failure.lock() {
            Some(status) => Err(DashboardError::api(status, "mock orchestrator failure")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WorkflowApi for MockWorkflowApi {
    async fn get_run(&self, run_id: &str) -> Result<RawRunDetails> {
        self.check_failure()?;
        let mut runs = self.runs.lock();
        let script = runs
            .get_mut(run_id)
            .ok_or_else(|| DashboardError::api(404, format!("run {run_id} not found")))?;
        let details = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        details.ok_or_else(|| DashboardError::api(404, format!("run {run_id} not found")))
    }

    async fn list_runs(&self, limit: usize) -> Result<Vec<RawRunSummary>> {
        self.check_failure()?;
        Ok(self.summaries.lock().iter().take(limit).cloned().collect())
    }

    async fn queue_metrics(&self) -> Result<QueueTotals> {
        self.check_failure()?;
        Ok(*self.queue.lock())
    }

    async fn trigger_workflow(&self, workflow_name: &str, input: serde_json::Value) -> Result<String> {
        self.check_failure()?;
        let mut triggered = self.triggered.lock();
        triggered.push((workflow_name.to_string(), input));
        Ok(format!("triggered-{}", triggered.len()))
    }
}

fn metadata(id: &str, created_at: Option<&str>) -> Option<ResourceMetadata> {
    Some(ResourceMetadata {
        id: id.to_string(),
        created_at: created_at.map(str::to_string),
    })
}

/// Minimal run in `status` with no tasks
pub fn run_in_status(run_id: &str, status: RunStatus) -> RawRunDetails {
    RawRunDetails {
        run: RawRun {
            metadata: metadata(run_id, Some("2024-05-01T10:00:00Z")),
            display_name: Some("dag:parallel".to_string()),
            status,
            started_at: Some("2024-05-01T10:00:01Z".to_string()),
            finished_at: status
                .is_terminal()
                .then(|| "2024-05-01T10:00:04Z".to_string()),
            duration: status.is_terminal().then_some(3000),
        },
        ..Default::default()
    }
}

fn task(id: &str, step_id: &str, action: &str, started: &str, finished: &str) -> RawTask {
    RawTask {
        metadata: metadata(id, None),
        step_id: Some(step_id.to_string()),
        action_id: Some(action.to_string()),
        status: "COMPLETED".to_string(),
        task_inserted_at: Some("2024-05-01T10:00:00Z".to_string()),
        started_at: Some(started.to_string()),
        finished_at: Some(finished.to_string()),
        error: None,
    }
}

/// Diamond run: start -> (left, right) -> finish, all completed
pub fn diamond_run(run_id: &str) -> RawRunDetails {
    let mut details = run_in_status(run_id, RunStatus::Completed);
    details.shape = vec![
        StepDescriptor::new("start", &["left", "right"]),
        StepDescriptor::new("left", &["finish"]),
        StepDescriptor::new("right", &["finish"]),
        StepDescriptor::new("finish", &[]),
    ];
    details.tasks = vec![
        task("t1", "start", "dag:start", "2024-05-01T10:00:01Z", "2024-05-01T10:00:02Z"),
        task("t2", "left", "dag:left", "2024-05-01T10:00:02Z", "2024-05-01T10:00:02.300Z"),
        task("t3", "right", "dag:right", "2024-05-01T10:00:02Z", "2024-05-01T10:00:02.500Z"),
        task("t4", "finish", "dag:finish", "2024-05-01T10:00:03Z", "2024-05-01T10:00:04Z"),
    ];
    details
}
