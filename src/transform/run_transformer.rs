//! # Run Detail Transformer
//!
//! Turns a raw run-detail response (run, task executions, task events and DAG
//! shape) into the `RunResponse` view model. Parallel tags from the detector
//! are merged into the step records and the grouped display sequence is
//! attached.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::constants::labels::UNKNOWN_WORKFLOW;
use crate::grouping::{detect_parallel_groups, group_parallel_steps, ParallelStepMap};
use crate::models::orchestrator::{RawRunDetails, RawTask, RawTaskEvent};
use crate::models::run::{ActivityLogEvent, LogLevel, RunResponse};
use crate::models::step::{StepStatus, WorkflowStep};
use crate::transform::utils::{elapsed_ms, extract_step_name, parse_timestamp};

/// Transform a run detail response using the current time for missing timestamps
pub fn transform_run_details(details: &RawRunDetails) -> RunResponse {
    transform_run_details_at(details, Utc::now())
}

/// Transform a run detail response; `now` fills missing trigger and event times
pub fn transform_run_details_at(details: &RawRunDetails, now: DateTime<Utc>) -> RunResponse {
    let parallel_steps = detect_parallel_groups(&details.shape);

    let steps: Vec<WorkflowStep> = details
        .tasks
        .iter()
        .map(|task| transform_task(task, &parallel_steps))
        .collect();

    let activity_logs = details
        .task_events
        .iter()
        .map(|event| transform_task_event(event, now))
        .collect();

    let run = &details.run;
    let metadata = run.metadata.as_ref();
    let completed_steps = steps.iter().filter(|s| s.status.is_complete()).count();
    let grouped_steps = group_parallel_steps(&steps);

    debug!(
        run_id = metadata.map(|m| m.id.as_str()).unwrap_or_default(),
        total_steps = steps.len(),
        parallel_steps = steps.iter().filter(|s| s.is_parallel).count(),
        display_items = grouped_steps.len(),
        "Transformed run details"
    );

    RunResponse {
        run_id: metadata.map(|m| m.id.clone()).unwrap_or_default(),
        workflow_name: run
            .display_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_WORKFLOW.to_string()),
        status: run.status,
        triggered_at: parse_timestamp(metadata.and_then(|m| m.created_at.as_deref()))
            .unwrap_or(now),
        started_at: parse_timestamp(run.started_at.as_deref()),
        finished_at: parse_timestamp(run.finished_at.as_deref()),
        duration: run.duration.unwrap_or(0),
        total_steps: steps.len(),
        completed_steps,
        steps,
        grouped_steps,
        activity_logs,
    }
}

/// Build a step record from one task execution.
///
/// Queue time runs from queue insertion to start, run time from start to
/// finish, duration from insertion to finish. Each is present only when both
/// ends are known.
pub fn transform_task(task: &RawTask, parallel_steps: &ParallelStepMap) -> WorkflowStep {
    let queued_at = parse_timestamp(task.task_inserted_at.as_deref());
    let started_at = parse_timestamp(task.started_at.as_deref());
    let finished_at = parse_timestamp(task.finished_at.as_deref());

    let parallel = task
        .step_id
        .as_deref()
        .and_then(|step_id| parallel_steps.get(step_id));

    WorkflowStep {
        id: task
            .metadata
            .as_ref()
            .map(|m| m.id.clone())
            .unwrap_or_default(),
        name: extract_step_name(task.action_id.as_deref().unwrap_or_default()),
        status: StepStatus::from_wire(&task.status),
        duration: elapsed_ms(queued_at, finished_at),
        queue_time: elapsed_ms(queued_at, started_at),
        run_time: elapsed_ms(started_at, finished_at),
        created_at: queued_at,
        started_at,
        finished_at,
        error: task.error.clone().filter(|e| !e.is_empty()),
        is_parallel: parallel.map(|p| p.is_parallel).unwrap_or(false),
        parent_group: parallel.map(|p| p.group_name.clone()),
    }
}

/// Build an activity log entry from a task event
pub fn transform_task_event(event: &RawTaskEvent, now: DateTime<Utc>) -> ActivityLogEvent {
    let message = [event.message.as_deref(), event.reason.as_deref()]
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
        .unwrap_or(event.event_type.as_str())
        .to_string();

    ActivityLogEvent {
        id: event.id.clone().unwrap_or_default(),
        timestamp: parse_timestamp(event.time_first_seen.as_deref()).unwrap_or(now),
        level: LogLevel::from_event_type(&event.event_type),
        message,
        step_id: event.step_id.clone(),
        step_name: Some(
            event
                .step_name
                .as_deref()
                .map(extract_step_name)
                .unwrap_or_default(),
        ),
    }
}
