//! # Run Status Relay
//!
//! Polls the orchestrator for one run and yields an event whenever the run's
//! status changes. The stream ends after a terminal status or an unrecoverable
//! error.

use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::client::WorkflowApi;
use crate::config::StreamConfig;
use crate::constants::labels::UNKNOWN;
use crate::error::DashboardError;
use crate::logging::log_stream_event;
use crate::models::orchestrator::RawRun;
use crate::models::run::RunStatus;
use crate::transform::parse_timestamp;

/// Snapshot of a run sent with each status update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub run_id: String,
    pub status: RunStatus,
    pub workflow_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

/// Events pushed to the browser over SSE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamEvent {
    StatusUpdate { payload: StatusPayload },
    Error { message: String },
}

impl StreamEvent {
    pub fn status_update(&self) -> Option<&StatusPayload> {
        match self {
            Self::StatusUpdate { payload } => Some(payload),
            Self::Error { .. } => None,
        }
    }
}

/// Result of feeding one poll into the tracker
#[derive(Debug, Clone, PartialEq)]
pub struct PollStep {
    pub event: Option<StreamEvent>,
    pub finished: bool,
}

/// Per-stream state: last emitted status and the not-found budget.
///
/// A freshly triggered run may not be visible to the read API yet, so a few
/// consecutive not-found responses are tolerated before giving up.
#[derive(Debug, Clone)]
pub struct StatusTracker {
    run_id: String,
    last_status: Option<RunStatus>,
    not_found_count: u32,
    max_not_found_retries: u32,
}

impl StatusTracker {
    pub fn new(run_id: impl Into<String>, max_not_found_retries: u32) -> Self {
        Self {
            run_id: run_id.into(),
            last_status: None,
            not_found_count: 0,
            max_not_found_retries,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Record a successfully fetched run
    pub fn observe_run(&mut self, run: &RawRun) -> PollStep {
        self.not_found_count = 0;

        let event = if self.last_status != Some(run.status) {
            self.last_status = Some(run.status);
            Some(StreamEvent::StatusUpdate {
                payload: StatusPayload {
                    run_id: run
                        .metadata
                        .as_ref()
                        .map(|m| m.id.clone())
                        .filter(|id| !id.is_empty())
                        .unwrap_or_else(|| self.run_id.clone()),
                    status: run.status,
                    workflow_name: run
                        .display_name
                        .clone()
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                    started_at: parse_timestamp(run.started_at.as_deref()),
                    finished_at: parse_timestamp(run.finished_at.as_deref()),
                    duration: run.duration,
                },
            })
        } else {
            None
        };

        PollStep {
            event,
            finished: run.status.is_terminal(),
        }
    }

    /// Record a failed poll
    pub fn observe_error(&mut self, error: &DashboardError) -> PollStep {
        if error.is_not_found() && self.not_found_count < self.max_not_found_retries {
            self.not_found_count += 1;
            debug!(
                run_id = %self.run_id,
                attempt = self.not_found_count,
                max = self.max_not_found_retries,
                "Run not visible yet, retrying"
            );
            return PollStep {
                event: None,
                finished: false,
            };
        }

        PollStep {
            event: Some(StreamEvent::Error {
                message: error.to_string(),
            }),
            finished: true,
        }
    }
}

/// Relay timing and retry settings
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub poll_interval: Duration,
    pub max_not_found_retries: u32,
}

impl From<&StreamConfig> for RelaySettings {
    fn from(config: &StreamConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            max_not_found_retries: config.max_not_found_retries,
        }
    }
}

/// Poll `run_id` immediately and then every `poll_interval`, yielding status
/// changes until the run is terminal or polling fails for good.
pub fn relay_run_status(
    api: Arc<dyn WorkflowApi>,
    run_id: String,
    settings: RelaySettings,
) -> impl Stream<Item = StreamEvent> + Send + 'static {
    async_stream::stream! {
        let mut tracker = StatusTracker::new(run_id, settings.max_not_found_retries);
        let mut ticker = tokio::time::interval(settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        log_stream_event(tracker.run_id(), "opened", None, None);

        loop {
            ticker.tick().await;

            let step = match api.get_run(tracker.run_id()).await {
                Ok(details) => tracker.observe_run(&details.run),
                Err(e) => {
                    if !e.is_not_found() {
                        warn!(
                            run_id = %tracker.run_id(),
                            error = %e,
                            recoverable = e.is_recoverable(),
                            "Polling run failed"
                        );
                    }
                    tracker.observe_error(&e)
                }
            };

            if let Some(event) = step.event {
                if let Some(payload) = event.status_update() {
                    let status = payload.status.to_string();
                    log_stream_event(tracker.run_id(), "status_update", Some(&status), None);
                }
                yield event;
            }

            if step.finished {
                log_stream_event(tracker.run_id(), "closed", None, None);
                break;
            }
        }
    }
}
