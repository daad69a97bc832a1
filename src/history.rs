//! # Completed Run History
//!
//! Rolling, de-duplicated cache of the most recently completed runs, newest
//! first. The status relay feeds it whenever a streamed run reaches a
//! terminal state. An optional JSON snapshot lets the cache survive restarts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::history::DEFAULT_HISTORY_LIMIT;
use crate::error::Result;
use crate::models::run::RunStatus;
use crate::stream::StatusPayload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedRun {
    pub run_id: String,
    pub status: RunStatus,
    pub workflow_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: i64,
}

impl From<&StatusPayload> for CompletedRun {
    fn from(payload: &StatusPayload) -> Self {
        Self {
            run_id: payload.run_id.clone(),
            status: payload.status,
            workflow_name: payload.workflow_name.clone(),
            started_at: payload.started_at,
            finished_at: payload.finished_at,
            duration: payload.duration.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunHistory {
    entries: VecDeque<CompletedRun>,
    limit: usize,
}

impl Default for RunHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl RunHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Add a run to the front of the history.
    ///
    /// Returns `false` when the run is not terminal or is already present.
    pub fn record(&mut self, run: CompletedRun) -> bool {
        if !run.status.is_terminal() || self.contains(&run.run_id) {
            return false;
        }

        self.entries.push_front(run);
        self.entries.truncate(self.limit);
        true
    }

    pub fn contains(&self, run_id: &str) -> bool {
        self.entries.iter().any(|r| r.run_id == run_id)
    }

    /// Newest first
    pub fn entries(&self) -> Vec<CompletedRun> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rebuild a history from a newest-first list, re-applying the
    /// de-duplication and capacity rules
    pub fn from_entries(entries: Vec<CompletedRun>, limit: usize) -> Self {
        let mut history = Self::new(limit);
        for run in entries.into_iter().rev() {
            history.record(run);
        }
        history
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn from_json(json: &str, limit: usize) -> Result<Self> {
        let entries: Vec<CompletedRun> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries, limit))
    }

    /// Load a snapshot; a missing or unreadable file yields an empty history
    pub fn load(path: &Path, limit: usize) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No history snapshot loaded");
                return Self::new(limit);
            }
        };

        match Self::from_json(&contents, limit) {
            Ok(history) => {
                debug!(path = %path.display(), entries = history.len(), "Loaded history snapshot");
                history
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt history snapshot");
                Self::new(limit)
            }
        }
    }

    /// Write the snapshot, creating parent directories as needed.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
