//! # Web API Application State
//!
//! Shared state handed to every handler: configuration, the orchestrator
//! client and the completed run history.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::WorkflowApi;
use crate::config::DashboardConfig;
use crate::history::{CompletedRun, RunHistory};
use crate::logging::log_error;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub api: Arc<dyn WorkflowApi>,
    pub history: Arc<RwLock<RunHistory>>,
}

impl AppState {
    pub fn new(config: DashboardConfig, api: Arc<dyn WorkflowApi>, history: RunHistory) -> Self {
        Self {
            config: Arc::new(config),
            api,
            history: Arc::new(RwLock::new(history)),
        }
    }

    /// Record a finished run and persist the snapshot when configured.
    ///
    /// Returns `false` when the history already held the run or the run is
    /// not terminal.
    pub async fn record_completed(&self, run: CompletedRun) -> bool {
        let run_id = run.run_id.clone();
        let snapshot = {
            let mut history = self.history.write();
            if !history.record(run) {
                return false;
            }
            history.clone()
        };

        debug!(run_id = %run_id, entries = snapshot.len(), "Recorded completed run");

        if let Some(path) = &self.config.history_file {
            if let Err(e) = snapshot.save(path).await {
                warn!(path = %path.display(), error = %e, "Failed to save history snapshot");
                log_error("history", "save", &e.to_string(), Some(&run_id));
            }
        }
        true
    }

    pub fn completed_runs(&self) -> Vec<CompletedRun> {
        self.history.read().entries()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("history_len", &self.history.read().len())
            .finish()
    }
}
