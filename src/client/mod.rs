//! # Orchestrator Client
//!
//! The dashboard talks to the external orchestrator only through
//! [`WorkflowApi`]; [`HatchetClient`] is the REST implementation and tests
//! substitute in-memory fakes.
//!
//! ```rust
//! use async_trait::async_trait;
//! use run_dashboard::client::WorkflowApi;
//! use run_dashboard::error::{DashboardError, Result};
//! use run_dashboard::models::{QueueTotals, RawRunDetails, RawRunSummary};
//!
//! struct IdleOrchestrator;
//!
//! #[async_trait]
//! impl WorkflowApi for IdleOrchestrator {
//!     async fn get_run(&self, run_id: &str) -> Result<RawRunDetails> {
//!         Err(DashboardError::api(404, format!("run {run_id} not found")))
//!     }
//!     async fn list_runs(&self, _limit: usize) -> Result<Vec<RawRunSummary>> {
//!         Ok(Vec::new())
//!     }
//!     async fn queue_metrics(&self) -> Result<QueueTotals> {
//!         Ok(QueueTotals::default())
//!     }
//!     async fn trigger_workflow(&self, _name: &str, _input: serde_json::Value) -> Result<String> {
//!         Err(DashboardError::invalid_input("read-only orchestrator"))
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let api = IdleOrchestrator;
//! assert!(api.get_run("run-1").await.unwrap_err().is_not_found());
//! assert_eq!(api.queue_metrics().await.unwrap().num_pending, 0);
//! # });
//! ```

pub mod hatchet;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::orchestrator::{QueueTotals, RawRunDetails, RawRunSummary};

pub use hatchet::HatchetClient;

/// Read and trigger operations against the external orchestrator
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Full detail of one run: run, tasks, task events and DAG shape
    async fn get_run(&self, run_id: &str) -> Result<RawRunDetails>;

    /// Most recent runs, newest first, at most `limit`
    async fn list_runs(&self, limit: usize) -> Result<Vec<RawRunSummary>>;

    /// Tenant-wide queue counters
    async fn queue_metrics(&self) -> Result<QueueTotals>;

    /// Start a workflow and return the new run's id
    async fn trigger_workflow(&self, workflow_name: &str, input: serde_json::Value)
        -> Result<String>;
}
