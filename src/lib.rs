#![allow(clippy::doc_markdown)] // Allow technical terms like SSE, DAG in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Run Dashboard
//!
//! Backend for a workflow-run dashboard that sits in front of an external
//! workflow orchestrator.
//!
//! ## Overview
//!
//! The orchestrator reports a run as a flat list of tasks plus the DAG shape
//! that produced them. The dashboard infers which steps ran as parallel
//! siblings, folds them into groups, and serves the result alongside live
//! status streams and platform health figures.
//!
//! ## Module Organization
//!
//! - [`grouping`] - Parallel group detection and step list folding (pure)
//! - [`transform`] - Raw orchestrator payloads into dashboard view models
//! - [`client`] - The [`client::WorkflowApi`] seam and its REST implementation
//! - [`stream`] - Per-run status relay
//! - [`history`] - Rolling cache of completed runs
//! - [`metrics`] - Platform health aggregation
//! - [`web`] - axum router, handlers and API errors
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured logging setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use run_dashboard::grouping::{detect_parallel_groups, group_parallel_steps};
//! use run_dashboard::models::{StepDescriptor, StepStatus, WorkflowStep};
//!
//! let shape = vec![
//!     StepDescriptor::new("A", &["B", "C"]),
//!     StepDescriptor::new("B", &[]),
//!     StepDescriptor::new("C", &[]),
//! ];
//! let parallel = detect_parallel_groups(&shape);
//! assert_eq!(parallel["B"].group_name, "parallel-A");
//!
//! let steps = vec![
//!     WorkflowStep::new("A", "A", StepStatus::Completed),
//!     WorkflowStep::new("B", "B", StepStatus::Completed).in_group("parallel-A"),
//!     WorkflowStep::new("C", "C", StepStatus::Completed).in_group("parallel-A"),
//! ];
//! assert_eq!(group_parallel_steps(&steps).len(), 2);
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit, property and web API tests
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod grouping;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod stream;
pub mod transform;
pub mod web;

pub use client::{HatchetClient, WorkflowApi};
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use grouping::{
    detect_parallel_groups, group_parallel_steps, ParallelGroup, ParallelStepInfo, StepItem,
};
pub use history::{CompletedRun, RunHistory};
pub use metrics::{compute_platform_metrics, PlatformMetrics};
pub use stream::{relay_run_status, StatusTracker, StreamEvent};
pub use transform::transform_run_details;
pub use web::{router, AppState};
