//! # Models
//!
//! Orchestrator payloads, the workflow shape and the view models built from them.

pub mod orchestrator;
pub mod run;
pub mod shape;
pub mod step;

pub use orchestrator::{
    QueueTotals, RawRun, RawRunDetails, RawRunSummary, RawTask, RawTaskEvent, ResourceMetadata,
};
pub use run::{ActivityLogEvent, LogLevel, RunResponse, RunStatus};
pub use shape::StepDescriptor;
pub use step::{StepStatus, WorkflowStep};
