//! # Parallel Grouping
//!
//! Structural parallelism inference over a workflow DAG and the display
//! grouping built on it:
//!
//! - [`parallel_detector`] tags steps that share an identical prerequisite set
//! - [`step_grouper`] folds tagged steps into composite items at the position
//!   of their first member
//!
//! Both are pure, synchronous and allocate fresh maps per call.

pub mod parallel_detector;
pub mod step_grouper;

pub use parallel_detector::{detect_parallel_groups, ParallelStepInfo, ParallelStepMap};
pub use step_grouper::{group_parallel_steps, ParallelGroup, StepItem};
