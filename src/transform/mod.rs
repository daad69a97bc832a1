//! # Transformers
//!
//! Reshape raw orchestrator payloads into dashboard view models.

pub mod run_transformer;
pub mod utils;

pub use run_transformer::{transform_run_details, transform_run_details_at};
pub use utils::{extract_step_name, format_duration, parse_timestamp};
