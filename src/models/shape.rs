//! # Workflow Shape
//!
//! Static dependency graph of a workflow, supplied wholesale with each run.

use serde::{Deserialize, Serialize};

/// One node of the workflow DAG.
///
/// `children_step_ids` lists the steps that wait for this one to finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDescriptor {
    pub step_id: String,
    #[serde(rename = "taskName", alias = "name", default)]
    pub name: String,
    #[serde(rename = "taskExternalId", alias = "externalId", default)]
    pub external_id: String,
    #[serde(default)]
    pub children_step_ids: Vec<String>,
}

impl StepDescriptor {
    pub fn new(step_id: impl Into<String>, children: &[&str]) -> Self {
        let step_id = step_id.into();
        Self {
            name: step_id.clone(),
            external_id: String::new(),
            children_step_ids: children.iter().map(|c| (*c).to_string()).collect(),
            step_id,
        }
    }
}
