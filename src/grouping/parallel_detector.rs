//! # Parallel Step Detector
//!
//! Infers which steps of a workflow run concurrently from the DAG shape alone.
//!
//! Steps whose prerequisite sets are identical are unlocked by the same event
//! and are therefore siblings. Any sibling bucket with two or more members is a
//! parallel group. This is a structural inference: the orchestrator's actual
//! scheduling may differ and that approximation is accepted.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::grouping::{
    GROUP_KEY_NAME_CHARS, GROUP_KEY_SEPARATOR, PARALLEL_GROUP_PREFIX,
};
use crate::models::shape::StepDescriptor;

/// Parallel tag for one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelStepInfo {
    pub is_parallel: bool,
    pub group_name: String,
}

/// Step id → parallel tag. Only steps with at least one sibling are present.
pub type ParallelStepMap = HashMap<String, ParallelStepInfo>;

/// Detect parallel groups in a workflow shape.
///
/// Roots (no prerequisites) and steps with a unique prerequisite set are never
/// tagged. Group names are derived from the grouping key, so detecting the same
/// shape twice yields the same names.
pub fn detect_parallel_groups(steps: &[StepDescriptor]) -> ParallelStepMap {
    let prerequisites = prerequisite_map(steps);

    // grouping key -> distinct member ids
    let mut buckets: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for step in steps {
        let Some(parents) = prerequisites.get(step.step_id.as_str()) else {
            continue;
        };
        if parents.is_empty() {
            continue;
        }
        buckets
            .entry(grouping_key(parents))
            .or_default()
            .insert(step.step_id.as_str());
    }

    let mut used_names = HashSet::new();
    let mut result = ParallelStepMap::new();

    for (key, members) in buckets {
        if members.len() < 2 {
            continue;
        }

        let group_name = unique_group_name(&key, &mut used_names);
        debug!(
            group_name = %group_name,
            members = members.len(),
            "Detected parallel step group"
        );

        for step_id in members {
            result.insert(
                step_id.to_string(),
                ParallelStepInfo {
                    is_parallel: true,
                    group_name: group_name.clone(),
                },
            );
        }
    }

    result
}

/// Invert `parent -> children` edges into `child -> parents`.
fn prerequisite_map(steps: &[StepDescriptor]) -> HashMap<&str, BTreeSet<&str>> {
    let mut map: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for step in steps {
        for child in &step.children_step_ids {
            map.entry(child.as_str())
                .or_default()
                .insert(step.step_id.as_str());
        }
    }
    map
}

/// Sorted prerequisite ids joined into one key. `BTreeSet` keeps them sorted
/// and drops duplicate edges.
fn grouping_key(parents: &BTreeSet<&str>) -> String {
    parents
        .iter()
        .copied()
        .collect::<Vec<_>>()
        .join(GROUP_KEY_SEPARATOR)
}

/// `parallel-` plus the leading characters of the key.
///
/// Distinct keys can share a prefix (a key is a prefix of any key that extends
/// its parent set). Buckets are visited in key order, so numbering the later
/// collisions keeps names unique and stable.
fn unique_group_name(key: &str, used_names: &mut HashSet<String>) -> String {
    let prefix: String = key.chars().take(GROUP_KEY_NAME_CHARS).collect();
    let base = format!("{PARALLEL_GROUP_PREFIX}{prefix}");

    let mut candidate = base.clone();
    let mut suffix = 2;
    while used_names.contains(&candidate) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    used_names.insert(candidate.clone());
    candidate
}
