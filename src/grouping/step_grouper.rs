//! # Step List Grouper
//!
//! Collapses each parallel group of a flat step list into one composite item
//! while keeping every sequential step where it was.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::step::WorkflowStep;

/// Display composite for steps that ran side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelGroup {
    pub name: String,
    /// Members in the order they were encountered
    pub steps: Vec<WorkflowStep>,
    /// Wall-clock cost of the block: the slowest member's metric, not the sum
    pub total_duration: i64,
    pub slowest_step: WorkflowStep,
}

impl ParallelGroup {
    /// Build a group from its members, or `None` if there are none.
    ///
    /// The slowest step is the first member reaching the maximum cost metric.
    pub fn from_members(name: impl Into<String>, steps: Vec<WorkflowStep>) -> Option<Self> {
        let mut slowest = steps.first()?;
        for step in &steps[1..] {
            if step.cost_metric() > slowest.cost_metric() {
                slowest = step;
            }
        }

        let total_duration = slowest.cost_metric();
        let slowest_step = slowest.clone();

        Some(Self {
            name: name.into(),
            steps,
            total_duration,
            slowest_step,
        })
    }
}

/// One renderable entry: a plain step or a parallel group.
///
/// Serialized untagged; consumers tell a group apart by its `steps` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepItem {
    Group(ParallelGroup),
    Step(WorkflowStep),
}

impl StepItem {
    pub fn as_group(&self) -> Option<&ParallelGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Step(_) => None,
        }
    }

    pub fn as_step(&self) -> Option<&WorkflowStep> {
        match self {
            Self::Step(step) => Some(step),
            Self::Group(_) => None,
        }
    }
}

/// Output position reserved during the walk
enum Slot<'a> {
    Step(&'a WorkflowStep),
    Group(&'a str),
}

/// Group parallel steps for sequential rendering.
///
/// Sequential steps keep their relative order. Each group takes the position of
/// its first-encountered member and every other member's position is dropped.
/// A parallel step with no group name is treated as sequential.
pub fn group_parallel_steps(steps: &[WorkflowStep]) -> Vec<StepItem> {
    let mut slots = Vec::with_capacity(steps.len());
    let mut members: HashMap<&str, Vec<WorkflowStep>> = HashMap::new();

    for step in steps {
        match step.parallel_group() {
            None => slots.push(Slot::Step(step)),
            Some(group_name) => {
                let bucket = members.entry(group_name).or_default();
                if bucket.is_empty() {
                    // first member: the group renders here
                    slots.push(Slot::Group(group_name));
                }
                bucket.push(step.clone());
            }
        }
    }

    slots
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Step(step) => Some(StepItem::Step(step.clone())),
            Slot::Group(group_name) => {
                let group_steps = members.remove(group_name)?;
                ParallelGroup::from_members(group_name, group_steps).map(StepItem::Group)
            }
        })
        .collect()
}
