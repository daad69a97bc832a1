use proptest::prelude::*;
use proptest::strategy::Just;
use run_dashboard::models::{StepDescriptor, StepStatus, WorkflowStep};

/// Common DAG shapes plus random forward-edge graphs
#[derive(Debug, Clone)]
pub enum WorkflowPattern {
    Linear(usize),                // Linear chain of N steps
    Diamond,                      // 0 -> 1,2 -> 3
    FanOut(usize),                // 0 -> N
    FanIn(usize),                 // N -> 1
    Random(usize, Vec<(usize, usize)>), // N nodes, edges from lower to higher index
}

pub fn workflow_pattern_strategy() -> impl Strategy<Value = WorkflowPattern> {
    prop_oneof![
        (2usize..=10).prop_map(WorkflowPattern::Linear),
        Just(WorkflowPattern::Diamond),
        (2usize..=8).prop_map(WorkflowPattern::FanOut),
        (2usize..=8).prop_map(WorkflowPattern::FanIn),
        random_dag_strategy(),
    ]
}

/// Random acyclic graph: every edge points from a lower to a higher index
pub fn random_dag_strategy() -> impl Strategy<Value = WorkflowPattern> {
    (2usize..=12).prop_flat_map(|n| {
        let edge = (0..n, 0..n)
            .prop_filter("forward edges only", |(from, to)| from < to);
        (Just(n), prop::collection::vec(edge, 0..(n * 2)))
            .prop_map(|(n, edges)| WorkflowPattern::Random(n, edges))
    })
}

pub fn step_id(index: usize) -> String {
    format!("step-{index:02}")
}

impl WorkflowPattern {
    pub fn step_count(&self) -> usize {
        match self {
            WorkflowPattern::Linear(n) => *n,
            WorkflowPattern::Diamond => 4,
            WorkflowPattern::FanOut(n) => n + 1,
            WorkflowPattern::FanIn(n) => n + 1,
            WorkflowPattern::Random(n, _) => *n,
        }
    }

    pub fn edges(&self) -> Vec<(usize, usize)> {
        match self {
            WorkflowPattern::Linear(n) => (0..(*n - 1)).map(|i| (i, i + 1)).collect(),
            WorkflowPattern::Diamond => vec![(0, 1), (0, 2), (1, 3), (2, 3)],
            WorkflowPattern::FanOut(n) => (1..=*n).map(|i| (0, i)).collect(),
            WorkflowPattern::FanIn(n) => (0..*n).map(|i| (i, *n)).collect(),
            WorkflowPattern::Random(_, edges) => edges.clone(),
        }
    }

    /// Graph shape as the orchestrator would report it
    pub fn shape(&self) -> Vec<StepDescriptor> {
        let edges = self.edges();
        (0..self.step_count())
            .map(|i| {
                let children: Vec<String> = edges
                    .iter()
                    .filter(|(from, _)| *from == i)
                    .map(|(_, to)| step_id(*to))
                    .collect();
                let children: Vec<&str> = children.iter().map(String::as_str).collect();
                StepDescriptor::new(step_id(i), &children)
            })
            .collect()
    }

    /// Sorted, de-duplicated parent ids of `index`
    pub fn parents_of(&self, index: usize) -> Vec<String> {
        let mut parents: Vec<String> = self
            .edges()
            .iter()
            .filter(|(_, to)| *to == index)
            .map(|(from, _)| step_id(*from))
            .collect();
        parents.sort();
        parents.dedup();
        parents
    }
}

pub fn step_status_strategy() -> impl Strategy<Value = StepStatus> {
    prop_oneof![
        Just(StepStatus::Queued),
        Just(StepStatus::Pending),
        Just(StepStatus::Running),
        Just(StepStatus::Completed),
        Just(StepStatus::Succeeded),
        Just(StepStatus::Failed),
        Just(StepStatus::Cancelled),
    ]
}

/// Optional millisecond figure, sometimes negative to exercise clamping
pub fn metric_strategy() -> impl Strategy<Value = Option<i64>> {
    prop::option::of(-500i64..=5_000)
}

/// Group tag: sequential, one of a few named groups, or malformed
/// (parallel with an empty group name)
pub fn group_tag_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => Just(None),
        2 => Just(Some("parallel-a".to_string())),
        2 => Just(Some("parallel-b".to_string())),
        1 => Just(Some("parallel-c".to_string())),
        1 => Just(Some(String::new())),
    ]
}

/// Flat step list with unique ids in encounter order
pub fn step_list_strategy() -> impl Strategy<Value = Vec<WorkflowStep>> {
    prop::collection::vec(
        (
            step_status_strategy(),
            group_tag_strategy(),
            metric_strategy(),
            metric_strategy(),
        ),
        0..16,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (status, group, run_time, duration))| {
                let mut step = WorkflowStep::new(step_id(i), format!("task-{i}"), status);
                step.run_time = run_time;
                step.duration = duration;
                if let Some(group) = group {
                    step.is_parallel = true;
                    step.parent_group = Some(group);
                }
                step
            })
            .collect()
    })
}
