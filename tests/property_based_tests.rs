mod common;

use common::strategies::*;
use proptest::prelude::*;
use run_dashboard::grouping::{detect_parallel_groups, group_parallel_steps, StepItem};
use run_dashboard::models::{StepStatus, WorkflowStep};
use std::collections::{HashMap, HashSet};

/// Expand items back into the step ids they cover, in display order
fn flatten(items: &[StepItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| match item {
            StepItem::Group(group) => group.steps.iter().map(|s| s.id.clone()).collect(),
            StepItem::Step(step) => vec![step.id.clone()],
        })
        .collect()
}

proptest! {
    /// Property: a step is tagged exactly when another step shares its
    /// non-empty prerequisite set
    #[test]
    fn tagged_steps_are_exactly_the_shared_prerequisite_sets(pattern in workflow_pattern_strategy()) {
        let detected = detect_parallel_groups(&pattern.shape());

        let mut by_parents: HashMap<Vec<String>, usize> = HashMap::new();
        for i in 0..pattern.step_count() {
            *by_parents.entry(pattern.parents_of(i)).or_default() += 1;
        }

        for i in 0..pattern.step_count() {
            let parents = pattern.parents_of(i);
            let shared = !parents.is_empty() && by_parents[&parents] >= 2;
            prop_assert_eq!(detected.contains_key(&step_id(i)), shared, "step {} parents {:?}", i, parents);
        }
    }

    /// Property: siblings share one group name and distinct prerequisite sets
    /// never share a name
    #[test]
    fn group_names_follow_prerequisite_sets(pattern in workflow_pattern_strategy()) {
        let detected = detect_parallel_groups(&pattern.shape());

        let mut name_for_parents: HashMap<Vec<String>, String> = HashMap::new();
        let mut parents_for_name: HashMap<String, Vec<String>> = HashMap::new();

        for (id, info) in &detected {
            prop_assert!(info.is_parallel);
            prop_assert!(info.group_name.starts_with("parallel-"));

            let index: usize = id.trim_start_matches("step-").parse().unwrap();
            let parents = pattern.parents_of(index);

            let name = name_for_parents.entry(parents.clone()).or_insert_with(|| info.group_name.clone());
            prop_assert_eq!(&*name, &info.group_name);

            let owner = parents_for_name.entry(info.group_name.clone()).or_insert_with(|| parents.clone());
            prop_assert_eq!(&*owner, &parents);
        }
    }

    /// Property: detection is deterministic
    #[test]
    fn detection_is_deterministic(pattern in workflow_pattern_strategy()) {
        let shape = pattern.shape();
        prop_assert_eq!(detect_parallel_groups(&shape), detect_parallel_groups(&shape));
    }

    /// Property: grouping never drops, duplicates or reorders steps except by
    /// pulling later group members forward to their group's first position
    #[test]
    fn grouping_preserves_steps(steps in step_list_strategy()) {
        let items = group_parallel_steps(&steps);
        let flattened = flatten(&items);

        let mut expected: Vec<String> = steps.iter().map(|s| s.id.clone()).collect();
        let mut actual = flattened.clone();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);

        let sequential: Vec<String> = steps
            .iter()
            .filter(|s| s.parallel_group().is_none())
            .map(|s| s.id.clone())
            .collect();
        let emitted: Vec<String> = items
            .iter()
            .filter_map(|i| i.as_step().map(|s| s.id.clone()))
            .collect();
        prop_assert_eq!(emitted, sequential);
    }

    /// Property: each group appears once, at its first member's position,
    /// with members in encounter order
    #[test]
    fn groups_are_placed_at_first_member(steps in step_list_strategy()) {
        let items = group_parallel_steps(&steps);

        // expected display order: each step id, or the group at its first member
        let mut seen = HashSet::new();
        let mut expected_slots = Vec::new();
        for step in &steps {
            match step.parallel_group() {
                Some(group) => {
                    if seen.insert(group.to_string()) {
                        expected_slots.push(format!("group:{group}"));
                    }
                }
                None => expected_slots.push(format!("step:{}", step.id)),
            }
        }

        let actual_slots: Vec<String> = items
            .iter()
            .map(|item| match item {
                StepItem::Group(g) => format!("group:{}", g.name),
                StepItem::Step(s) => format!("step:{}", s.id),
            })
            .collect();
        prop_assert_eq!(actual_slots, expected_slots);

        for group in items.iter().filter_map(StepItem::as_group) {
            let members: Vec<&str> = steps
                .iter()
                .filter(|s| s.parallel_group() == Some(group.name.as_str()))
                .map(|s| s.id.as_str())
                .collect();
            let grouped: Vec<&str> = group.steps.iter().map(|s| s.id.as_str()).collect();
            prop_assert_eq!(grouped, members);
        }
    }

    /// Property: a group's duration is the maximum member metric, never the sum
    #[test]
    fn group_duration_is_max_member_metric(steps in step_list_strategy()) {
        for group in group_parallel_steps(&steps).iter().filter_map(StepItem::as_group) {
            let max = group.steps.iter().map(WorkflowStep::cost_metric).max().unwrap_or(0);
            prop_assert_eq!(group.total_duration, max);
            prop_assert!(group.total_duration >= 0);

            let first_slowest = group.steps.iter().find(|s| s.cost_metric() == max).unwrap();
            prop_assert_eq!(&group.slowest_step.id, &first_slowest.id);
        }
    }

    /// Property: grouping is idempotent
    #[test]
    fn grouping_is_idempotent(steps in step_list_strategy()) {
        prop_assert_eq!(group_parallel_steps(&steps), group_parallel_steps(&steps));
    }

    /// Property: detector tags fed through the grouper give one group per
    /// sibling set
    #[test]
    fn detected_groups_fold_into_display_groups(pattern in workflow_pattern_strategy()) {
        let detected = detect_parallel_groups(&pattern.shape());

        let steps: Vec<WorkflowStep> = (0..pattern.step_count())
            .map(|i| {
                let step = WorkflowStep::new(step_id(i), step_id(i), StepStatus::Completed);
                match detected.get(&step_id(i)) {
                    Some(info) => step.in_group(info.group_name.clone()),
                    None => step,
                }
            })
            .collect();

        let items = group_parallel_steps(&steps);
        let distinct_groups: HashSet<&str> = detected.values().map(|i| i.group_name.as_str()).collect();

        prop_assert_eq!(items.iter().filter_map(StepItem::as_group).count(), distinct_groups.len());
        prop_assert_eq!(items.len(), steps.len() - detected.len() + distinct_groups.len());
        for group in items.iter().filter_map(StepItem::as_group) {
            prop_assert!(group.steps.len() >= 2);
        }
    }
}

#[cfg(test)]
mod workflow_pattern_invariants {
    use super::common::strategies::*;
    use run_dashboard::grouping::detect_parallel_groups;

    #[test]
    fn test_diamond_pattern() {
        let detected = detect_parallel_groups(&WorkflowPattern::Diamond.shape());
        assert_eq!(detected.len(), 2);
        assert_eq!(detected[&step_id(1)].group_name, "parallel-step-00");
        assert_eq!(detected[&step_id(2)].group_name, "parallel-step-00");
    }

    #[test]
    fn test_linear_pattern_has_no_groups() {
        assert!(detect_parallel_groups(&WorkflowPattern::Linear(6).shape()).is_empty());
    }

    #[test]
    fn test_fan_out_pattern() {
        let detected = detect_parallel_groups(&WorkflowPattern::FanOut(5).shape());
        assert_eq!(detected.len(), 5);
        assert!(!detected.contains_key(&step_id(0)));
    }

    #[test]
    fn test_fan_in_pattern_has_no_groups() {
        // the sink has a unique prerequisite set and every source is a root
        assert!(detect_parallel_groups(&WorkflowPattern::FanIn(4).shape()).is_empty());
    }
}
