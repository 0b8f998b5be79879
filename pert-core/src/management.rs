//! Synthesized "Project Management" overhead task.
//!
//! Each milestone gets one derived task sized at 10/15/20% of the rounded-up
//! expected hours of its other enabled tasks. The task is rebuilt on every
//! read and never stored in the project.

use std::borrow::Cow;

use crate::models::{Estimates, Milestone, Task};

/// Name prefix reserved for management tasks. Tasks starting with it are left
/// out of the overhead base and shown read-only by front ends.
pub const MANAGEMENT_PREFIX: &str = "Project Management";

pub const MANAGEMENT_TASK_NAME: &str = "Project Management (10%, 15%, 20%)";

pub const MANAGEMENT_TASK_DESCRIPTION: &str = "Auto-estimated based on the sum of other tasks. Includes project management, meetings, communication, and delivery orchestration.";

const OPTIMISTIC_SHARE: f64 = 0.10;
const MOST_LIKELY_SHARE: f64 = 0.15;
const PESSIMISTIC_SHARE: f64 = 0.20;

pub fn is_management_task(task: &Task) -> bool {
    task.name.starts_with(MANAGEMENT_PREFIX)
}

/// Id of a milestone's management task, e.g. `B-mgmt`.
pub fn management_task_id(milestone_id: &str) -> String {
    format!("{}-mgmt", milestone_id)
}

/// Expected hours the overhead is computed from, before rounding.
pub fn management_base(milestone: &Milestone) -> f64 {
    milestone
        .tasks
        .iter()
        .filter(|t| t.is_enabled && !is_management_task(t))
        .map(Task::expected)
        .sum()
}

/// Build the management task for `milestone`.
///
/// The task is always enabled; it only drops out of totals when the whole
/// milestone is disabled.
pub fn management_task(milestone: &Milestone) -> Task {
    let sum = management_base(milestone).ceil();

    Task {
        id: management_task_id(&milestone.id),
        name: MANAGEMENT_TASK_NAME.to_string(),
        description: MANAGEMENT_TASK_DESCRIPTION.to_string(),
        estimates: Estimates::new(
            sum * OPTIMISTIC_SHARE,
            sum * MOST_LIKELY_SHARE,
            sum * PESSIMISTIC_SHARE,
        ),
        tests: String::new(),
        definition_of_done: String::new(),
        q_and_a: Vec::new(),
        is_enabled: true,
    }
}

/// The milestone's tasks followed by its management task, as listings show them.
pub fn tasks_with_management(milestone: &Milestone) -> Vec<Cow<'_, Task>> {
    milestone
        .tasks
        .iter()
        .map(Cow::Borrowed)
        .chain(std::iter::once(Cow::Owned(management_task(milestone))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, o: f64, m: f64, p: f64, enabled: bool) -> Task {
        Task {
            name: name.to_string(),
            estimates: Estimates::new(o, m, p),
            is_enabled: enabled,
            ..Task::new("A1".to_string())
        }
    }

    fn milestone(tasks: Vec<Task>) -> Milestone {
        Milestone {
            tasks,
            ..Milestone::new("A".to_string())
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_integer_base_is_used_as_is() {
        let mgmt = management_task(&milestone(vec![
            task("Backend", 10.0, 20.0, 30.0, true),
        ]));

        assert_eq!(mgmt.id, "A-mgmt");
        assert_eq!(mgmt.name, MANAGEMENT_TASK_NAME);
        assert!(mgmt.is_enabled);
        assert!(close(mgmt.estimates.optimistic, 2.0));
        assert!(close(mgmt.estimates.most_likely, 3.0));
        assert!(close(mgmt.estimates.pessimistic, 4.0));
    }

    #[test]
    fn test_fractional_base_rounds_up() {
        // expected(1, 1, 2) = 7/6
        let mgmt = management_task(&milestone(vec![task("Docs", 1.0, 1.0, 2.0, true)]));
        assert!(close(mgmt.estimates.optimistic, 0.2));
        assert!(close(mgmt.estimates.pessimistic, 0.4));
    }

    #[test]
    fn test_disabled_and_management_named_tasks_are_skipped() {
        let mgmt = management_task(&milestone(vec![
            task("Backend", 6.0, 6.0, 6.0, true),
            task("Frontend", 100.0, 100.0, 100.0, false),
            task("Project Management (manual)", 50.0, 50.0, 50.0, true),
        ]));
        assert!(close(mgmt.estimates.most_likely, 0.9));
    }

    #[test]
    fn test_empty_milestone_has_zero_overhead() {
        let mgmt = management_task(&milestone(vec![]));
        assert_eq!(mgmt.estimates, Estimates::default());
    }

    #[test]
    fn test_listing_appends_management_last() {
        let m = milestone(vec![task("Backend", 1.0, 1.0, 1.0, true)]);
        let listed = tasks_with_management(&m);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Backend");
        assert_eq!(listed[1].id, "A-mgmt");
    }
}
