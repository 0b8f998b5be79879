//! JSON snapshot export and import.
//!
//! The snapshot is the full project with camelCase keys. Numbers round-trip
//! exactly; non-finite estimates do not, since JSON has no spelling for them.

use serde_json::Value;

use crate::error::SnapshotError;
use crate::models::Project;

/// Default filename for an exported snapshot.
pub const SNAPSHOT_FILENAME: &str = "pert-estimation.json";

/// Serialize the full project, remarks included, as pretty JSON.
pub fn to_json(project: &Project) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(project)
}

/// Parse an imported snapshot.
///
/// Only the shape checks an importer needs before handing the value to
/// `LoadProject` are made here: the document must carry a `milestones` array
/// and a `projectName`. Anything else missing falls back to defaults.
pub fn parse_snapshot(text: &str) -> Result<Project, SnapshotError> {
    let value: Value = serde_json::from_str(text)?;

    match value.get("milestones") {
        None | Some(Value::Null) => return Err(SnapshotError::MissingField("milestones")),
        Some(Value::Array(_)) => {}
        Some(_) => return Err(SnapshotError::NotAnArray("milestones")),
    }
    if matches!(value.get("projectName"), None | Some(Value::Null)) {
        return Err(SnapshotError::MissingField("projectName"));
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Estimates, QAndAEntry};
    use crate::store::Command;

    #[test]
    fn test_snapshot_uses_camel_case_keys() {
        let json = to_json(&Project::default()).unwrap();
        assert!(json.contains("\"clientName\""));
        assert!(json.contains("\"projectName\""));
        assert!(json.contains("\"isEnabled\""));
        assert!(json.contains("\"remarks\""));
    }

    #[test]
    fn test_round_trip_keeps_everything() {
        let mut project = Project::default()
            .apply(Command::AddTask {
                milestone_id: "A".to_string(),
            })
            .apply(Command::AddQAndA {
                milestone_id: "A".to_string(),
                task_id: "A1".to_string(),
            });
        project.milestones[0].tasks[0].estimates = Estimates::new(0.1, 2.0 / 3.0, 1e-7);
        project.milestones[0].tasks[0].q_and_a[0] = QAndAEntry {
            question: "Which \"env\"?".to_string(),
            answer: "Staging\nthen prod".to_string(),
        };

        let json = to_json(&project).unwrap();
        let loaded = parse_snapshot(&json).unwrap();
        assert_eq!(loaded, project);
    }

    #[test]
    fn test_task_keys_match_snapshot_format() {
        let project = Project::default().apply(Command::AddTask {
            milestone_id: "A".to_string(),
        });
        let json = to_json(&project).unwrap();
        for key in [
            "\"definitionOfDone\"",
            "\"qAndA\"",
            "\"mostLikely\"",
            "\"optimistic\"",
            "\"pessimistic\"",
        ] {
            assert!(json.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn test_rejects_missing_milestones() {
        let err = parse_snapshot(r#"{"projectName": "X"}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingField("milestones")));
    }

    #[test]
    fn test_rejects_missing_project_name() {
        let err = parse_snapshot(r#"{"milestones": []}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingField("projectName")));
    }

    #[test]
    fn test_rejects_milestones_that_are_not_an_array() {
        let err = parse_snapshot(r#"{"projectName": "X", "milestones": {}}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::NotAnArray("milestones")));
    }

    #[test]
    fn test_non_finite_estimates_do_not_survive_export() {
        let mut project = Project::default().apply(Command::AddTask {
            milestone_id: "A".to_string(),
        });
        project.milestones[0].tasks[0].estimates = Estimates::new(1.0, f64::NAN, f64::INFINITY);

        let json = to_json(&project).unwrap();
        assert!(json.contains("\"mostLikely\": null"));
        assert!(matches!(parse_snapshot(&json), Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = parse_snapshot("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
    }

    #[test]
    fn test_partial_snapshot_takes_defaults() {
        let project = parse_snapshot(
            r#"{"projectName": "Shop", "milestones": [{"id": "A", "name": "MVP", "tasks": [{"id": "A1", "name": "Cart"}]}]}"#,
        )
        .unwrap();

        assert_eq!(project.client_name, "");
        assert_eq!(project.remarks, "");
        let task = &project.milestones[0].tasks[0];
        assert!(project.milestones[0].is_enabled);
        assert!(task.is_enabled);
        assert_eq!(task.estimates, Estimates::default());
        assert!(task.q_and_a.is_empty());
    }
}
