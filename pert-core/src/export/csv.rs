//! Issue-tracker import sheet.
//!
//! Columns are `Subject,Description,Target version,Estimated time`. Text
//! fields are always quoted; the hours column never is. Only tasks stored in
//! the project are listed, so the synthesized management task has no row.

use crate::models::{Milestone, Project, Task};
use crate::pert::format_hours;

pub const CSV_HEADER: &str = "Subject,Description,Target version,Estimated time";

/// Render one row per enabled task of every enabled milestone.
pub fn to_csv(project: &Project) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for milestone in project.milestones.iter().filter(|m| m.is_enabled) {
        for task in milestone.tasks.iter().filter(|t| t.is_enabled) {
            out.push_str(&row(milestone, task));
            out.push('\n');
        }
    }
    out
}

/// Filename for the CSV export of `project`.
pub fn csv_filename(project: &Project) -> String {
    format!("{}_Redmine_Import.csv", project.project_name)
}

fn row(milestone: &Milestone, task: &Task) -> String {
    [
        quote(&task.name),
        quote(&description(task)),
        quote(&milestone.name),
        format_hours(task.expected()),
    ]
    .join(",")
}

/// Description, tests and definition of done, blank-line separated.
fn description(task: &Task) -> String {
    let tests = (!task.tests.is_empty()).then(|| format!("Tests:\n{}", task.tests));
    let done = (!task.definition_of_done.is_empty())
        .then(|| format!("Definition of Done:\n{}", task.definition_of_done));

    [Some(task.description.clone()), tests, done]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
