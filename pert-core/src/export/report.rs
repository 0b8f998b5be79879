//! View model for the printable estimation report.
//!
//! The report lists each enabled milestone with its enabled tasks, the
//! management task included, followed by subtotals and a grand total. Drawing
//! it is left to whichever renderer receives the value.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::aggregate::{milestone_total, project_total};
use crate::management::tasks_with_management;
use crate::models::{Milestone, Project, Task};
use crate::pert::format_hours;

/// Explanation printed ahead of the estimation tables.
pub const PERT_INTRODUCTION: [&str; 5] = [
    "The Program Evaluation and Review Technique (PERT) is a statistical tool used in project management to analyze and represent the tasks involved in completing a given project. This report provides an estimate based on three time values for each task:",
    "Optimistic (O): The minimum possible time required to accomplish a task, assuming everything proceeds better than is normally expected.",
    "Most Likely (M): The best estimate of the time required to accomplish a task, assuming everything proceeds as normal.",
    "Pessimistic (P): The maximum possible time required to accomplish a task, assuming everything goes wrong (excluding major catastrophes).",
    "These values are used to calculate the Expected Time (E) using the formula: E = (O + 4M + P) / 6. This weighted average provides a more realistic time estimate. The report also shows confidence intervals based on the standard deviation to indicate the range of likely outcomes.",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    /// `"{client} - {project}"`.
    pub title: String,
    pub client_name: String,
    pub project_name: String,
    pub exported_on: NaiveDate,
    pub introduction: Vec<&'static str>,
    pub milestones: Vec<ReportMilestone>,
    pub grand_total: f64,
    pub grand_total_label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMilestone {
    pub id: String,
    pub name: String,
    pub tasks: Vec<ReportTask>,
    pub total: f64,
    pub total_label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportTask {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tests: String,
    pub definition_of_done: String,
    pub expected: f64,
    /// Expected hours with two decimals.
    pub expected_label: String,
}

impl ReportView {
    /// Build the report dated today.
    pub fn of(project: &Project) -> Self {
        Self::build(project, Local::now().date_naive())
    }

    pub fn build(project: &Project, exported_on: NaiveDate) -> Self {
        let milestones: Vec<ReportMilestone> = project
            .milestones
            .iter()
            .filter(|m| m.is_enabled)
            .map(ReportMilestone::of)
            .collect();
        let grand_total = project_total(project);

        Self {
            title: report_title(project),
            client_name: project.client_name.clone(),
            project_name: project.project_name.clone(),
            exported_on,
            introduction: PERT_INTRODUCTION.to_vec(),
            milestones,
            grand_total,
            grand_total_label: format_hours(grand_total),
        }
    }

    /// Suggested filename for a rendered PDF of this report.
    pub fn pdf_filename(&self) -> String {
        format!("{}_PERT_Estimation.pdf", self.title.replace(' ', "_"))
    }
}

impl ReportMilestone {
    fn of(milestone: &Milestone) -> Self {
        let tasks = tasks_with_management(milestone)
            .iter()
            .filter(|t| t.is_enabled)
            .map(|t| ReportTask::of(t))
            .collect();
        let total = milestone_total(milestone);

        Self {
            id: milestone.id.clone(),
            name: milestone.name.clone(),
            tasks,
            total,
            total_label: format_hours(total),
        }
    }
}

impl ReportTask {
    fn of(task: &Task) -> Self {
        let expected = task.expected();
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            description: task.description.clone(),
            tests: task.tests.clone(),
            definition_of_done: task.definition_of_done.clone(),
            expected,
            expected_label: format_hours(expected),
        }
    }
}

fn report_title(project: &Project) -> String {
    format!("{} - {}", project.client_name, project.project_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Estimates;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn sample() -> Project {
        let mut project = Project {
            client_name: "Acme".to_string(),
            project_name: "Web Shop".to_string(),
            ..Project::default()
        };
        project.milestones[0].tasks = vec![
            Task {
                name: "Cart".to_string(),
                estimates: Estimates::new(10.0, 20.0, 30.0),
                ..Task::new("A1".to_string())
            },
            Task {
                name: "Wishlist".to_string(),
                estimates: Estimates::new(5.0, 5.0, 5.0),
                is_enabled: false,
                ..Task::new("A2".to_string())
            },
        ];
        let mut b = Milestone::new("B".to_string());
        b.is_enabled = false;
        project.milestones.push(b);
        project
    }

    #[test]
    fn test_lists_enabled_milestones_with_management_task() {
        let report = ReportView::build(&sample(), date());

        assert_eq!(report.milestones.len(), 1);
        let ids: Vec<&str> = report.milestones[0]
            .tasks
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["A1", "A-mgmt"]);
        assert_eq!(report.milestones[0].total_label, "23.00");
        assert_eq!(report.grand_total_label, "23.00");
    }

    #[test]
    fn test_title_and_filename() {
        let report = ReportView::build(&sample(), date());
        assert_eq!(report.title, "Acme - Web Shop");
        assert_eq!(report.pdf_filename(), "Acme_-_Web_Shop_PERT_Estimation.pdf");
        assert_eq!(report.exported_on, date());
    }

    #[test]
    fn test_remarks_never_reach_the_report() {
        let mut project = sample();
        project.remarks = "secret internal note".to_string();
        let json = serde_json::to_string(&ReportView::build(&project, date())).unwrap();
        assert!(!json.contains("secret internal note"));
    }
}
