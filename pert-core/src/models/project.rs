use serde::{Deserialize, Serialize};

use super::Task;

/// Project name given to a fresh estimation.
pub const DEFAULT_PROJECT_NAME: &str = "New Project Estimation";

/// Remarks a fresh estimation starts with.
pub const DEFAULT_REMARKS: &str = "## General Remarks\n\n- This section uses Markdown for formatting.\n- Notes here are for internal reference and will not be included in any exports.";

/// An estimation project.
///
/// The project is the unit of persistence: the whole value is exported and
/// imported as one JSON snapshot. `remarks` is Markdown for internal notes and
/// is left out of the CSV and report projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub remarks: String,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            milestones: vec![Milestone::new(crate::ids::milestone_id_at(0))],
            remarks: DEFAULT_REMARKS.to_string(),
        }
    }
}

impl Project {
    /// Find a milestone by id.
    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    pub(crate) fn milestone_mut(&mut self, id: &str) -> Option<&mut Milestone> {
        self.milestones.iter_mut().find(|m| m.id == id)
    }

    /// Find a task by milestone and task id.
    pub fn task(&self, milestone_id: &str, task_id: &str) -> Option<&Task> {
        self.milestone(milestone_id)?.task(task_id)
    }
}

/// A lettered group of tasks.
///
/// `id` is always derived from the milestone's position in the project; the
/// store rewrites it (and every task id below it) after structural edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Milestone {
    /// An enabled, empty milestone named after its id.
    pub fn new(id: String) -> Self {
        Self {
            name: format!("Milestone {}", id),
            id,
            is_enabled: true,
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

pub(crate) fn enabled() -> bool {
    true
}
