//! The command-driven project store.
//!
//! Every edit to a [`Project`] goes through a [`Command`]. Applying a command
//! is a plain state transition: it takes the current value and yields the next
//! one, restoring id density for every structural change before returning.
//!
//! Commands that reference an unknown milestone, task or Q&A index are ignored
//! and leave the project untouched. Callers holding stale ids therefore never
//! see an error, only an [`Outcome::Ignored`].

use serde::{Deserialize, Serialize};

use crate::ids::{milestone_id_at, task_id_at};
use crate::models::*;

/// Every way the project can change.
///
/// On the wire a command is `{"type": "ADD_TASK", "payload": {...}}` with
/// camelCase payload fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    SetProjectField {
        field: ProjectField,
        value: String,
    },
    /// Replace the whole project. The snapshot is adopted without checks.
    LoadProject(Project),
    AddMilestone,
    UpdateMilestone {
        id: String,
        update: MilestoneUpdate,
    },
    DeleteMilestone {
        id: String,
    },
    AddTask {
        milestone_id: String,
    },
    UpdateTask {
        milestone_id: String,
        task_id: String,
        update: TaskUpdate,
    },
    UpdateEstimate {
        milestone_id: String,
        task_id: String,
        which: EstimateKind,
        value: f64,
    },
    DeleteTask {
        milestone_id: String,
        task_id: String,
    },
    /// Move a task to the end of another milestone.
    MoveTask {
        source_milestone_id: String,
        dest_milestone_id: String,
        task_id: String,
    },
    AddQAndA {
        milestone_id: String,
        task_id: String,
    },
    UpdateQAndA {
        milestone_id: String,
        task_id: String,
        index: usize,
        field: QAndAField,
        value: String,
    },
    DeleteQAndA {
        milestone_id: String,
        task_id: String,
        index: usize,
    },
    UpdateRemarks(String),
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetProjectField { .. } => "SET_PROJECT_FIELD",
            Self::LoadProject(_) => "LOAD_PROJECT",
            Self::AddMilestone => "ADD_MILESTONE",
            Self::UpdateMilestone { .. } => "UPDATE_MILESTONE",
            Self::DeleteMilestone { .. } => "DELETE_MILESTONE",
            Self::AddTask { .. } => "ADD_TASK",
            Self::UpdateTask { .. } => "UPDATE_TASK",
            Self::UpdateEstimate { .. } => "UPDATE_ESTIMATE",
            Self::DeleteTask { .. } => "DELETE_TASK",
            Self::MoveTask { .. } => "MOVE_TASK",
            Self::AddQAndA { .. } => "ADD_Q_AND_A",
            Self::UpdateQAndA { .. } => "UPDATE_Q_AND_A",
            Self::DeleteQAndA { .. } => "DELETE_Q_AND_A",
            Self::UpdateRemarks(_) => "UPDATE_REMARKS",
        }
    }
}

/// Project-level text fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    ClientName,
    ProjectName,
}

/// A single-field patch to a milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum MilestoneUpdate {
    Name(String),
    IsEnabled(bool),
}

/// A single-field patch to a task's scalar fields. Estimates have their own
/// command, [`Command::UpdateEstimate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum TaskUpdate {
    Name(String),
    Description(String),
    Tests(String),
    DefinitionOfDone(String),
    IsEnabled(bool),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum QAndAField {
    Question,
    Answer,
}

/// Whether a command changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The command referenced something that does not exist (or asked for a
    /// move onto the same milestone); the project is unchanged.
    Ignored,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The store's transition function: `next = apply(current, command)`.
pub fn apply(project: Project, command: Command) -> Project {
    project.apply(command)
}

impl Project {
    /// Consume the current value and return the next one.
    pub fn apply(mut self, command: Command) -> Self {
        self.execute(command);
        self
    }

    /// Apply a command in place, reporting whether it took effect.
    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::SetProjectField { field, value } => {
                match field {
                    ProjectField::ClientName => self.client_name = value,
                    ProjectField::ProjectName => self.project_name = value,
                }
                Outcome::Applied
            }
            Command::LoadProject(project) => {
                *self = project;
                Outcome::Applied
            }
            Command::AddMilestone => {
                let id = milestone_id_at(self.milestones.len());
                self.milestones.push(Milestone::new(id));
                Outcome::Applied
            }
            Command::UpdateMilestone { id, update } => {
                let Some(milestone) = self.milestone_mut(&id) else {
                    return Outcome::Ignored;
                };
                match update {
                    MilestoneUpdate::Name(name) => milestone.name = name,
                    MilestoneUpdate::IsEnabled(enabled) => milestone.is_enabled = enabled,
                }
                Outcome::Applied
            }
            Command::DeleteMilestone { id } => {
                let before = self.milestones.len();
                self.milestones.retain(|m| m.id != id);
                if self.milestones.len() == before {
                    return Outcome::Ignored;
                }
                renumber_milestones(&mut self.milestones);
                Outcome::Applied
            }
            Command::AddTask { milestone_id } => {
                let Some(milestone) = self.milestone_mut(&milestone_id) else {
                    return Outcome::Ignored;
                };
                let id = task_id_at(&milestone.id, milestone.tasks.len());
                milestone.tasks.push(Task::new(id));
                Outcome::Applied
            }
            Command::UpdateTask {
                milestone_id,
                task_id,
                update,
            } => {
                let Some(task) = self.task_mut(&milestone_id, &task_id) else {
                    return Outcome::Ignored;
                };
                match update {
                    TaskUpdate::Name(v) => task.name = v,
                    TaskUpdate::Description(v) => task.description = v,
                    TaskUpdate::Tests(v) => task.tests = v,
                    TaskUpdate::DefinitionOfDone(v) => task.definition_of_done = v,
                    TaskUpdate::IsEnabled(v) => task.is_enabled = v,
                }
                Outcome::Applied
            }
            Command::UpdateEstimate {
                milestone_id,
                task_id,
                which,
                value,
            } => {
                let Some(task) = self.task_mut(&milestone_id, &task_id) else {
                    return Outcome::Ignored;
                };
                task.estimates.set(which, value);
                Outcome::Applied
            }
            Command::DeleteTask {
                milestone_id,
                task_id,
            } => {
                let Some(milestone) = self.milestone_mut(&milestone_id) else {
                    return Outcome::Ignored;
                };
                let before = milestone.tasks.len();
                milestone.tasks.retain(|t| t.id != task_id);
                if milestone.tasks.len() == before {
                    return Outcome::Ignored;
                }
                renumber_tasks(milestone);
                Outcome::Applied
            }
            Command::MoveTask {
                source_milestone_id,
                dest_milestone_id,
                task_id,
            } => self.move_task(&source_milestone_id, &dest_milestone_id, &task_id),
            Command::AddQAndA {
                milestone_id,
                task_id,
            } => {
                let Some(task) = self.task_mut(&milestone_id, &task_id) else {
                    return Outcome::Ignored;
                };
                task.q_and_a.push(QAndAEntry::default());
                Outcome::Applied
            }
            Command::UpdateQAndA {
                milestone_id,
                task_id,
                index,
                field,
                value,
            } => {
                let entry = self
                    .task_mut(&milestone_id, &task_id)
                    .and_then(|t| t.q_and_a.get_mut(index));
                let Some(entry) = entry else {
                    return Outcome::Ignored;
                };
                match field {
                    QAndAField::Question => entry.question = value,
                    QAndAField::Answer => entry.answer = value,
                }
                Outcome::Applied
            }
            Command::DeleteQAndA {
                milestone_id,
                task_id,
                index,
            } => {
                let Some(task) = self.task_mut(&milestone_id, &task_id) else {
                    return Outcome::Ignored;
                };
                if index >= task.q_and_a.len() {
                    return Outcome::Ignored;
                }
                task.q_and_a.remove(index);
                Outcome::Applied
            }
            Command::UpdateRemarks(value) => {
                self.remarks = value;
                Outcome::Applied
            }
        }
    }

    fn task_mut(&mut self, milestone_id: &str, task_id: &str) -> Option<&mut Task> {
        self.milestone_mut(milestone_id)?.task_mut(task_id)
    }

    fn move_task(&mut self, source_id: &str, dest_id: &str, task_id: &str) -> Outcome {
        if source_id == dest_id || self.milestone(dest_id).is_none() {
            return Outcome::Ignored;
        }
        let Some(source) = self.milestone_mut(source_id) else {
            return Outcome::Ignored;
        };
        let Some(pos) = source.tasks.iter().position(|t| t.id == task_id) else {
            return Outcome::Ignored;
        };
        let task = source.tasks.remove(pos);
        renumber_tasks(source);

        if let Some(dest) = self.milestone_mut(dest_id) {
            dest.tasks.push(task);
            renumber_tasks(dest);
        }
        Outcome::Applied
    }
}

/// Reassign milestone ids by position, cascading the new ids into task ids.
fn renumber_milestones(milestones: &mut [Milestone]) {
    for (index, milestone) in milestones.iter_mut().enumerate() {
        milestone.id = milestone_id_at(index);
        renumber_tasks(milestone);
    }
}

fn renumber_tasks(milestone: &mut Milestone) {
    for (index, task) in milestone.tasks.iter_mut().enumerate() {
        task.id = task_id_at(&milestone.id, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_ids(project: &Project, milestone: usize) -> Vec<String> {
        project.milestones[milestone]
            .tasks
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    #[test]
    fn test_unknown_milestone_is_ignored() {
        let mut project = Project::default();
        let before = project.clone();
        let outcome = project.execute(Command::AddTask {
            milestone_id: "Q".to_string(),
        });
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(project, before);
    }

    #[test]
    fn test_delete_first_milestone_cascades_into_task_ids() {
        let project = Project::default()
            .apply(Command::AddMilestone)
            .apply(Command::AddTask {
                milestone_id: "B".to_string(),
            })
            .apply(Command::AddTask {
                milestone_id: "B".to_string(),
            })
            .apply(Command::DeleteMilestone {
                id: "A".to_string(),
            });

        assert_eq!(project.milestones.len(), 1);
        assert_eq!(project.milestones[0].id, "A");
        assert_eq!(project.milestones[0].name, "Milestone B");
        assert_eq!(task_ids(&project, 0), vec!["A1", "A2"]);
    }

    #[test]
    fn test_move_to_unknown_destination_keeps_task() {
        let mut project = Project::default().apply(Command::AddTask {
            milestone_id: "A".to_string(),
        });
        let before = project.clone();
        let outcome = project.execute(Command::MoveTask {
            source_milestone_id: "A".to_string(),
            dest_milestone_id: "Z".to_string(),
            task_id: "A1".to_string(),
        });
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(project, before);
    }

    #[test]
    fn test_command_wire_format() {
        let json = r#"{"type":"MOVE_TASK","payload":{"sourceMilestoneId":"A","destMilestoneId":"B","taskId":"A2"}}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            Command::MoveTask {
                source_milestone_id: "A".to_string(),
                dest_milestone_id: "B".to_string(),
                task_id: "A2".to_string(),
            }
        );

        let json = r#"{"type":"UPDATE_TASK","payload":{"milestoneId":"A","taskId":"A1","update":{"field":"definitionOfDone","value":"Merged"}}}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command.as_str(), "UPDATE_TASK");

        let command: Command = serde_json::from_str(r#"{"type":"ADD_MILESTONE"}"#).unwrap();
        assert_eq!(command, Command::AddMilestone);
    }
}
