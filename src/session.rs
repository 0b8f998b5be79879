//! Single-writer command loop.
//!
//! A spawned task owns the live [`Project`] and applies commands one at a
//! time in arrival order. Everything else talks to it through a cloneable
//! [`SessionHandle`], so there is exactly one writer and no shared lock.

use pert_core::{Command, Outcome, Project};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session closed")]
    Closed,
}

/// Result of a dispatched command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispatched {
    pub applied: bool,
    pub project: Project,
}

enum Request {
    Dispatch {
        command: Command,
        reply: oneshot::Sender<Dispatched>,
    },
    Snapshot {
        reply: oneshot::Sender<Project>,
    },
}

#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Request>,
}

impl SessionHandle {
    /// Start a session owning `project`. The session ends when the last
    /// handle is dropped.
    pub fn spawn(project: Project) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(run(project, rx));
        Self { tx }
    }

    pub async fn dispatch(&self, command: Command) -> Result<Dispatched, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Dispatch { command, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Replace the live project in one step.
    pub async fn load(&self, project: Project) -> Result<Dispatched, SessionError> {
        self.dispatch(Command::LoadProject(project)).await
    }

    /// A copy of the current project.
    pub async fn snapshot(&self) -> Result<Project, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Snapshot { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }
}

async fn run(mut project: Project, mut rx: mpsc::Receiver<Request>) {
    tracing::debug!("Session started");

    while let Some(request) = rx.recv().await {
        match request {
            Request::Dispatch { command, reply } => {
                let name = command.as_str();
                let outcome = project.execute(command);
                match outcome {
                    Outcome::Applied => tracing::debug!(command = name, "Applied command"),
                    Outcome::Ignored => {
                        tracing::debug!(command = name, "Ignored command with unknown reference")
                    }
                }

                // The caller may have gone away; the state change stands.
                let _ = reply.send(Dispatched {
                    applied: outcome.is_applied(),
                    project: project.clone(),
                });
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(project.clone());
            }
        }
    }

    tracing::debug!("Session closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commands_apply_in_order() {
        let session = SessionHandle::spawn(Project::default());

        session.dispatch(Command::AddMilestone).await.unwrap();
        let result = session
            .dispatch(Command::AddTask {
                milestone_id: "B".to_string(),
            })
            .await
            .unwrap();

        assert!(result.applied);
        assert_eq!(result.project.milestones[1].tasks[0].id, "B1");
        assert_eq!(session.snapshot().await.unwrap(), result.project);
    }

    #[tokio::test]
    async fn test_ignored_command_reports_not_applied() {
        let session = SessionHandle::spawn(Project::default());
        let result = session
            .dispatch(Command::DeleteMilestone {
                id: "Q".to_string(),
            })
            .await
            .unwrap();

        assert!(!result.applied);
        assert_eq!(result.project, Project::default());
    }

    #[tokio::test]
    async fn test_load_replaces_project() {
        let session = SessionHandle::spawn(Project::default());
        let imported = Project {
            project_name: "Imported".to_string(),
            milestones: vec![],
            ..Project::default()
        };

        session.load(imported.clone()).await.unwrap();
        assert_eq!(session.snapshot().await.unwrap(), imported);
    }

    #[tokio::test]
    async fn test_clones_share_one_project() {
        let session = SessionHandle::spawn(Project::default());
        let other = session.clone();

        other.dispatch(Command::AddMilestone).await.unwrap();
        assert_eq!(session.snapshot().await.unwrap().milestones.len(), 2);
    }
}
