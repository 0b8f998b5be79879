//! Milestone and project roll-ups.

use serde::{Deserialize, Serialize};

use crate::management::tasks_with_management;
use crate::models::{Milestone, Project};

/// Expected hours of a milestone, management overhead included.
///
/// A disabled milestone totals zero whatever its tasks say.
pub fn milestone_total(milestone: &Milestone) -> f64 {
    if !milestone.is_enabled {
        return 0.0;
    }
    tasks_with_management(milestone)
        .iter()
        .filter(|t| t.is_enabled)
        .map(|t| t.expected())
        .sum()
}

/// Sum of all milestone totals.
pub fn project_total(project: &Project) -> f64 {
    project.milestones.iter().map(milestone_total).sum()
}

/// Totals for every milestone plus the grand total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub milestones: Vec<MilestoneTotal>,
    pub grand_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneTotal {
    pub id: String,
    pub name: String,
    pub is_enabled: bool,
    pub total: f64,
}

impl Totals {
    pub fn of(project: &Project) -> Self {
        let milestones = project
            .milestones
            .iter()
            .map(|m| MilestoneTotal {
                id: m.id.clone(),
                name: m.name.clone(),
                is_enabled: m.is_enabled,
                total: milestone_total(m),
            })
            .collect();

        Self {
            milestones,
            grand_total: project_total(project),
        }
    }
}
