use serde::{Deserialize, Serialize};

use crate::pert;

/// A unit of estimated work inside a milestone.
///
/// Task ids are `{milestone id}{1-based position}` and are reassigned by the
/// store whenever the owning milestone's task list changes shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimates: Estimates,
    /// How the work will be verified. Empty when not given.
    #[serde(default)]
    pub tests: String,
    /// Acceptance criteria. Empty when not given.
    #[serde(default)]
    pub definition_of_done: String,
    #[serde(default, rename = "qAndA")]
    pub q_and_a: Vec<QAndAEntry>,
    #[serde(default = "super::project::enabled")]
    pub is_enabled: bool,
}

impl Task {
    /// The task every `AddTask` appends: zero estimates, empty text fields.
    pub fn new(id: String) -> Self {
        Self {
            id,
            name: "New Task".to_string(),
            description: String::new(),
            estimates: Estimates::default(),
            tests: String::new(),
            definition_of_done: String::new(),
            q_and_a: Vec::new(),
            is_enabled: true,
        }
    }

    /// PERT expected hours for this task.
    pub fn expected(&self) -> f64 {
        self.estimates.expected()
    }
}

/// Three-point estimate in hours.
///
/// Values are expected to be finite and non-negative; callers check that
/// before dispatching an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimates {
    #[serde(default)]
    pub optimistic: f64,
    #[serde(default)]
    pub most_likely: f64,
    #[serde(default)]
    pub pessimistic: f64,
}

impl Estimates {
    pub fn new(optimistic: f64, most_likely: f64, pessimistic: f64) -> Self {
        Self {
            optimistic,
            most_likely,
            pessimistic,
        }
    }

    pub fn expected(&self) -> f64 {
        pert::expected(self.optimistic, self.most_likely, self.pessimistic)
    }

    pub fn std_dev(&self) -> f64 {
        pert::std_dev(self.optimistic, self.pessimistic)
    }

    pub fn get(&self, kind: EstimateKind) -> f64 {
        match kind {
            EstimateKind::Optimistic => self.optimistic,
            EstimateKind::MostLikely => self.most_likely,
            EstimateKind::Pessimistic => self.pessimistic,
        }
    }

    /// Whether `hours` is acceptable input for an estimate point.
    ///
    /// The store itself takes any value; callers that accept user input check
    /// this first.
    pub fn is_valid_hours(hours: f64) -> bool {
        hours.is_finite() && hours >= 0.0
    }

    /// Overwrite one point. Non-finite values are stored as given but are
    /// written as `null` by the JSON snapshot, which the importer then refuses.
    pub(crate) fn set(&mut self, kind: EstimateKind, value: f64) {
        match kind {
            EstimateKind::Optimistic => self.optimistic = value,
            EstimateKind::MostLikely => self.most_likely = value,
            EstimateKind::Pessimistic => self.pessimistic = value,
        }
    }
}

/// Which of the three estimate points a command addresses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EstimateKind {
    Optimistic,
    MostLikely,
    Pessimistic,
}

impl EstimateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optimistic => "optimistic",
            Self::MostLikely => "mostLikely",
            Self::Pessimistic => "pessimistic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "optimistic" => Some(Self::Optimistic),
            "mostLikely" => Some(Self::MostLikely),
            "pessimistic" => Some(Self::Pessimistic),
            _ => None,
        }
    }
}

/// A clarifying question attached to a task.
///
/// Entries have no id of their own; they are addressed by index, so removing
/// one shifts every later entry down by one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAndAEntry {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hours() {
        assert!(Estimates::is_valid_hours(0.0));
        assert!(Estimates::is_valid_hours(12.5));
        assert!(!Estimates::is_valid_hours(-0.5));
        assert!(!Estimates::is_valid_hours(f64::NAN));
        assert!(!Estimates::is_valid_hours(f64::INFINITY));
    }
}
