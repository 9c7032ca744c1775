//! Summary types: saved-plan index entries and task statistics.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, Task, TaskStatus};

/// Title stored in the index for plans saved without one.
pub const UNTITLED: &str = "Sin título";

/// Denormalized index entry used to list saved plans without loading them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedPlanEntry {
    /// Id of the saved plan
    pub id: String,
    /// Title at the time of saving
    #[serde(rename = "titulo")]
    pub title: String,
    /// When the plan was saved (UTC)
    #[serde(rename = "fecha")]
    pub saved_at: Timestamp,
}

impl SavedPlanEntry {
    /// Snapshot `plan` as saved at `saved_at`.
    pub fn for_plan(plan: &Plan, saved_at: Timestamp) -> Self {
        let title = if plan.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            plan.title.clone()
        };
        Self {
            id: plan.id.clone(),
            title,
            saved_at,
        }
    }
}

/// Task counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
}

impl TaskStats {
    /// Number of tasks with the given status.
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Completed => self.completed,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Pending => self.pending,
        }
    }
}

impl<'a> FromIterator<&'a Task> for TaskStats {
    fn from_iter<I: IntoIterator<Item = &'a Task>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Pending => stats.pending += 1,
            }
            stats
        })
    }
}

impl From<&Plan> for TaskStats {
    fn from(plan: &Plan) -> Self {
        plan.tasks.iter().collect()
    }
}
