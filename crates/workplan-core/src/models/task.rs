//! Task model definition and related functionality.

use serde::{Deserialize, Serialize};

use super::{NewTask, TaskPatch, TaskPriority, TaskStatus};
use crate::dates;

/// Represents an individual task within a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Task {
    /// Identifier, unique within the owning plan and never changed
    pub id: String,

    /// Brief title of the task
    #[serde(rename = "titulo")]
    pub title: String,

    /// Free-text description
    #[serde(rename = "descripcion")]
    pub description: String,

    /// ISO start date, empty when unset
    #[serde(rename = "fechaInicio")]
    pub start_date: String,

    /// ISO end date, empty when unset
    #[serde(rename = "fechaFin")]
    pub end_date: String,

    /// Person responsible for the task
    #[serde(rename = "responsable")]
    pub owner: String,

    /// Current status of the task
    #[serde(rename = "estado")]
    pub status: TaskStatus,

    /// Priority of the task
    #[serde(rename = "prioridad")]
    pub priority: TaskPriority,
}

impl Task {
    /// Builds a task from creation fields and a freshly generated id.
    pub fn from_new(id: String, new: NewTask) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            owner: new.owner,
            status: new.status,
            priority: new.priority,
        }
    }

    /// Merges the set fields of `patch` into this task. The id is untouched.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }

    /// Inclusive duration in days, 0 when the range is missing or inverted.
    pub fn duration_days(&self) -> u32 {
        dates::task_duration(&self.start_date, &self.end_date)
    }
}
