//! Request types for creating and updating models.

use super::{TaskPriority, TaskStatus};

/// Fields of a task at creation time; the id is generated by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub owner: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
}

impl NewTask {
    /// A task with just a title and default status/priority.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the date range.
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }
}

/// Partial task update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub owner: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskPatch {
    /// Whether the patch would change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.owner.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// The plan's metadata block, always replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanMetadata {
    pub title: String,
    pub description: String,
    pub author: String,
    pub start_date: String,
    pub end_date: String,
    pub objectives: String,
}
