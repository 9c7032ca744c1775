//! Status and priority enumerations for tasks.
//!
//! Both enums carry a fixed [`Style`] (label, icon, color). The HTML views,
//! the print stylesheet and the terminal output all read from it, so a status
//! means the same thing wherever it is shown.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed presentation triple for a status or priority value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Human readable label
    pub label: &'static str,
    /// Single-glyph icon
    pub icon: &'static str,
    /// Foreground color (CSS hex)
    pub color: &'static str,
    /// Badge background color (CSS hex)
    pub background: &'static str,
    /// Badge border color (CSS hex)
    pub border: &'static str,
}

/// Type-safe enumeration of task statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    #[serde(rename = "pendiente")]
    Pending,

    /// Being worked on
    #[serde(rename = "en-progreso")]
    InProgress,

    /// Finished
    #[serde(rename = "completada")]
    Completed,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(TaskStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" | "en-progreso" => {
                Ok(TaskStatus::InProgress)
            }
            "completed" | "done" | "completada" => Ok(TaskStatus::Completed),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// All statuses in workflow order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Persisted string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pendiente",
            TaskStatus::InProgress => "en-progreso",
            TaskStatus::Completed => "completada",
        }
    }

    /// Presentation triple for this status.
    pub fn style(&self) -> Style {
        match self {
            TaskStatus::Completed => Style {
                label: "Completada",
                icon: "✓",
                color: "#10b981",
                background: "#d1fae5",
                border: "#a7f3d0",
            },
            TaskStatus::InProgress => Style {
                label: "En Progreso",
                icon: "➤",
                color: "#3b82f6",
                background: "#dbeafe",
                border: "#bfdbfe",
            },
            TaskStatus::Pending => Style {
                label: "Pendiente",
                icon: "○",
                color: "#94a3b8",
                background: "#f1f5f9",
                border: "#e2e8f0",
            },
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use workplan_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Completada");
    /// assert_eq!(TaskStatus::InProgress.with_icon(), "➤ En Progreso");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ Pendiente");
    /// ```
    pub fn with_icon(&self) -> String {
        let style = self.style();
        format!("{} {}", style.icon, style.label)
    }
}

/// Type-safe enumeration of task priorities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TaskPriority {
    #[serde(rename = "alta")]
    High,

    #[default]
    #[serde(rename = "media")]
    Medium,

    #[serde(rename = "baja")]
    Low,
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" | "alta" => Ok(TaskPriority::High),
            "medium" | "media" => Ok(TaskPriority::Medium),
            "low" | "baja" => Ok(TaskPriority::Low),
            _ => Err(format!("Invalid task priority: {s}")),
        }
    }
}

impl TaskPriority {
    /// Persisted string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "alta",
            TaskPriority::Medium => "media",
            TaskPriority::Low => "baja",
        }
    }

    /// Presentation triple for this priority.
    pub fn style(&self) -> Style {
        match self {
            TaskPriority::High => Style {
                label: "Alta",
                icon: "⚑",
                color: "#b91c1c",
                background: "#fee2e2",
                border: "#fecaca",
            },
            TaskPriority::Medium => Style {
                label: "Media",
                icon: "⚑",
                color: "#b45309",
                background: "#fef3c7",
                border: "#fde68a",
            },
            TaskPriority::Low => Style {
                label: "Baja",
                icon: "⚑",
                color: "#047857",
                background: "#d1fae5",
                border: "#a7f3d0",
            },
        }
    }
}
