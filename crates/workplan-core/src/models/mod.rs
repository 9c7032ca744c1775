//! Data models for plans, tasks and entities.
//!
//! This module contains the core domain models of a work plan. Serde names
//! follow the persisted record format (`titulo`, `fechaInicio`, ...) so that
//! saved plans stay readable across versions; Rust field names are English.
//! Display implementations for these models live in [`crate::display`] and
//! the HTML views in [`crate::render`].
//!
//! # Examples
//!
//! ```rust
//! use workplan_core::models::{NewTask, Plan, Task, TaskStatus};
//!
//! let mut plan = Plan::empty(jiff::civil::date(2024, 1, 1));
//! plan.tasks.push(Task::from_new(
//!     "t1".to_string(),
//!     NewTask::titled("Kick-off").with_dates("2024-01-01", "2024-01-05"),
//! ));
//!
//! assert_eq!(plan.tasks[0].status, TaskStatus::Pending);
//! assert_eq!(plan.tasks[0].duration_days(), 5);
//! ```

pub mod entity;
pub mod example;
pub mod filters;
pub mod plan;
pub mod requests;
pub mod status;
pub mod summary;
pub mod task;


pub use entity::Entity;
pub use filters::StatusFilter;
pub use plan::{Plan, generate_id};
pub use requests::{NewTask, PlanMetadata, TaskPatch};
pub use status::{Style, TaskPriority, TaskStatus};
pub use summary::{SavedPlanEntry, TaskStats, UNTITLED};
pub use task::Task;
