//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections with
//! consistent structure and empty collection handling.

use std::fmt;

use crate::{
    dates::{DatePattern, display_date},
    models::{Plan, SavedPlanEntry, Task},
    render::sort_by_start,
};

/// Newtype wrapper for displaying a list of tasks in the given order.
///
/// # Examples
///
/// ```rust
/// use workplan_core::{
///     display::Tasks,
///     models::{NewTask, Task},
/// };
///
/// let task = Task::from_new("a1".to_string(), NewTask::titled("Kick-off"));
/// let output = Tasks(vec![&task]).to_string();
/// assert!(output.contains("Kick-off"));
///
/// assert_eq!(Tasks(Vec::new()).to_string(), "No hay tareas.\n");
/// ```
pub struct Tasks<'a>(pub Vec<&'a Task>);

impl fmt::Display for Tasks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No hay tareas.")
        } else {
            for task in &self.0 {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the saved-plans index.
pub struct SavedPlans(pub Vec<SavedPlanEntry>);

impl SavedPlans {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for SavedPlans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No hay planes guardados.")
        } else {
            for entry in &self.0 {
                write!(f, "{entry}")?;
            }
            Ok(())
        }
    }
}

/// Terminal rendition of the plan timeline: one entry per task in start
/// date order.
pub struct TimelineOutline<'a>(pub &'a Plan);

impl fmt::Display for TimelineOutline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Línea de Tiempo")?;
        writeln!(f)?;
        if self.0.tasks.is_empty() {
            writeln!(f, "Sin tareas. Agrega tareas para ver la línea de tiempo.")?;
            return Ok(());
        }

        for task in sort_by_start(&self.0.tasks) {
            let status = task.status.style();
            write!(
                f,
                "- **{} → {}** {} {}",
                display_date(&task.start_date, DatePattern::DayMonth),
                display_date(&task.end_date, DatePattern::DayMonth),
                status.icon,
                task.title
            )?;
            match task.duration_days() {
                0 => {}
                1 => write!(f, " _(1 día)_")?,
                days => write!(f, " _({days} días)_")?,
            }
            if !task.owner.is_empty() {
                write!(f, " · {}", task.owner)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
