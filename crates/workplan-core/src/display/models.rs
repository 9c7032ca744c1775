//! Display implementations for domain models.
//!
//! The Display implementations provide markdown-formatted output for rich
//! terminal display, with status icons and structured sections. HTML output
//! lives in [`crate::render`].

use std::fmt;

use super::{collections::Tasks, datetime::LocalDateTime};
use crate::{
    dates::{DatePattern, display_date},
    models::{Entity, Plan, SavedPlanEntry, Task, TaskPriority, TaskStats, TaskStatus},
    render::sort_by_start,
};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.style().label)
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.style().label)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.title.trim().is_empty() {
            "Plan de Trabajo"
        } else {
            &self.title
        };
        writeln!(f, "# {title}")?;
        writeln!(f)?;

        writeln!(f, "- ID: `{}`", self.id)?;
        if !self.author.is_empty() {
            writeln!(f, "- Autor: {}", self.author)?;
        }
        writeln!(
            f,
            "- Creado: {}",
            display_date(&self.created_on, DatePattern::DayMonthYear)
        )?;
        if !self.start_date.is_empty() || !self.end_date.is_empty() {
            writeln!(
                f,
                "- Periodo: {} – {}",
                display_date(&self.start_date, DatePattern::DayMonthYear),
                display_date(&self.end_date, DatePattern::DayMonthYear)
            )?;
        }
        write!(f, "{}", TaskStats::from(self))?;

        if !self.description.is_empty() {
            writeln!(f, "\n## Descripción\n")?;
            writeln!(f, "{}", self.description)?;
        }
        if !self.objectives.is_empty() {
            writeln!(f, "\n## Objetivos\n")?;
            writeln!(f, "{}", self.objectives)?;
        }

        if self.origin.is_present() || self.destination.is_present() {
            writeln!(f, "\n## Partes Involucradas")?;
            if self.origin.is_present() {
                writeln!(f, "\n### Empresa Emisora\n")?;
                write!(f, "{}", self.origin)?;
            }
            if self.destination.is_present() {
                writeln!(f, "\n### Empresa Destinataria\n")?;
                write!(f, "{}", self.destination)?;
            }
        }

        writeln!(f, "\n## Plan de Acción\n")?;
        write!(f, "{}", Tasks(sort_by_start(&self.tasks)))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**{}**", self.name)?;
        let rows = [
            ("RUT", &self.tax_id),
            ("Dirección", &self.address),
            ("Teléfono", &self.phone),
            ("Email", &self.email),
            ("Contacto", &self.contact),
        ];
        for (label, value) in rows {
            if !value.is_empty() {
                writeln!(f, "- {label}: {value}")?;
            }
        }
        Ok(())
    }
}

impl Task {
    /// Format the task using the compact terminal format.
    fn fmt_task(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.title, self.status.with_icon())?;
        writeln!(f)?;
        writeln!(f, "- ID: `{}`", self.id)?;

        let priority = self.priority.style();
        writeln!(f, "- Prioridad: {} {}", priority.icon, priority.label)?;

        write!(
            f,
            "- Fechas: {} – {}",
            display_date(&self.start_date, DatePattern::DayMonth),
            display_date(&self.end_date, DatePattern::DayMonth)
        )?;
        match self.duration_days() {
            0 => writeln!(f)?,
            1 => writeln!(f, " (1 día)")?,
            days => writeln!(f, " ({days} días)")?,
        }

        if !self.owner.is_empty() {
            writeln!(f, "- Responsable: {}", self.owner)?;
        }
        writeln!(f)?;

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_task(f)
    }
}

impl fmt::Display for SavedPlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.title, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Guardado**: {}", LocalDateTime(&self.saved_at))?;
        writeln!(f)
    }
}

impl fmt::Display for TaskStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- Tareas: {} ({} {} · {} {} · {} {})",
            self.total,
            TaskStatus::Completed.style().icon,
            self.completed,
            TaskStatus::InProgress.style().icon,
            self.in_progress,
            TaskStatus::Pending.style().icon,
            self.pending
        )
    }
}
