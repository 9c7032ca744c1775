//! The chronological timeline.

use std::fmt::{self, Display, Formatter};

use super::{
    html::Escaped,
    sort_by_start,
    style::{dot_class, priority_class},
};
use crate::{
    dates::{DatePattern, display_date},
    models::{Plan, Task},
};

/// Element id of the timeline region.
pub const TIMELINE_REGION_ID: &str = "plan-timeline-content";

/// Renders the plan's tasks as a vertical timeline.
///
/// Cards alternate sides of the spine starting on the left, in start-date
/// order. A card shows a duration badge only when the task has a non-zero
/// inclusive day count.
pub struct TimelineView<'a>(pub &'a Plan);

impl Display for TimelineView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<div class=\"wp-timeline\" id=\"{TIMELINE_REGION_ID}\">")?;
        writeln!(f, "<h2 class=\"wp-timeline-heading\">Línea de Tiempo</h2>")?;

        if self.0.tasks.is_empty() {
            writeln!(f, "<div class=\"wp-timeline-empty\">")?;
            writeln!(f, "<h3>Sin tareas</h3>")?;
            writeln!(f, "<p>Agrega tareas para ver la línea de tiempo</p>")?;
            return writeln!(f, "</div>\n</div>");
        }

        writeln!(f, "<div class=\"wp-timeline-track\">")?;
        writeln!(f, "<div class=\"wp-spine\"></div>")?;
        writeln!(f, "<div class=\"wp-timeline-items\">")?;
        for (index, task) in sort_by_start(&self.0.tasks).into_iter().enumerate() {
            write_item(f, index, task)?;
        }
        writeln!(f, "</div>\n</div>\n</div>")
    }
}

fn write_item(f: &mut Formatter<'_>, index: usize, task: &Task) -> fmt::Result {
    let side = if index % 2 == 0 { "left" } else { "right" };
    let status = task.status.style();
    let priority = task.priority.style();
    let duration = task.duration_days();

    writeln!(
        f,
        "<div class=\"wp-timeline-item wp-side-{side}\" data-task-id=\"{}\">",
        Escaped(&task.id)
    )?;
    writeln!(
        f,
        "<div class=\"wp-dot {}\" title=\"{}\">{}</div>",
        dot_class(task.status),
        status.label,
        status.icon
    )?;
    writeln!(f, "<div class=\"wp-timeline-card-wrap\">")?;
    writeln!(f, "<div class=\"wp-timeline-card\">")?;
    writeln!(f, "<h4 class=\"wp-task-title\">{}</h4>", Escaped(&task.title))?;
    if !task.description.trim().is_empty() {
        writeln!(
            f,
            "<p class=\"wp-task-desc\">{}</p>",
            Escaped(&task.description)
        )?;
    }

    writeln!(f, "<div class=\"wp-badges\">")?;
    writeln!(
        f,
        "<span class=\"wp-badge {}\">{} {}</span>",
        priority_class(task.priority),
        priority.icon,
        priority.label
    )?;
    writeln!(
        f,
        "<span class=\"wp-badge wp-badge-dates\">📅 {} - {}</span>",
        Escaped(&display_date(&task.start_date, DatePattern::DayMonth)),
        Escaped(&display_date(&task.end_date, DatePattern::DayMonth))
    )?;
    if duration > 0 {
        writeln!(
            f,
            "<span class=\"wp-badge wp-badge-duration\">⏱ {duration} {}</span>",
            if duration == 1 { "día" } else { "días" }
        )?;
    }
    if !task.owner.trim().is_empty() {
        writeln!(
            f,
            "<span class=\"wp-badge wp-badge-owner\">👤 {}</span>",
            Escaped(&task.owner)
        )?;
    }
    writeln!(f, "</div>")?;

    writeln!(f, "</div>\n</div>")?;
    writeln!(f, "<div class=\"wp-timeline-spacer\"></div>")?;
    writeln!(f, "</div>")
}
