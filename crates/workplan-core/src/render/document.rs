//! The formal plan document.

use std::fmt::{self, Display, Formatter};

use super::{
    html::{Escaped, or_fallback},
    sort_by_start,
    style::{priority_class, status_class},
};
use crate::{
    dates::{DatePattern, display_date},
    models::{Entity, Plan, Task},
};

/// Element id of the document region.
pub const DOCUMENT_REGION_ID: &str = "plan-preview-content";

const DEFAULT_TITLE: &str = "Plan de Trabajo";

/// Renders the plan as a printable document.
///
/// Tasks are numbered in start-date order (see [`sort_by_start`]). Narrative
/// sections and the entities panel are left out entirely when they have
/// nothing to show.
pub struct DocumentView<'a>(pub &'a Plan);

impl Display for DocumentView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        writeln!(f, "<div class=\"wp-document\" id=\"{DOCUMENT_REGION_ID}\">")?;
        write_header(f, plan)?;

        if plan.origin.is_present() || plan.destination.is_present() {
            writeln!(f, "<section class=\"wp-entities\">")?;
            writeln!(f, "<h3 class=\"wp-entities-head\">Partes Involucradas</h3>")?;
            writeln!(f, "<div class=\"wp-entity-grid\">")?;
            let both = plan.origin.is_present() && plan.destination.is_present();
            if plan.origin.is_present() {
                write_entity(f, "Empresa Emisora", &plan.origin)?;
            }
            if both {
                writeln!(f, "<div class=\"wp-divider\"></div>")?;
            }
            if plan.destination.is_present() {
                write_entity(f, "Empresa Destinataria", &plan.destination)?;
            }
            writeln!(f, "</div>\n</section>")?;
        }

        write_text_section(f, "Descripción", &plan.description)?;
        write_text_section(f, "Objetivos", &plan.objectives)?;

        writeln!(f, "<section class=\"wp-section\">")?;
        writeln!(f, "<h2 class=\"wp-section-head\">Plan de Acción</h2>")?;
        if plan.tasks.is_empty() {
            writeln!(f, "<p class=\"wp-empty\">No hay tareas definidas</p>")?;
        } else {
            writeln!(f, "<div class=\"wp-tasks\">")?;
            for (index, task) in sort_by_start(&plan.tasks).into_iter().enumerate() {
                write_task(f, index + 1, task)?;
            }
            writeln!(f, "</div>")?;
        }
        writeln!(f, "</section>")?;

        writeln!(
            f,
            "<footer class=\"wp-footer\">Plan de Trabajo generado con Workplan</footer>"
        )?;
        writeln!(f, "</div>")
    }
}

fn write_header(f: &mut Formatter<'_>, plan: &Plan) -> fmt::Result {
    writeln!(f, "<header class=\"wp-header\">")?;
    writeln!(f, "<div class=\"wp-header-row\">")?;
    writeln!(f, "<div class=\"wp-logo\">☰</div>")?;
    writeln!(
        f,
        "<div><h1 class=\"wp-title\">{}</h1>",
        Escaped(or_fallback(&plan.title, DEFAULT_TITLE))
    )?;
    writeln!(
        f,
        "<p class=\"wp-subtitle\">Creado el {}</p></div>",
        Escaped(&display_date(&plan.created_on, DatePattern::DayMonthYear))
    )?;
    writeln!(f, "</div>")?;

    writeln!(f, "<div class=\"wp-meta\">")?;
    if !plan.author.trim().is_empty() {
        writeln!(
            f,
            "<span class=\"wp-meta-item\">👤 {}</span>",
            Escaped(&plan.author)
        )?;
    }
    if !plan.start_date.is_empty() || !plan.end_date.is_empty() {
        write!(
            f,
            "<span class=\"wp-meta-item\">📅 {}",
            Escaped(&display_date(&plan.start_date, DatePattern::DayMonthYear))
        )?;
        if !plan.end_date.is_empty() {
            write!(
                f,
                " – {}",
                Escaped(&display_date(&plan.end_date, DatePattern::DayMonthYear))
            )?;
        }
        writeln!(f, "</span>")?;
    }
    let count = plan.tasks.len();
    writeln!(
        f,
        "<span class=\"wp-meta-item\">☰ {count} {}</span>",
        if count == 1 { "tarea" } else { "tareas" }
    )?;
    writeln!(f, "</div>\n</header>")
}

fn write_entity(f: &mut Formatter<'_>, label: &str, entity: &Entity) -> fmt::Result {
    writeln!(f, "<div class=\"wp-entity\">")?;
    writeln!(f, "<h4 class=\"wp-entity-label\">{label}</h4>")?;
    writeln!(
        f,
        "<p class=\"wp-entity-name\">{}</p>",
        Escaped(&entity.name)
    )?;
    let rows = [
        ("RUT", &entity.tax_id),
        ("Dirección", &entity.address),
        ("Tel", &entity.phone),
        ("Email", &entity.email),
        ("Contacto", &entity.contact),
    ];
    for (name, value) in rows {
        if !value.trim().is_empty() {
            writeln!(
                f,
                "<p class=\"wp-entity-row\">{name}: {}</p>",
                Escaped(value)
            )?;
        }
    }
    writeln!(f, "</div>")
}

fn write_text_section(f: &mut Formatter<'_>, heading: &str, text: &str) -> fmt::Result {
    if text.trim().is_empty() {
        return Ok(());
    }
    writeln!(f, "<section class=\"wp-section\">")?;
    writeln!(f, "<h2 class=\"wp-section-head\">{heading}</h2>")?;
    writeln!(f, "<p class=\"wp-section-text\">{}</p>", Escaped(text))?;
    writeln!(f, "</section>")
}

fn write_task(f: &mut Formatter<'_>, number: usize, task: &Task) -> fmt::Result {
    let priority = task.priority.style();
    let status = task.status.style();

    writeln!(
        f,
        "<article class=\"wp-task\" data-task-id=\"{}\">",
        Escaped(&task.id)
    )?;
    writeln!(f, "<div class=\"wp-task-num\">{number}</div>")?;
    writeln!(f, "<div class=\"wp-task-body\">")?;
    writeln!(f, "<div class=\"wp-task-top\">")?;
    writeln!(f, "<h4 class=\"wp-task-title\">{}</h4>", Escaped(&task.title))?;
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
        "<span class=\"wp-badge {}\">{} {}</span>",
        status_class(task.status),
        status.icon,
        status.label
    )?;
    writeln!(f, "</div>\n</div>")?;

    if !task.description.trim().is_empty() {
        writeln!(
            f,
            "<p class=\"wp-task-desc\">{}</p>",
            Escaped(&task.description)
        )?;
    }

    writeln!(f, "<div class=\"wp-task-meta\">")?;
    writeln!(
        f,
        "<span>📅 {} – {}</span>",
        Escaped(&display_date(&task.start_date, DatePattern::DayMonth)),
        Escaped(&display_date(&task.end_date, DatePattern::DayMonth))
    )?;
    if !task.owner.trim().is_empty() {
        writeln!(f, "<span>👤 {}</span>", Escaped(&task.owner))?;
    }
    writeln!(f, "</div>\n</div>\n</article>")
}
