//! HTML rendering of a plan.
//!
//! Two views are produced from the same [`Plan`](crate::models::Plan):
//!
//! - [`DocumentView`]: the formal plan document (header, entities, narrative
//!   sections and the numbered action list).
//! - [`TimelineView`]: a vertical chronological timeline with cards alternating
//!   left and right of a central spine, ordered by start date.
//!
//! Both are [`Display`](std::fmt::Display) wrappers that write an HTML
//! fragment styled by [`stylesheet`]. They never mutate the plan. Wrap a
//! fragment with [`standalone_page`] to get a complete document that a browser
//! or an external rasterizer can load.

use crate::{dates, models::Task};

pub use crate::dates::task_duration;

mod document;
mod html;
mod style;
mod timeline;

#[cfg(test)]
mod tests;

pub use document::{DOCUMENT_REGION_ID, DocumentView};
pub use html::Escaped;
pub use style::{dot_class, priority_class, status_class, stylesheet};
pub use timeline::{TIMELINE_REGION_ID, TimelineView};

/// Tasks ordered by ascending start date.
///
/// The sort is stable; tasks without a parseable start date go last, keeping
/// their relative order.
pub fn sort_by_start(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|task| {
        let start = dates::parse_date(&task.start_date);
        (start.is_none(), start)
    });
    sorted
}

/// Wraps a rendered fragment in a complete HTML page with the stylesheet
/// inlined.
pub fn standalone_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>\nbody{{margin:0;background:#fff}}\n{}</style>\n</head>\n\
         <body>\n{}</body>\n</html>\n",
        Escaped(title),
        stylesheet(),
        body
    )
}
