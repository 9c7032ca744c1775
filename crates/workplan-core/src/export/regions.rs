//! Region host backed by pre-rendered plan views.

use std::sync::Mutex;

use log::debug;

use super::{A4_CSS_WIDTH, Region, RegionHost, RegionKind};
use crate::{
    models::Plan,
    render::{DocumentView, TimelineView},
};

/// Holds the document and timeline markup of one plan and tracks which
/// region is visible.
///
/// The editor region has no markup, so a host that starts there must switch
/// before anything can be captured.
pub struct PlanRegions {
    document: String,
    timeline: String,
    active: Mutex<RegionKind>,
}

impl PlanRegions {
    /// Renders both views of `plan`; `active` is the initially visible region.
    pub fn render(plan: &Plan, active: RegionKind) -> Self {
        Self {
            document: DocumentView(plan).to_string(),
            timeline: TimelineView(plan).to_string(),
            active: Mutex::new(active),
        }
    }
}

impl RegionHost for PlanRegions {
    fn active(&self) -> RegionKind {
        *self.active.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn activate(&self, kind: RegionKind) {
        debug!("Switching to {} region", kind.as_str());
        *self.active.lock().unwrap_or_else(|e| e.into_inner()) = kind;
    }

    fn snapshot(&self, kind: RegionKind) -> Option<Region> {
        let markup = match kind {
            RegionKind::Editor => return None,
            RegionKind::Document => &self.document,
            RegionKind::Timeline => &self.timeline,
        };
        Some(Region {
            kind,
            markup: markup.clone(),
            css_width: A4_CSS_WIDTH,
        })
    }
}
