//! Export of a rendered plan to a paginated document and to a print page.
//!
//! The pipeline only orchestrates. Everything that touches the outside world
//! sits behind a trait so it can be swapped for a fake in tests:
//!
//! - [`RegionHost`]: which rendered region is visible, and its markup.
//! - [`Capture`]: rasterizes a region.
//! - [`DocumentComposer`]: lays rasters out on pages and encodes the artifact.
//! - [`ArtifactSink`]: stores the finished artifact.
//! - [`PrintTarget`]: opens a print document in a new viewing context.
//!
//! ```text
//! ┌────────────┐ snapshot ┌─────────┐ raster ┌──────────┐ pages ┌──────────┐ bytes ┌──────┐
//! │ RegionHost │─────────▶│ Capture │───────▶│ paginate │──────▶│ Composer │──────▶│ Sink │
//! └────────────┘          └─────────┘        └──────────┘       └──────────┘       └──────┘
//! ```
//!
//! Concrete backends used by the CLI live alongside the traits:
//! [`PlanRegions`], [`CommandCapture`], [`PdfComposer`], [`DirectorySink`] and
//! [`FilePrintTarget`].

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;

use crate::{
    error::{Result, WorkplanError},
    render::{DOCUMENT_REGION_ID, TIMELINE_REGION_ID},
};

pub mod bmp;
mod capture;
mod filename;
mod paginate;
mod pdf;
mod pipeline;
mod print;
mod regions;
mod sink;

#[cfg(test)]
mod tests;

pub use capture::{CommandCapture, DEFAULT_CAPTURE_PROGRAM};
pub use filename::{FALLBACK_FILE_STEM, export_file_name};
pub use paginate::{MAX_PAGES_PER_SECTION, paginate};
pub use pdf::PdfComposer;
pub use pipeline::{CAPTURE_SCALE, ExportOutcome, ExportPipeline, FailureStage};
pub use print::{print_document, print_stylesheet};
pub use regions::PlanRegions;
pub use sink::{DirectorySink, FilePrintTarget};

/// The rendered regions a user can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// The editing forms; never exported.
    Editor,
    /// The formal plan document.
    Document,
    /// The chronological timeline.
    Timeline,
}

impl RegionKind {
    /// DOM id of the region's root element, if it is exportable.
    pub fn element_id(&self) -> Option<&'static str> {
        match self {
            RegionKind::Editor => None,
            RegionKind::Document => Some(DOCUMENT_REGION_ID),
            RegionKind::Timeline => Some(TIMELINE_REGION_ID),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::Editor => "editor",
            RegionKind::Document => "document",
            RegionKind::Timeline => "timeline",
        }
    }
}

/// A snapshot of a rendered region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    /// HTML fragment of the region.
    pub markup: String,
    /// Layout width in CSS pixels.
    pub css_width: u32,
}

/// CSS pixel width of an A4 page at 96 dpi.
pub const A4_CSS_WIDTH: u32 = 794;

/// An 8-bit RGB image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Wraps RGB pixel data, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(WorkplanError::capture(format!(
                "raster of {width}x{height} needs {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A raster filled with one color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Copies `rows` rows starting at `top`, clamped to the image.
    pub fn crop_rows(&self, top: u32, rows: u32) -> Raster {
        let top = top.min(self.height);
        let rows = rows.min(self.height - top);
        let stride = self.width as usize * 3;
        let start = top as usize * stride;
        let end = start + rows as usize * stride;
        Raster {
            width: self.width,
            height: rows,
            pixels: self.pixels[start..end].to_vec(),
        }
    }
}

/// Physical page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    /// Portrait A4.
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

/// A raster placed on a page, positioned from the top-left corner in mm.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub raster: Raster,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

/// One output page.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPage {
    pub image: PlacedImage,
}

/// What to include in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_timeline: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_timeline: true,
        }
    }
}

/// Settle delays observed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTimings {
    /// Wait after switching regions before snapshotting.
    pub region_settle: Duration,
    /// Wait between snapshot and capture.
    pub capture_reflow: Duration,
    /// Wait after restoring the previously visible region.
    pub restore: Duration,
    /// Wait before retrying print after switching to the document.
    pub print_retry: Duration,
    /// Maximum print attempts, including the first.
    pub print_attempts: u32,
}

impl Default for ExportTimings {
    fn default() -> Self {
        Self {
            region_settle: Duration::from_millis(400),
            capture_reflow: Duration::from_millis(150),
            restore: Duration::from_millis(100),
            print_retry: Duration::from_millis(300),
            print_attempts: 3,
        }
    }
}

impl ExportTimings {
    /// No delays at all; for tests and headless hosts.
    pub fn immediate() -> Self {
        Self {
            region_settle: Duration::ZERO,
            capture_reflow: Duration::ZERO,
            restore: Duration::ZERO,
            print_retry: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Tracks the visible region and snapshots rendered regions.
pub trait RegionHost: Send + Sync {
    /// The region currently visible.
    fn active(&self) -> RegionKind;

    /// Makes `kind` the visible region.
    fn activate(&self, kind: RegionKind);

    /// Markup of `kind` as currently rendered, or `None` if it is not
    /// mounted.
    fn snapshot(&self, kind: RegionKind) -> Option<Region>;
}

/// Rasterizes a region.
#[async_trait]
pub trait Capture: Send + Sync {
    /// Renders `region` at `scale` device pixels per CSS pixel.
    async fn capture(&self, region: &Region, scale: f64) -> Result<Raster>;
}

/// Encodes pages into a document artifact.
pub trait DocumentComposer: Send + Sync {
    fn compose(&self, page: PageSize, pages: &[ComposedPage]) -> Result<Vec<u8>>;
}

/// Stores a finished artifact and reports where it went.
pub trait ArtifactSink: Send + Sync {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Result of asking a [`PrintTarget`] to open a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOpen {
    /// Opened; the location is shown to the user.
    Opened(String),
    /// The new viewing context was refused.
    Blocked,
}

/// Opens a standalone print document in a new viewing context.
pub trait PrintTarget: Send + Sync {
    fn open(&self, html: &str) -> Result<PrintOpen>;
}
