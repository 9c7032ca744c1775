//! The download and print paths.

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use log::{debug, error, info, warn};
use tokio::time::sleep;

use super::{
    ArtifactSink, Capture, ComposedPage, DocumentComposer, ExportOptions, ExportTimings, PageSize,
    PrintOpen, PrintTarget, Raster, RegionHost, RegionKind, export_file_name, paginate,
    print_document,
};
use crate::{
    display::Notice,
    error::{Result, WorkplanError},
};

/// Device pixels per CSS pixel used for captures.
pub const CAPTURE_SCALE: f64 = 2.0;

/// Step at which an export failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Capture,
    Compose,
    Save,
    Print,
}

/// How an export request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The artifact was written.
    Saved {
        file_name: String,
        location: PathBuf,
        pages: usize,
    },
    /// The print document was opened.
    Printed { location: String },
    /// A step failed; the error has been logged.
    Failed { stage: FailureStage, message: String },
    /// The print context could not be opened.
    PopupBlocked,
    /// Another export was still running.
    Busy,
}

impl ExportOutcome {
    /// The notice to show the user for this outcome.
    pub fn notice(&self) -> Notice {
        match self {
            ExportOutcome::Saved { file_name, .. } => Notice::success(
                "PDF descargado",
                format!("El archivo \"{file_name}\" se descargó correctamente."),
            ),
            ExportOutcome::Printed { location } => Notice::info(
                "Documento de impresión listo",
                format!("Abre {location} en el navegador para imprimir."),
            ),
            ExportOutcome::Failed {
                stage: FailureStage::Print,
                ..
            } => Notice::error(
                "Error al imprimir",
                "No se pudo preparar el documento de impresión. Intenta nuevamente.",
            ),
            ExportOutcome::Failed { .. } => Notice::error(
                "Error al generar PDF",
                "No se pudo crear el archivo PDF. Verifica que el plan tenga contenido e intenta \
                 nuevamente.",
            ),
            ExportOutcome::PopupBlocked => Notice::warning(
                "Ventana bloqueada",
                "El navegador bloqueó la ventana de impresión. Permite las ventanas emergentes \
                 para este sitio e intenta nuevamente.",
            ),
            ExportOutcome::Busy => Notice::info(
                "Exportación en curso",
                "Espera a que termine la exportación actual.",
            ),
        }
    }
}

/// Holds the `generating` flag for the duration of one export.
struct GeneratingGuard<'a>(&'a AtomicBool);

impl<'a> GeneratingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Turns rendered regions into a paginated artifact or a print document.
///
/// Only one export runs at a time; a request made while another is in flight
/// returns [`ExportOutcome::Busy`].
pub struct ExportPipeline {
    host: Arc<dyn RegionHost>,
    capture: Arc<dyn Capture>,
    composer: Arc<dyn DocumentComposer>,
    timings: ExportTimings,
    generating: AtomicBool,
}

impl ExportPipeline {
    pub fn new(
        host: Arc<dyn RegionHost>,
        capture: Arc<dyn Capture>,
        composer: Arc<dyn DocumentComposer>,
    ) -> Self {
        Self {
            host,
            capture,
            composer,
            timings: ExportTimings::default(),
            generating: AtomicBool::new(false),
        }
    }

    pub fn with_timings(mut self, timings: ExportTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Whether an export is currently running.
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::Acquire)
    }

    /// Captures the document (and optionally the timeline), paginates onto
    /// A4 and hands the encoded artifact to `sink`.
    ///
    /// The region that was visible before the export is visible again
    /// afterwards, whatever the outcome.
    pub async fn download(
        &self,
        title: &str,
        options: ExportOptions,
        sink: &dyn ArtifactSink,
    ) -> ExportOutcome {
        let Some(_guard) = GeneratingGuard::acquire(&self.generating) else {
            warn!("Download requested while another export is running");
            return ExportOutcome::Busy;
        };

        let previous = self.host.active();
        let captured = self.capture_pages(options).await;
        self.host.activate(previous);
        sleep(self.timings.restore).await;

        let pages = match captured {
            Ok(pages) => pages,
            Err(e) => return failed(FailureStage::Capture, e),
        };
        let bytes = match self.composer.compose(PageSize::A4, &pages) {
            Ok(bytes) => bytes,
            Err(e) => return failed(FailureStage::Compose, e),
        };

        let file_name = export_file_name(title);
        match sink.save(&file_name, &bytes) {
            Ok(location) => {
                info!(
                    "Exported {} page(s) to {}",
                    pages.len(),
                    location.display()
                );
                ExportOutcome::Saved {
                    file_name,
                    location,
                    pages: pages.len(),
                }
            }
            Err(e) => failed(FailureStage::Save, e),
        }
    }

    /// Builds the standalone print document and opens it through `target`.
    ///
    /// If the document region is not visible, switches to it and retries
    /// after a short delay, up to the configured number of attempts.
    pub async fn print(
        &self,
        title: &str,
        options: ExportOptions,
        target: &dyn PrintTarget,
    ) -> ExportOutcome {
        let Some(_guard) = GeneratingGuard::acquire(&self.generating) else {
            warn!("Print requested while another export is running");
            return ExportOutcome::Busy;
        };

        let mut attempt = 1;
        while self.host.active() != RegionKind::Document {
            if attempt >= self.timings.print_attempts {
                return failed(
                    FailureStage::Print,
                    WorkplanError::RegionUnavailable {
                        region: RegionKind::Document.as_str().to_string(),
                    },
                );
            }
            debug!("Document region hidden, switching before print (attempt {attempt})");
            self.host.activate(RegionKind::Document);
            sleep(self.timings.print_retry).await;
            attempt += 1;
        }

        let Some(document) = self.host.snapshot(RegionKind::Document) else {
            return failed(
                FailureStage::Print,
                WorkplanError::RegionUnavailable {
                    region: RegionKind::Document.as_str().to_string(),
                },
            );
        };
        let timeline = if options.include_timeline {
            let snapshot = self.host.snapshot(RegionKind::Timeline);
            if snapshot.is_none() {
                warn!("Timeline region is not available, printing the document only");
            }
            snapshot
        } else {
            None
        };

        let html = print_document(
            title,
            &document.markup,
            timeline.as_ref().map(|region| region.markup.as_str()),
        );
        match target.open(&html) {
            Ok(PrintOpen::Opened(location)) => {
                info!("Print document opened at {location}");
                ExportOutcome::Printed { location }
            }
            Ok(PrintOpen::Blocked) => {
                warn!("Print context was blocked");
                ExportOutcome::PopupBlocked
            }
            Err(e) => failed(FailureStage::Print, e),
        }
    }

    async fn capture_pages(&self, options: ExportOptions) -> Result<Vec<ComposedPage>> {
        let document = self
            .capture_region(RegionKind::Document)
            .await?
            .ok_or_else(|| WorkplanError::RegionUnavailable {
                region: RegionKind::Document.as_str().to_string(),
            })?;
        let mut pages = paginate(&document, PageSize::A4);

        if options.include_timeline {
            match self.capture_region(RegionKind::Timeline).await? {
                Some(timeline) => pages.extend(paginate(&timeline, PageSize::A4)),
                None => warn!("Timeline region is not available, exporting the document only"),
            }
        }
        Ok(pages)
    }

    async fn capture_region(&self, kind: RegionKind) -> Result<Option<Raster>> {
        self.host.activate(kind);
        sleep(self.timings.region_settle).await;

        let Some(region) = self.host.snapshot(kind) else {
            return Ok(None);
        };
        sleep(self.timings.capture_reflow).await;

        let raster = self.capture.capture(&region, CAPTURE_SCALE).await?;
        debug!(
            "Captured {} region at {}x{}",
            kind.as_str(),
            raster.width,
            raster.height
        );
        Ok(Some(raster))
    }
}

fn failed(stage: FailureStage, e: WorkplanError) -> ExportOutcome {
    error!("Export failed at {stage:?}: {e}");
    ExportOutcome::Failed {
        stage,
        message: e.to_string(),
    }
}
