//! Tests for the export pipeline, run against in-memory fakes.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tokio::{sync::Notify, time::Instant};

use super::*;
use crate::{display::NoticeKind, models::Plan};

struct FakeHost {
    active: Mutex<RegionKind>,
    activations: Mutex<Vec<RegionKind>>,
    mounted: Vec<RegionKind>,
    ignore_activation: bool,
}

impl FakeHost {
    fn new(active: RegionKind) -> Self {
        Self {
            active: Mutex::new(active),
            activations: Mutex::new(Vec::new()),
            mounted: vec![RegionKind::Document, RegionKind::Timeline],
            ignore_activation: false,
        }
    }

    fn without(mut self, kind: RegionKind) -> Self {
        self.mounted.retain(|k| *k != kind);
        self
    }

    fn activations(&self) -> Vec<RegionKind> {
        self.activations.lock().unwrap().clone()
    }
}

impl RegionHost for FakeHost {
    fn active(&self) -> RegionKind {
        *self.active.lock().unwrap()
    }

    fn activate(&self, kind: RegionKind) {
        self.activations.lock().unwrap().push(kind);
        if !self.ignore_activation {
            *self.active.lock().unwrap() = kind;
        }
    }

    fn snapshot(&self, kind: RegionKind) -> Option<Region> {
        self.mounted.contains(&kind).then(|| Region {
            kind,
            markup: format!("<div>{}</div>", kind.as_str()),
            css_width: A4_CSS_WIDTH,
        })
    }
}

#[derive(Default)]
struct FakeCapture {
    sizes: HashMap<RegionKind, (u32, u32)>,
    fail: bool,
    gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<(RegionKind, f64)>>,
    captured_at: Mutex<Vec<Instant>>,
}

impl FakeCapture {
    fn sized(document: (u32, u32), timeline: (u32, u32)) -> Self {
        Self {
            sizes: HashMap::from([
                (RegionKind::Document, document),
                (RegionKind::Timeline, timeline),
            ]),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Capture for FakeCapture {
    async fn capture(&self, region: &Region, scale: f64) -> crate::error::Result<Raster> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.calls.lock().unwrap().push((region.kind, scale));
        self.captured_at.lock().unwrap().push(Instant::now());
        if self.fail {
            return Err(WorkplanError::capture("canvas tainted"));
        }
        let (w, h) = self.sizes[&region.kind];
        Ok(Raster::filled(w, h, [255, 255, 255]))
    }
}

#[derive(Default)]
struct RecordingComposer {
    pages: Mutex<Vec<ComposedPage>>,
}

impl DocumentComposer for RecordingComposer {
    fn compose(&self, _page: PageSize, pages: &[ComposedPage]) -> crate::error::Result<Vec<u8>> {
        *self.pages.lock().unwrap() = pages.to_vec();
        Ok(b"%PDF-fake".to_vec())
    }
}

#[derive(Default)]
struct MemorySink {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
    fail: bool,
}

impl ArtifactSink for MemorySink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> crate::error::Result<PathBuf> {
        if self.fail {
            return Err(WorkplanError::Configuration {
                message: "disk full".to_string(),
            });
        }
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from("/downloads").join(file_name))
    }
}

#[derive(Default)]
struct FakePrintTarget {
    blocked: bool,
    opened: Mutex<Option<String>>,
}

impl PrintTarget for FakePrintTarget {
    fn open(&self, html: &str) -> crate::error::Result<PrintOpen> {
        if self.blocked {
            return Ok(PrintOpen::Blocked);
        }
        *self.opened.lock().unwrap() = Some(html.to_string());
        Ok(PrintOpen::Opened("about:blank".to_string()))
    }
}

struct Fixture {
    host: Arc<FakeHost>,
    capture: Arc<FakeCapture>,
    composer: Arc<RecordingComposer>,
    pipeline: ExportPipeline,
}

fn fixture(host: FakeHost, capture: FakeCapture) -> Fixture {
    timed_fixture(host, capture, ExportTimings::immediate())
}

fn timed_fixture(host: FakeHost, capture: FakeCapture, timings: ExportTimings) -> Fixture {
    let host = Arc::new(host);
    let capture = Arc::new(capture);
    let composer = Arc::new(RecordingComposer::default());
    let pipeline =
        ExportPipeline::new(host.clone(), capture.clone(), composer.clone()).with_timings(timings);
    Fixture {
        host,
        capture,
        composer,
        pipeline,
    }
}

const DOCUMENT_ONLY: ExportOptions = ExportOptions {
    include_timeline: false,
};

#[tokio::test]
async fn test_download_paginates_document() {
    let fx = fixture(
        FakeHost::new(RegionKind::Editor),
        FakeCapture::sized((1000, 3000), (1000, 500)),
    );
    let sink = MemorySink::default();

    let outcome = fx
        .pipeline
        .download("Q1 Plan: Phase/1", DOCUMENT_ONLY, &sink)
        .await;

    assert_eq!(
        outcome,
        ExportOutcome::Saved {
            file_name: "Q1_Plan__Phase_1.pdf".to_string(),
            location: PathBuf::from("/downloads/Q1_Plan__Phase_1.pdf"),
            pages: 3,
        }
    );
    assert_eq!(fx.composer.pages.lock().unwrap().len(), 3);
    assert_eq!(sink.saved.lock().unwrap()[0].1, b"%PDF-fake");
    assert_eq!(
        *fx.capture.calls.lock().unwrap(),
        vec![(RegionKind::Document, CAPTURE_SCALE)]
    );
    assert_eq!(fx.host.active(), RegionKind::Editor);
    assert!(!fx.pipeline.is_generating());
}

#[tokio::test]
async fn test_download_timeline_starts_on_new_page() {
    let fx = fixture(
        FakeHost::new(RegionKind::Document),
        FakeCapture::sized((1000, 1000), (1000, 500)),
    );
    let sink = MemorySink::default();

    let outcome = fx
        .pipeline
        .download("Plan", ExportOptions::default(), &sink)
        .await;

    assert!(matches!(outcome, ExportOutcome::Saved { pages: 2, .. }));
    let pages = fx.composer.pages.lock().unwrap();
    assert_eq!(pages[0].image.raster.height, 1000);
    assert_eq!(pages[1].image.raster.height, 500);
    assert_eq!(pages[1].image.y_mm, 0.0);
    assert_eq!(
        fx.host.activations(),
        vec![
            RegionKind::Document,
            RegionKind::Timeline,
            RegionKind::Document
        ]
    );
}

#[tokio::test]
async fn test_download_skips_missing_timeline() {
    let fx = fixture(
        FakeHost::new(RegionKind::Document).without(RegionKind::Timeline),
        FakeCapture::sized((1000, 1000), (1000, 500)),
    );
    let sink = MemorySink::default();

    let outcome = fx
        .pipeline
        .download("Plan", ExportOptions::default(), &sink)
        .await;
    assert!(matches!(outcome, ExportOutcome::Saved { pages: 1, .. }));
}

#[tokio::test]
async fn test_capture_failure_resets_state() {
    let fx = fixture(
        FakeHost::new(RegionKind::Editor),
        FakeCapture {
            fail: true,
            ..FakeCapture::sized((10, 10), (10, 10))
        },
    );
    let sink = MemorySink::default();

    let outcome = fx
        .pipeline
        .download("Plan", ExportOptions::default(), &sink)
        .await;

    assert!(matches!(
        outcome,
        ExportOutcome::Failed {
            stage: FailureStage::Capture,
            ..
        }
    ));
    assert!(!fx.pipeline.is_generating());
    assert!(sink.saved.lock().unwrap().is_empty());
    assert_eq!(fx.host.active(), RegionKind::Editor);

    let notice = outcome.notice();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.title, "Error al generar PDF");

    // A later export is not blocked by the failed one
    let retry = fixture(
        FakeHost::new(RegionKind::Editor),
        FakeCapture::sized((10, 10), (10, 10)),
    );
    let outcome = retry.pipeline.download("Plan", DOCUMENT_ONLY, &sink).await;
    assert!(matches!(outcome, ExportOutcome::Saved { .. }));
}

#[tokio::test]
async fn test_missing_document_region_fails_capture() {
    let fx = fixture(
        FakeHost::new(RegionKind::Editor).without(RegionKind::Document),
        FakeCapture::sized((10, 10), (10, 10)),
    );
    let outcome = fx
        .pipeline
        .download("Plan", DOCUMENT_ONLY, &MemorySink::default())
        .await;

    assert!(matches!(
        outcome,
        ExportOutcome::Failed {
            stage: FailureStage::Capture,
            ..
        }
    ));
    assert!(fx.capture.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_save_failure() {
    let fx = fixture(
        FakeHost::new(RegionKind::Document),
        FakeCapture::sized((10, 10), (10, 10)),
    );
    let sink = MemorySink {
        fail: true,
        ..Default::default()
    };

    let outcome = fx.pipeline.download("Plan", DOCUMENT_ONLY, &sink).await;
    assert!(matches!(
        outcome,
        ExportOutcome::Failed {
            stage: FailureStage::Save,
            ..
        }
    ));
    assert!(!fx.pipeline.is_generating());
}

#[tokio::test]
async fn test_second_export_while_generating_is_busy() {
    let gate = Arc::new(Notify::new());
    let fx = fixture(
        FakeHost::new(RegionKind::Document),
        FakeCapture {
            gate: Some(gate.clone()),
            ..FakeCapture::sized((10, 10), (10, 10))
        },
    );
    let first_sink = MemorySink::default();
    let second_sink = MemorySink::default();

    let (first, second) = tokio::join!(
        fx.pipeline.download("Plan", DOCUMENT_ONLY, &first_sink),
        async {
            let outcome = fx.pipeline.download("Plan", DOCUMENT_ONLY, &second_sink).await;
            gate.notify_one();
            outcome
        }
    );

    assert!(matches!(first, ExportOutcome::Saved { .. }));
    assert_eq!(second, ExportOutcome::Busy);
    assert_eq!(second.notice().kind, NoticeKind::Info);
    assert!(second_sink.saved.lock().unwrap().is_empty());
    assert!(!fx.pipeline.is_generating());
}

#[tokio::test]
async fn test_print_switches_to_document_first() {
    let fx = fixture(
        FakeHost::new(RegionKind::Editor),
        FakeCapture::default(),
    );
    let target = FakePrintTarget::default();

    let outcome = fx
        .pipeline
        .print("Q1", ExportOptions::default(), &target)
        .await;

    assert_eq!(
        outcome,
        ExportOutcome::Printed {
            location: "about:blank".to_string()
        }
    );
    assert_eq!(fx.host.activations(), vec![RegionKind::Document]);

    let html = target.opened.lock().unwrap().clone().unwrap();
    let document = html.find("<div>document</div>").unwrap();
    let timeline = html.find("<div>timeline</div>").unwrap();
    assert!(document < timeline);
    assert!(html.contains("wp-page-break"));
    assert!(fx.capture.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_print_without_timeline() {
    let fx = fixture(FakeHost::new(RegionKind::Document), FakeCapture::default());
    let target = FakePrintTarget::default();

    fx.pipeline.print("Q1", DOCUMENT_ONLY, &target).await;

    let html = target.opened.lock().unwrap().clone().unwrap();
    assert!(html.contains("<div>document</div>"));
    assert!(!html.contains("<div>timeline</div>"));
    assert!(fx.host.activations().is_empty());
}

#[tokio::test]
async fn test_print_popup_blocked() {
    let fx = fixture(FakeHost::new(RegionKind::Document), FakeCapture::default());
    let target = FakePrintTarget {
        blocked: true,
        ..Default::default()
    };

    let outcome = fx
        .pipeline
        .print("Q1", ExportOptions::default(), &target)
        .await;

    assert_eq!(outcome, ExportOutcome::PopupBlocked);
    let notice = outcome.notice();
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert_eq!(notice.title, "Ventana bloqueada");
    assert!(!fx.pipeline.is_generating());
}

#[tokio::test]
async fn test_print_retry_is_bounded() {
    let mut host = FakeHost::new(RegionKind::Editor);
    host.ignore_activation = true;
    let fx = fixture(host, FakeCapture::default());
    let target = FakePrintTarget::default();

    let outcome = fx
        .pipeline
        .print("Q1", ExportOptions::default(), &target)
        .await;

    assert!(matches!(
        outcome,
        ExportOutcome::Failed {
            stage: FailureStage::Print,
            ..
        }
    ));
    assert_eq!(
        fx.host.activations().len(),
        ExportTimings::default().print_attempts as usize - 1
    );
    assert!(target.opened.lock().unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_download_waits_for_regions_to_settle() {
    let timings = ExportTimings::default();
    let fx = timed_fixture(
        FakeHost::new(RegionKind::Editor),
        FakeCapture::sized((1000, 1000), (1000, 500)),
        timings,
    );
    let sink = MemorySink::default();
    let start = Instant::now();

    let outcome = fx
        .pipeline
        .download("Plan", ExportOptions::default(), &sink)
        .await;

    assert!(matches!(outcome, ExportOutcome::Saved { pages: 2, .. }));
    let settle = timings.region_settle + timings.capture_reflow;
    let captured_at = fx.capture.captured_at.lock().unwrap().clone();
    assert_eq!(captured_at.len(), 2);
    assert!(captured_at[0] - start >= settle);
    assert!(captured_at[1] - captured_at[0] >= settle);
    assert!(start.elapsed() >= settle * 2 + timings.restore);
}

#[tokio::test(start_paused = true)]
async fn test_print_waits_after_switching_region() {
    let timings = ExportTimings::default();
    let fx = timed_fixture(
        FakeHost::new(RegionKind::Editor),
        FakeCapture::default(),
        timings,
    );
    let target = FakePrintTarget::default();
    let start = Instant::now();

    let outcome = fx.pipeline.print("Q1", DOCUMENT_ONLY, &target).await;

    assert!(matches!(outcome, ExportOutcome::Printed { .. }));
    assert!(start.elapsed() >= timings.print_retry);
    assert!(fx.capture.calls.lock().unwrap().is_empty());
}

#[test]
fn test_plan_regions_host() {
    let plan = Plan::example(jiff::civil::date(2024, 1, 1));
    let host = PlanRegions::render(&plan, RegionKind::Editor);

    assert_eq!(host.active(), RegionKind::Editor);
    assert!(host.snapshot(RegionKind::Editor).is_none());

    let document = host.snapshot(RegionKind::Document).unwrap();
    assert!(document.markup.contains(crate::render::DOCUMENT_REGION_ID));
    let timeline = host.snapshot(RegionKind::Timeline).unwrap();
    assert!(timeline.markup.contains("Línea de Tiempo"));

    host.activate(RegionKind::Timeline);
    assert_eq!(host.active(), RegionKind::Timeline);
}
