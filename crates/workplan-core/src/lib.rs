//! Core library for the Workplan planning application.
//!
//! A work plan is a structured document: metadata, two counterparty
//! entities and a list of tasks. This crate owns the plan, persists it
//! locally, renders it as HTML and exports it to paginated PDF or a
//! standalone print page.
//!
//! # Architecture
//!
//! - [`store`]: [`PlanStore`], the single owner of the active plan, with
//!   auto-persist and a bounded list of manually saved plans.
//! - [`storage`]: the [`KeyValueStore`](storage::KeyValueStore) port with a
//!   file-backed and an in-memory implementation.
//! - [`render`]: deterministic HTML views of a plan (document and timeline).
//! - [`export`]: the capture, paginate and compose pipeline behind trait
//!   seams, plus concrete backends.
//! - [`display`]: markdown formatting for the terminal.
//! - [`dates`]: parsing and formatting of the plan's ISO date strings.
//!
//! # Quick Start
//!
//! ```rust
//! use workplan_core::{
//!     models::{NewTask, PlanMetadata},
//!     render::DocumentView,
//!     storage::MemoryStore,
//!     store::PlanStore,
//! };
//!
//! let mut store = PlanStore::open(MemoryStore::new());
//! store.update_metadata(PlanMetadata {
//!     title: "Migración".to_string(),
//!     ..Default::default()
//! });
//! store.add_task(NewTask::titled("Inventario").with_dates("2024-01-08", "2024-01-12"));
//!
//! let html = DocumentView(store.plan()).to_string();
//! assert!(html.contains("Migración"));
//!
//! let entry = store.save_manual().expect("in-memory save succeeds");
//! assert_eq!(store.list_saved(), vec![entry]);
//! ```

pub mod dates;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod render;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use display::{Notice, NoticeKind};
pub use error::{Result, WorkplanError};
pub use models::{Entity, NewTask, Plan, PlanMetadata, Task, TaskPatch, TaskPriority, TaskStatus};
pub use store::{PlanStore, StoreBuilder};
