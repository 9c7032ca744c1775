//! Terminal formatting of plans and operation feedback.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and contextual views are newtype wrappers. Everything here
//! produces markdown that the CLI renders to the terminal.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers and    │    │   Markdown      │
//! │  (Plan, Task)   │───▶│ Notices         │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: `Tasks`, `SavedPlans`, `TimelineOutline`
//! - [`notice`]: user-facing operation feedback (`Notice`)
//! - [`datetime`]: timestamp formatting
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use workplan_core::display::Notice;
//!
//! let notice = Notice::success("Plan guardado", "Se guardó el plan.");
//! assert!(notice.to_string().starts_with("✓ **Plan guardado**"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod notice;

pub use collections::{SavedPlans, Tasks, TimelineOutline};
pub use datetime::LocalDateTime;
pub use notice::{Notice, NoticeKind};
