//! The plan store: owner of the single active plan.
//!
//! [`PlanStore`] holds the plan being edited and exposes the only mutation
//! API for it. Every mutation is followed by a write of the whole plan to the
//! current-session key; that write is fire-and-forget, a failure is logged and
//! editing carries on. Manual saves keep a bounded most-recently-used index
//! of snapshots that can be listed and loaded back.
//!
//! ```text
//! ┌──────────────┐   mutate    ┌──────────────┐  auto-persist  ┌──────────────┐
//! │    Shell     │────────────▶│  PlanStore   │───────────────▶│ KeyValueStore│
//! │ (CLI / UI)   │◀────────────│ (active plan)│◀───────────────│  (port)      │
//! └──────────────┘   &Plan     └──────────────┘  save / load   └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use workplan_core::{models::NewTask, storage::MemoryStore, store::PlanStore};
//!
//! let mut store = PlanStore::open(MemoryStore::new());
//! let id = store.add_task(NewTask::titled("Kick-off"));
//! assert_eq!(store.plan().tasks.len(), 1);
//!
//! store.delete_task(&id);
//! assert!(store.plan().tasks.is_empty());
//! ```

use jiff::{Timestamp, civil::Date};
use log::{debug, error, info};

use crate::{
    dates,
    models::{
        Entity, NewTask, Plan, PlanMetadata, SavedPlanEntry, StatusFilter, Task, TaskPatch,
        TaskStats, generate_id,
    },
    storage::{
        CURRENT_PLAN_KEY, KeyValueStore,
        records::{read_index, read_plan, upsert_entry, write_index, write_plan},
        saved_plan_key,
    },
};

pub mod builder;


pub use builder::StoreBuilder;

/// Owner of the active plan and its local persistence.
pub struct PlanStore<S: KeyValueStore> {
    storage: S,
    plan: Plan,
}

impl<S: KeyValueStore> PlanStore<S> {
    /// Opens the store, restoring the last session's plan if there is one.
    pub fn open(storage: S) -> Self {
        let plan = read_plan(&storage, CURRENT_PLAN_KEY).unwrap_or_else(|| {
            debug!("No current session, starting an empty plan");
            Self::create_empty()
        });
        let store = Self { storage, plan };
        store.persist_current();
        store
    }

    /// A fresh, empty plan created today.
    pub fn create_empty() -> Plan {
        Plan::empty(dates::today())
    }

    /// The active plan.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// The underlying persistence port.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Swaps the active plan for `plan`.
    pub fn replace(&mut self, plan: Plan) {
        info!("Replacing active plan with '{}'", plan.id);
        self.plan = plan;
        self.persist_current();
    }

    /// Starts over with an empty plan.
    pub fn reset(&mut self) {
        self.replace(Self::create_empty());
    }

    /// Replaces the active plan with the built-in example.
    pub fn load_example(&mut self, today: Date) {
        self.replace(Plan::example(today));
    }

    /// Replaces the metadata block as a whole.
    pub fn update_metadata(&mut self, metadata: PlanMetadata) {
        self.plan.set_metadata(metadata);
        self.persist_current();
    }

    /// Replaces the issuing entity.
    pub fn update_origin(&mut self, entity: Entity) {
        self.plan.origin = entity;
        self.persist_current();
    }

    /// Replaces the receiving entity.
    pub fn update_destination(&mut self, entity: Entity) {
        self.plan.destination = entity;
        self.persist_current();
    }

    /// Appends a task with a freshly generated id and returns that id.
    pub fn add_task(&mut self, task: NewTask) -> String {
        let mut id = generate_id();
        while self.plan.task(&id).is_some() {
            id = generate_id();
        }
        self.plan.tasks.push(Task::from_new(id.clone(), task));
        self.persist_current();
        id
    }

    /// Merges `patch` into the task with `id`; unknown ids are ignored.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) {
        let Some(task) = self.plan.tasks.iter_mut().find(|t| t.id == id) else {
            debug!("update_task: no task with id '{id}'");
            return;
        };
        task.apply(patch);
        self.persist_current();
    }

    /// Removes the task with `id`; unknown ids are ignored.
    pub fn delete_task(&mut self, id: &str) {
        let before = self.plan.tasks.len();
        self.plan.tasks.retain(|t| t.id != id);
        if self.plan.tasks.len() == before {
            debug!("delete_task: no task with id '{id}'");
            return;
        }
        self.persist_current();
    }

    /// Saves a snapshot of the active plan and records it in the index.
    ///
    /// Returns the index entry written, or `None` if persistence failed (the
    /// failure is logged).
    pub fn save_manual(&self) -> Option<SavedPlanEntry> {
        let entry = SavedPlanEntry::for_plan(&self.plan, Timestamp::now());
        let result = write_plan(&self.storage, &saved_plan_key(&self.plan.id), &self.plan)
            .and_then(|()| {
                let mut index = read_index(&self.storage);
                upsert_entry(&mut index, entry.clone());
                write_index(&self.storage, &index)
            });

        match result {
            Ok(()) => {
                info!("Saved plan '{}' as '{}'", self.plan.id, entry.title);
                Some(entry)
            }
            Err(e) => {
                error!("Failed to save plan '{}': {e}", self.plan.id);
                None
            }
        }
    }

    /// Lists saved plans, most recently added first.
    pub fn list_saved(&self) -> Vec<SavedPlanEntry> {
        read_index(&self.storage)
    }

    /// Reads a saved plan without activating it.
    pub fn load_by_id(&self, id: &str) -> Option<Plan> {
        read_plan(&self.storage, &saved_plan_key(id))
    }

    /// Activates a saved plan. Returns `false` when it cannot be found.
    pub fn load_saved(&mut self, id: &str) -> bool {
        match self.load_by_id(id) {
            Some(plan) => {
                self.replace(plan);
                true
            }
            None => false,
        }
    }

    /// Task counts for the active plan.
    pub fn stats(&self) -> TaskStats {
        TaskStats::from(&self.plan)
    }

    /// Tasks of the active plan that pass `filter`, in insertion order.
    pub fn tasks_matching(&self, filter: StatusFilter) -> Vec<&Task> {
        self.plan
            .tasks
            .iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    fn persist_current(&self) {
        if let Err(e) = write_plan(&self.storage, CURRENT_PLAN_KEY, &self.plan) {
            error!("Auto-save failed for plan '{}': {e}", self.plan.id);
        }
    }
}
