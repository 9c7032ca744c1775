//! Local key-value persistence for plans.
//!
//! The store never talks to a concrete backend directly; it goes through the
//! [`KeyValueStore`] port so that tests can swap in [`MemoryStore`] and the
//! CLI can use [`FileStore`]. Values are JSON documents under three kinds of
//! keys:
//!
//! | key                    | value                                   |
//! |------------------------|-----------------------------------------|
//! | `plan-trabajo-current` | the active plan, rewritten on change    |
//! | `plan-trabajo-list`    | up to 10 `{id, titulo, fecha}` entries  |
//! | `plan-<id>`            | a manually saved plan snapshot          |

use crate::error::Result;

pub mod file;
pub mod memory;
pub mod records;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the active session's plan.
pub const CURRENT_PLAN_KEY: &str = "plan-trabajo-current";

/// Key holding the most-recently-saved index.
pub const SAVED_LIST_KEY: &str = "plan-trabajo-list";

/// Maximum number of entries kept in the saved index.
pub const SAVED_LIST_CAP: usize = 10;

/// Durable key for a manually saved plan.
pub fn saved_plan_key(id: &str) -> String {
    format!("plan-{id}")
}

/// Persistence port used by the plan store.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Lists all keys currently stored, sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// Removes `key`; removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn list(&self) -> Result<Vec<String>> {
        (**self).list()
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
