//! Typed access to the JSON records kept in a [`KeyValueStore`].
//!
//! Reads are forgiving: a missing or unparseable record is logged and reported
//! as absent, never as an error, and plans missing newer fields are filled
//! with defaults during deserialization.

use log::{debug, warn};

use super::{KeyValueStore, SAVED_LIST_CAP, SAVED_LIST_KEY};
use crate::{
    error::Result,
    models::{Plan, SavedPlanEntry},
};

/// Reads a plan record, treating missing and corrupt records as absent.
pub fn read_plan<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> Option<Plan> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No plan stored under '{key}'");
            return None;
        }
        Err(e) => {
            warn!("Failed to read plan '{key}': {e}");
            return None;
        }
    };

    match serde_json::from_str::<Plan>(&raw) {
        Ok(plan) => Some(plan),
        Err(e) => {
            warn!("Ignoring corrupt plan record '{key}': {e}");
            None
        }
    }
}

/// Serializes and stores a plan under `key`.
pub fn write_plan<S: KeyValueStore + ?Sized>(storage: &S, key: &str, plan: &Plan) -> Result<()> {
    let json = serde_json::to_string(plan)?;
    storage.write(key, &json)
}

/// Reads the saved-plan index; absent or corrupt reads as empty.
pub fn read_index<S: KeyValueStore + ?Sized>(storage: &S) -> Vec<SavedPlanEntry> {
    match storage.read(SAVED_LIST_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring corrupt saved-plan index: {e}");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Failed to read saved-plan index: {e}");
            Vec::new()
        }
    }
}

/// Stores the saved-plan index.
pub fn write_index<S: KeyValueStore + ?Sized>(
    storage: &S,
    entries: &[SavedPlanEntry],
) -> Result<()> {
    let json = serde_json::to_string(entries)?;
    storage.write(SAVED_LIST_KEY, &json)
}

/// Inserts or refreshes `entry` in a most-recently-used index.
///
/// An entry with the same id is replaced where it stands; a new entry goes to
/// the front. The index is then truncated to [`SAVED_LIST_CAP`].
pub fn upsert_entry(entries: &mut Vec<SavedPlanEntry>, entry: SavedPlanEntry) {
    match entries.iter_mut().find(|existing| existing.id == entry.id) {
        Some(existing) => *existing = entry,
        None => entries.insert(0, entry),
    }
    entries.truncate(SAVED_LIST_CAP);
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::storage::MemoryStore;

    fn entry(id: &str, second: i64) -> SavedPlanEntry {
        SavedPlanEntry {
            id: id.to_string(),
            title: id.to_uppercase(),
            saved_at: Timestamp::from_second(second).unwrap(),
        }
    }

    #[test]
    fn test_upsert_pushes_new_entries_to_front() {
        let mut entries = vec![entry("a", 1)];
        upsert_entry(&mut entries, entry("b", 2));
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_upsert_updates_in_place_without_promotion() {
        let mut entries = vec![entry("c", 3), entry("b", 2), entry("a", 1)];
        let mut refreshed = entry("a", 10);
        refreshed.title = "Renamed".to_string();
        upsert_entry(&mut entries, refreshed);

        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(entries[2].title, "Renamed");
        assert_eq!(entries[2].saved_at, Timestamp::from_second(10).unwrap());
    }

    #[test]
    fn test_upsert_caps_the_index() {
        let mut entries: Vec<_> = (0..SAVED_LIST_CAP as i64)
            .map(|i| entry(&format!("p{i}"), i))
            .collect();
        upsert_entry(&mut entries, entry("new", 99));

        assert_eq!(entries.len(), SAVED_LIST_CAP);
        assert_eq!(entries[0].id, "new");
        assert!(!entries.iter().any(|e| e.id == format!("p{}", SAVED_LIST_CAP - 1)));
    }

    #[test]
    fn test_corrupt_records_read_as_absent() {
        let store = MemoryStore::new();
        store.write(SAVED_LIST_KEY, "{not json").unwrap();
        store.write("plan-x", "[1, 2").unwrap();

        assert!(read_index(&store).is_empty());
        assert!(read_plan(&store, "plan-x").is_none());
        assert!(read_plan(&store, "plan-missing").is_none());
    }
}
