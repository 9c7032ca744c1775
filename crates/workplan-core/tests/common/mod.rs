use std::path::Path;

use tempfile::TempDir;
use workplan_core::{PlanStore, StoreBuilder, storage::FileStore};

/// Helper function to create a file-backed store in a fresh temp directory
pub fn create_test_store() -> (TempDir, PlanStore<FileStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(temp_dir.path());
    (temp_dir, store)
}

/// Opens (or reopens) a file-backed store rooted at `dir`
pub fn open_store(dir: &Path) -> PlanStore<FileStore> {
    StoreBuilder::new()
        .with_data_dir(Some(dir))
        .build()
        .expect("Failed to create store")
}
