//! Builder for creating and configuring file-backed PlanStore instances.

use std::path::{Path, PathBuf};

use super::PlanStore;
use crate::{
    error::{Result, WorkplanError},
    storage::FileStore,
};

/// Builder for creating and configuring file-backed plan stores.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    data_dir: Option<PathBuf>,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self { data_dir: None }
    }

    /// Sets a custom data directory.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/workplan/plans` or `~/.local/share/workplan/plans`
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.data_dir = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the store, restoring the last session's plan.
    ///
    /// # Errors
    ///
    /// Returns `WorkplanError::XdgDirectory` if no default directory can be
    /// determined, and `WorkplanError::FileSystem` if the directory cannot be
    /// created.
    pub fn build(self) -> Result<PlanStore<FileStore>> {
        let dir = match self.data_dir {
            Some(dir) => dir,
            None => Self::default_data_dir()?,
        };
        let storage = FileStore::open(dir)?;
        Ok(PlanStore::open(storage))
    }

    /// Returns the default data directory following the XDG Base Directory
    /// specification.
    fn default_data_dir() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("workplan")
            .create_data_directory("plans")
            .map_err(|e| WorkplanError::XdgDirectory(e.to_string()))
    }
}
