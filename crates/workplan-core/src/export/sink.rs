//! Filesystem destinations for exported artifacts.

use std::path::{Path, PathBuf};

use log::info;

use super::{ArtifactSink, PrintOpen, PrintTarget};
use crate::error::{FileSystemResultExt, Result};

/// Saves artifacts into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for DirectorySink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).fs_context(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes).fs_context(&path)?;
        info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

/// Writes the print document to a file for the user to open in a browser.
#[derive(Debug, Clone)]
pub struct FilePrintTarget {
    path: PathBuf,
}

impl FilePrintTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintTarget for FilePrintTarget {
    fn open(&self, html: &str) -> Result<PrintOpen> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).fs_context(parent)?;
        }
        std::fs::write(&self.path, html).fs_context(&self.path)?;
        Ok(PrintOpen::Opened(self.path.display().to_string()))
    }
}
