//! Error types for the workplan library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all workplan operations.
#[derive(Error, Debug)]
pub enum WorkplanError {
    /// Key-value storage read or write errors
    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// A rendered region could not be turned into a raster image
    #[error("Capture error: {message}")]
    Capture { message: String },
    /// The paginated document could not be assembled
    #[error("Compose error: {message}")]
    Compose { message: String },
    /// The requested region is not available for capture
    #[error("Region '{region}' is not available")]
    RegionUnavailable { region: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> WorkplanError {
        WorkplanError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl WorkplanError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a capture error from any displayable cause.
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }

    /// Creates a compose error from any displayable cause.
    pub fn compose(message: impl Into<String>) -> Self {
        Self::Compose {
            message: message.into(),
        }
    }
}

/// Extension trait mapping I/O failures onto [`WorkplanError`] with the path
/// that was being touched.
pub trait FileSystemResultExt<T> {
    /// Map I/O errors to `WorkplanError::FileSystem` for `path`.
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> FileSystemResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| WorkplanError::FileSystem {
            path: path.into(),
            source,
        })
    }
}

/// Extension trait attaching a storage key to any error.
pub trait StorageResultExt<T> {
    /// Map the error to `WorkplanError::Storage` for `key`.
    fn storage_context(self, key: &str) -> Result<T>;
}

impl<T, E> StorageResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn storage_context(self, key: &str) -> Result<T> {
        self.map_err(|e| WorkplanError::Storage {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

/// Result type alias for workplan operations
pub type Result<T> = std::result::Result<T, WorkplanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = WorkplanError::invalid_input("status").with_reason("unknown value 'x'");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'status': unknown value 'x'"
        );
    }

    #[test]
    fn test_storage_context_keeps_key() {
        let io: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));
        let err = io.storage_context("plan-abc").unwrap_err();
        assert!(err.to_string().contains("plan-abc"));
        assert!(err.to_string().contains("disk full"));
    }
}
