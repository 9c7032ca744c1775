//! Region capture through an external rasterizer.

use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

use super::{Capture, Raster, Region, bmp};
use crate::{
    error::{FileSystemResultExt, Result, WorkplanError},
    render::standalone_page,
};

/// Rasterizer invoked when none is configured.
pub const DEFAULT_CAPTURE_PROGRAM: &str = "wkhtmltoimage";

/// Captures a region by loading it as a standalone page in an external
/// HTML-to-image program that writes a BMP file.
///
/// The program is called as
/// `<program> <args..> --width <px> --zoom <scale> <input.html> <output.bmp>`,
/// matching `wkhtmltoimage`'s command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCapture {
    program: String,
    args: Vec<String>,
}

impl Default for CommandCapture {
    fn default() -> Self {
        Self {
            program: DEFAULT_CAPTURE_PROGRAM.to_string(),
            args: vec![
                "--quiet".to_string(),
                "--format".to_string(),
                "bmp".to_string(),
            ],
        }
    }
}

impl CommandCapture {
    /// Uses `program` with the given leading arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parses a whitespace-separated command line, e.g.
    /// `"wkhtmltoimage --quiet --format bmp"`.
    pub fn from_command_line(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| WorkplanError::Configuration {
            message: "capture command is empty".to_string(),
        })?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Capture for CommandCapture {
    async fn capture(&self, region: &Region, scale: f64) -> Result<Raster> {
        let input = tempfile::Builder::new()
            .prefix("workplan-")
            .suffix(".html")
            .tempfile()
            .map_err(|e| WorkplanError::capture(format!("cannot create capture input: {e}")))?;
        let output = tempfile::Builder::new()
            .prefix("workplan-")
            .suffix(".bmp")
            .tempfile()
            .map_err(|e| WorkplanError::capture(format!("cannot create capture output: {e}")))?;

        let page = standalone_page(region.kind.as_str(), &region.markup);
        tokio::fs::write(input.path(), page)
            .await
            .fs_context(input.path())?;

        debug!(
            "Capturing {} region with {} at {scale}x",
            region.kind.as_str(),
            self.program
        );
        let result = Command::new(&self.program)
            .args(&self.args)
            .arg("--width")
            .arg(region.css_width.to_string())
            .arg("--zoom")
            .arg(scale.to_string())
            .arg(input.path())
            .arg(output.path())
            .output()
            .await
            .map_err(|e| WorkplanError::capture(format!("cannot run {}: {e}", self.program)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            warn!("{} exited with {}: {}", self.program, result.status, stderr.trim());
            return Err(WorkplanError::capture(format!(
                "{} exited with {}",
                self.program, result.status
            )));
        }

        let bytes = tokio::fs::read(output.path())
            .await
            .fs_context(output.path())?;
        bmp::decode(&bytes)
    }
}
