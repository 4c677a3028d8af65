//! Typst compilation: turns export markup into PDF bytes.
//!
//! Compilation shells out to the `typst` binary inside a scratch directory.
//! The child is bounded by a timeout and killed when it runs over.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::tempdir;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

const SOURCE_FILE: &str = "resume.typ";
const OUTPUT_FILE: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temp dir: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("failed to write typst source: {0}")]
    WriteSource(#[source] std::io::Error),

    #[error("failed to run typst: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("typst did not finish within {0:?}")]
    Timeout(Duration),

    #[error("typst exited with code {code}: {stderr}")]
    Exit { code: i32, stderr: String },

    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

/// The paginating rendering engine behind the export path.
#[async_trait]
pub trait PdfCompiler: Send + Sync {
    async fn compile(&self, source: &str) -> Result<Vec<u8>, RenderError>;
}

pub struct TypstCompiler {
    binary: PathBuf,
    timeout: Duration,
}

impl TypstCompiler {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

#[async_trait]
impl PdfCompiler for TypstCompiler {
    async fn compile(&self, source: &str) -> Result<Vec<u8>, RenderError> {
        let dir = tempdir().map_err(RenderError::TempDir)?;
        let source_path = dir.path().join(SOURCE_FILE);
        let output_path = dir.path().join(OUTPUT_FILE);

        tokio::fs::write(&source_path, source)
            .await
            .map_err(RenderError::WriteSource)?;

        let run = Command::new(&self.binary)
            .arg("compile")
            .arg(&source_path)
            .arg(&output_path)
            .current_dir(dir.path())
            .kill_on_drop(true)
            .output();

        // Dropping `run` on timeout kills the child.
        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| {
                warn!("typst compile timed out after {:?}", self.timeout);
                RenderError::Timeout(self.timeout)
            })?
            .map_err(RenderError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("typst compile failed: {stderr}");
            return Err(RenderError::Exit {
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        let pdf = tokio::fs::read(&output_path)
            .await
            .map_err(RenderError::ReadPdf)?;
        debug!("typst produced {} bytes", pdf.len());
        Ok(pdf)
    }
}
