// Sun Oct 18 2026 - Alex

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("No runtime version selected")]
    NoRuntimeVersion,
    #[error("NDK properties not found: {}", .0.display())]
    MissingSourceProperties(PathBuf),
    #[error("No Pkg.Revision entry in {}", .0.display())]
    MissingRevision(PathBuf),
    #[error("Invalid NDK revision: {0}")]
    InvalidRevision(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("Failed to launch {}: {source}", .tool.display())]
    Spawn {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
