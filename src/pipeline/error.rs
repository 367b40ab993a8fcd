// Mon Oct 19 2026 - Alex

use crate::config::ConfigError;
use crate::toolchain::ToolchainError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("addr2line not found at {}", .0.display())]
    MissingTool(PathBuf),
    #[error("No addresses found in the crash report")]
    NoAddresses,
    #[error("Symbolication cancelled")]
    Cancelled,
    #[error("Symbolication worker stopped unexpectedly")]
    WorkerFailed,
    #[error("Toolchain error: {0}")]
    Toolchain(#[from] ToolchainError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
