// Mon Oct 19 2026 - Alex

use crate::metadata::BuildConfig;
use crate::report::ExtractionMode;
use crate::toolchain::host::HostPlatform;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const APP_DIR: &str = "crash-symbolicator";
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Engine install root is not set")]
    MissingInstallRoot,
    #[error("Project symbols root is not set")]
    MissingSymbolsRoot,
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub install_root: Option<PathBuf>,
    pub project_symbols_root: Option<PathBuf>,
    pub project_source_root: Option<PathBuf>,
    /// Use this addr2line instead of the one found in the NDK.
    pub tool_override: Option<PathBuf>,
    pub editor_command: Option<String>,
    pub extraction_mode: ExtractionMode,
    pub print_commands: bool,
    pub last_selection: BuildConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            install_root: Some(HostPlatform::current().default_install_root()),
            project_symbols_root: None,
            project_source_root: None,
            tool_override: None,
            editor_command: None,
            extraction_mode: ExtractionMode::default(),
            print_commands: false,
            last_selection: BuildConfig::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_install_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.install_root = Some(root.into());
        self
    }

    pub fn with_project_symbols_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.project_symbols_root = Some(root.into());
        self
    }

    pub fn with_project_source_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.project_source_root = Some(root.into());
        self
    }

    pub fn with_tool_override<P: Into<PathBuf>>(mut self, tool: P) -> Self {
        self.tool_override = Some(tool.into());
        self
    }

    pub fn with_editor_command(mut self, command: &str) -> Self {
        self.editor_command = Some(command.to_string());
        self
    }

    pub fn with_extraction_mode(mut self, mode: ExtractionMode) -> Self {
        self.extraction_mode = mode;
        self
    }

    pub fn with_print_commands(mut self, enabled: bool) -> Self {
        self.print_commands = enabled;
        self
    }

    pub fn with_last_selection(mut self, selection: &BuildConfig) -> Self {
        self.last_selection = selection.selection();
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Defaults when the file is absent; a corrupt file is reported and replaced
    /// by defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(ConfigError::NotFound(_)) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.as_ref().display(), e);
                Self::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;
        log::debug!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(SETTINGS_FILE)
    }

    /// Both roots must be set before a run can start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.install_root.is_none() {
            return Err(ConfigError::MissingInstallRoot);
        }
        if self.project_symbols_root.is_none() {
            return Err(ConfigError::MissingSymbolsRoot);
        }
        Ok(())
    }
}
