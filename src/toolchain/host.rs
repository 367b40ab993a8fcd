// Sun Oct 18 2026 - Alex

use crate::metadata::BuildConfig;
use std::path::{Path, PathBuf};

/// The operating system the engine installation was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostPlatform {
    Windows,
    MacOs,
    Linux,
}

impl HostPlatform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            HostPlatform::Windows
        } else if cfg!(target_os = "macos") {
            HostPlatform::MacOs
        } else {
            HostPlatform::Linux
        }
    }

    /// Android player directory, relative to a version directory.
    pub fn android_player_dir(&self) -> PathBuf {
        match self {
            HostPlatform::MacOs => Path::new("PlaybackEngines").join("AndroidPlayer"),
            HostPlatform::Windows | HostPlatform::Linux => Path::new("Editor")
                .join("Data")
                .join("PlaybackEngines")
                .join("AndroidPlayer"),
        }
    }

    /// Directory name NDK prebuilt toolchains use for this host.
    pub fn prebuilt_tag(&self) -> &'static str {
        match self {
            HostPlatform::Windows => "windows-x86_64",
            HostPlatform::MacOs => "darwin-x86_64",
            HostPlatform::Linux => "linux-x86_64",
        }
    }

    pub fn executable_name(&self, stem: &str) -> String {
        match self {
            HostPlatform::Windows => format!("{}.exe", stem),
            HostPlatform::MacOs | HostPlatform::Linux => stem.to_string(),
        }
    }

    pub fn default_install_root(&self) -> PathBuf {
        match self {
            HostPlatform::Windows => PathBuf::from(r"C:\Program Files\Unity\Hub\Editor"),
            HostPlatform::MacOs => PathBuf::from("/Applications/Unity/Hub/Editor"),
            HostPlatform::Linux => dirs_next::home_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Unity")
                .join("Hub")
                .join("Editor"),
        }
    }
}

/// Paths inside an engine installation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineLayout {
    install_root: PathBuf,
    host: HostPlatform,
}

impl EngineLayout {
    pub fn new<P: Into<PathBuf>>(install_root: P) -> Self {
        Self {
            install_root: install_root.into(),
            host: HostPlatform::current(),
        }
    }

    pub fn with_host(mut self, host: HostPlatform) -> Self {
        self.host = host;
        self
    }

    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    pub fn host(&self) -> HostPlatform {
        self.host
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.install_root.join(version)
    }

    pub fn android_player_dir(&self, version: &str) -> PathBuf {
        self.version_dir(version).join(self.host.android_player_dir())
    }

    pub fn ndk_dir(&self, version: &str) -> PathBuf {
        self.android_player_dir(version).join("NDK")
    }

    pub fn variations_dir(&self, version: &str) -> PathBuf {
        self.android_player_dir(version).join("Variations")
    }

    /// `Variations/<backend>/<flavor>/Symbols/<architecture>`, or `None`
    /// without a selected runtime version.
    pub fn engine_symbols_dir(&self, config: &BuildConfig) -> Option<PathBuf> {
        let version = config.runtime_version.as_deref()?;
        Some(
            self.variations_dir(version)
                .join(config.scripting_backend.name())
                .join(config.release_flavor.name())
                .join("Symbols")
                .join(config.architecture.name()),
        )
    }
}
