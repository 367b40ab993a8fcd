// Sat Oct 17 2026 - Alex

pub mod extractor;
pub mod installations;

pub use extractor::{ExtractedMetadata, MetadataExtractor};
pub use installations::Installations;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Architecture {
    #[default]
    #[serde(rename = "arm64-v8a")]
    Arm64V8a,
    #[serde(rename = "armeabi-v7a")]
    ArmeabiV7a,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Architecture::Arm64V8a, Architecture::ArmeabiV7a];

    /// Name as it appears in crash reports and in symbol directory names.
    pub fn name(&self) -> &'static str {
        match self {
            Architecture::Arm64V8a => "arm64-v8a",
            Architecture::ArmeabiV7a => "armeabi-v7a",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|arch| arch.name() == name)
    }

    pub fn is_64bit(&self) -> bool {
        matches!(self, Architecture::Arm64V8a)
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Architecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown architecture '{}' (expected arm64-v8a or armeabi-v7a)", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReleaseFlavor {
    #[default]
    Release,
    Development,
}

impl ReleaseFlavor {
    pub const ALL: [ReleaseFlavor; 2] = [ReleaseFlavor::Release, ReleaseFlavor::Development];

    pub fn name(&self) -> &'static str {
        match self {
            ReleaseFlavor::Release => "Release",
            ReleaseFlavor::Development => "Development",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|flavor| flavor.name() == name)
    }
}

impl fmt::Display for ReleaseFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReleaseFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown build type '{}' (expected Release or Development)", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScriptingBackend {
    #[default]
    #[serde(rename = "il2cpp")]
    Il2Cpp,
    #[serde(rename = "mono")]
    Mono,
}

impl ScriptingBackend {
    pub const ALL: [ScriptingBackend; 2] = [ScriptingBackend::Il2Cpp, ScriptingBackend::Mono];

    pub fn name(&self) -> &'static str {
        match self {
            ScriptingBackend::Il2Cpp => "il2cpp",
            ScriptingBackend::Mono => "mono",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|backend| backend.name() == name)
    }
}

impl fmt::Display for ScriptingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScriptingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown scripting backend '{}' (expected il2cpp or mono)", s))
    }
}

/// The build selection used to locate symbols and the address-to-line tool.
///
/// `missing_version` and `missing_architecture` hold the raw value a crash
/// report asked for when it is not available locally. They never replace the
/// current selection and are not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub runtime_version: Option<String>,
    pub architecture: Architecture,
    pub scripting_backend: ScriptingBackend,
    pub release_flavor: ReleaseFlavor,
    #[serde(skip)]
    pub missing_version: Option<String>,
    #[serde(skip)]
    pub missing_architecture: Option<String>,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime_version(mut self, version: &str) -> Self {
        self.runtime_version = Some(version.to_string());
        self
    }

    pub fn with_architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn with_scripting_backend(mut self, backend: ScriptingBackend) -> Self {
        self.scripting_backend = backend;
        self
    }

    pub fn with_release_flavor(mut self, flavor: ReleaseFlavor) -> Self {
        self.release_flavor = flavor;
        self
    }

    pub fn has_missing_metadata(&self) -> bool {
        self.missing_version.is_some() || self.missing_architecture.is_some()
    }

    pub fn clear_missing(&mut self) {
        self.missing_version = None;
        self.missing_architecture = None;
    }

    /// Copy of the selection without the transient "missing" markers.
    pub fn selection(&self) -> BuildConfig {
        let mut selection = self.clone();
        selection.clear_missing();
        selection
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.runtime_version.as_deref().unwrap_or("<no version>"),
            self.architecture,
            self.scripting_backend,
            self.release_flavor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architecture_names() {
        assert_eq!(Architecture::from_name("arm64-v8a"), Some(Architecture::Arm64V8a));
        assert_eq!(Architecture::from_name("armeabi-v7a"), Some(Architecture::ArmeabiV7a));
        assert_eq!(Architecture::from_name("mips"), None);
        assert_eq!(Architecture::ArmeabiV7a.to_string(), "armeabi-v7a");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(ReleaseFlavor::from_name("release").is_none());
        assert!(ScriptingBackend::from_name("IL2CPP").is_none());
        assert_eq!("mono".parse::<ScriptingBackend>(), Ok(ScriptingBackend::Mono));
        assert!("Debug".parse::<ReleaseFlavor>().is_err());
    }

    #[test]
    fn test_selection_drops_missing_markers() {
        let mut config = BuildConfig::new().with_runtime_version("2021.3.5f1");
        config.missing_architecture = Some("mips".to_string());
        assert!(config.has_missing_metadata());

        let selection = config.selection();
        assert!(!selection.has_missing_metadata());
        assert_eq!(selection.runtime_version.as_deref(), Some("2021.3.5f1"));
    }

    #[test]
    fn test_build_config_serde_skips_markers() {
        let mut config = BuildConfig::new().with_release_flavor(ReleaseFlavor::Development);
        config.missing_version = Some("2019.4.1f1".to_string());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("2019.4.1f1"));
        assert!(json.contains("\"Development\""));

        let back: BuildConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config.selection());
    }
}
