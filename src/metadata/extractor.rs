// Sat Oct 17 2026 - Alex

use super::{Architecture, BuildConfig, ReleaseFlavor, ScriptingBackend};
use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPTING_BACKEND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Scripting Backend '([^']*)").expect("scripting backend pattern"));
static RUNTIME_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Version '([^ ']*)").expect("version pattern"));
static CPU: Lazy<Regex> = Lazy::new(|| Regex::new(r"CPU '([^']*)").expect("cpu pattern"));
static BUILD_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Build type '([^']*)").expect("build type pattern"));

/// Raw label values found in a crash report, before any reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
    pub scripting_backend: Option<String>,
    pub runtime_version: Option<String>,
    pub cpu: Option<String>,
    pub build_type: Option<String>,
}

impl ExtractedMetadata {
    pub fn scan(text: &str) -> Self {
        Self {
            scripting_backend: capture(&SCRIPTING_BACKEND, text),
            runtime_version: capture(&RUNTIME_VERSION, text),
            cpu: capture(&CPU, text),
            build_type: capture(&BUILD_TYPE, text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scripting_backend.is_none()
            && self.runtime_version.is_none()
            && self.cpu.is_none()
            && self.build_type.is_none()
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Updates `config` from the labels found in `text`.
    ///
    /// Never fails. Fields without a label keep their current value. An
    /// unknown scripting backend or build type is ignored; an unavailable
    /// version or CPU sets the matching `missing_*` marker and leaves the
    /// selection alone.
    pub fn extract(text: &str, installed_versions: &[String], config: &mut BuildConfig) -> ExtractedMetadata {
        if text.is_empty() {
            config.clear_missing();
            return ExtractedMetadata::default();
        }

        let found = ExtractedMetadata::scan(text);

        Self::apply_scripting_backend(found.scripting_backend.as_deref(), config);
        Self::apply_runtime_version(found.runtime_version.as_deref(), installed_versions, config);
        Self::apply_cpu(found.cpu.as_deref(), config);
        Self::apply_build_type(found.build_type.as_deref(), config);

        found
    }

    fn apply_scripting_backend(value: Option<&str>, config: &mut BuildConfig) {
        if let Some(backend) = value.and_then(ScriptingBackend::from_name) {
            config.scripting_backend = backend;
        }
    }

    fn apply_runtime_version(value: Option<&str>, installed_versions: &[String], config: &mut BuildConfig) {
        match value {
            Some(version) if installed_versions.iter().any(|v| v == version) => {
                config.runtime_version = Some(version.to_string());
                config.missing_version = None;
            }
            Some(version) => {
                log::warn!("Crash report needs runtime version {} which is not installed", version);
                config.missing_version = Some(version.to_string());
            }
            None => config.missing_version = None,
        }
    }

    fn apply_cpu(value: Option<&str>, config: &mut BuildConfig) {
        match value {
            Some(name) => match Architecture::from_name(name) {
                Some(architecture) => {
                    config.architecture = architecture;
                    config.missing_architecture = None;
                }
                None => {
                    log::warn!("Missing CPU type {}", name);
                    config.missing_architecture = Some(name.to_string());
                }
            },
            None => config.missing_architecture = None,
        }
    }

    fn apply_build_type(value: Option<&str>, config: &mut BuildConfig) {
        if let Some(flavor) = value.and_then(ReleaseFlavor::from_name) {
            config.release_flavor = flavor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed() -> Vec<String> {
        vec!["2021.3.5f1".to_string(), "2022.3.10f1".to_string()]
    }

    #[test]
    fn test_known_cpu_updates_architecture() {
        let mut config = BuildConfig::new().with_architecture(Architecture::ArmeabiV7a);
        config.missing_architecture = Some("mips".to_string());

        MetadataExtractor::extract("CPU 'arm64-v8a'", &installed(), &mut config);

        assert_eq!(config.architecture, Architecture::Arm64V8a);
        assert!(config.missing_architecture.is_none());
    }

    #[test]
    fn test_unknown_cpu_sets_missing_flag() {
        let mut config = BuildConfig::new().with_architecture(Architecture::ArmeabiV7a);

        MetadataExtractor::extract("Device CPU 'mips' crashed", &installed(), &mut config);

        assert_eq!(config.architecture, Architecture::ArmeabiV7a);
        assert_eq!(config.missing_architecture.as_deref(), Some("mips"));
    }

    #[test]
    fn test_version_selection() {
        let mut config = BuildConfig::new().with_runtime_version("2021.3.5f1");

        MetadataExtractor::extract("Version '2022.3.10f1 (abc)'", &installed(), &mut config);
        assert_eq!(config.runtime_version.as_deref(), Some("2022.3.10f1"));
        assert!(config.missing_version.is_none());

        MetadataExtractor::extract("Version '2019.4.40f1'", &installed(), &mut config);
        assert_eq!(config.runtime_version.as_deref(), Some("2022.3.10f1"));
        assert_eq!(config.missing_version.as_deref(), Some("2019.4.40f1"));

        MetadataExtractor::extract("no labels here", &installed(), &mut config);
        assert!(config.missing_version.is_none());
    }

    #[test]
    fn test_unknown_backend_and_build_type_are_ignored() {
        let mut config = BuildConfig::new()
            .with_scripting_backend(ScriptingBackend::Mono)
            .with_release_flavor(ReleaseFlavor::Development);

        let found = MetadataExtractor::extract(
            "Scripting Backend 'dotnet'\nBuild type 'Debug'",
            &installed(),
            &mut config,
        );

        assert_eq!(found.scripting_backend.as_deref(), Some("dotnet"));
        assert_eq!(config.scripting_backend, ScriptingBackend::Mono);
        assert_eq!(config.release_flavor, ReleaseFlavor::Development);
        assert!(!config.has_missing_metadata());
    }

    #[test]
    fn test_all_labels_are_order_insensitive() {
        let text = "Build type 'Development'\nCPU 'armeabi-v7a'\nScripting Backend 'mono'\nVersion '2021.3.5f1'";
        let mut config = BuildConfig::new();

        MetadataExtractor::extract(text, &installed(), &mut config);

        assert_eq!(config.release_flavor, ReleaseFlavor::Development);
        assert_eq!(config.architecture, Architecture::ArmeabiV7a);
        assert_eq!(config.scripting_backend, ScriptingBackend::Mono);
        assert_eq!(config.runtime_version.as_deref(), Some("2021.3.5f1"));
    }

    #[test]
    fn test_empty_text_clears_flags_only() {
        let mut config = BuildConfig::new().with_architecture(Architecture::ArmeabiV7a);
        config.missing_version = Some("1.0".to_string());
        config.missing_architecture = Some("x86".to_string());

        let found = MetadataExtractor::extract("", &installed(), &mut config);

        assert!(found.is_empty());
        assert!(!config.has_missing_metadata());
        assert_eq!(config.architecture, Architecture::ArmeabiV7a);
    }
}
