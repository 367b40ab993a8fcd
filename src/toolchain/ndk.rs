// Sun Oct 18 2026 - Alex

use super::error::ToolchainError;
use super::host::EngineLayout;
use crate::metadata::{Architecture, BuildConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

static REVISION: Lazy<Regex> = Lazy::new(|| Regex::new(r"Pkg\.Revision\s*=\s*(\S+)").expect("revision pattern"));

pub const PROPERTIES_FILE: &str = "source.properties";

/// First NDK release that ships `llvm-addr2line` only.
pub const LLVM_ONLY_SINCE: NdkVersion = NdkVersion { major: 23, minor: 1 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NdkVersion {
    pub major: u32,
    pub minor: u32,
}

impl NdkVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parses `major.minor[.patch...]`; anything after the minor part is ignored.
    pub fn parse(revision: &str) -> Result<Self, ToolchainError> {
        let mut parts = revision.trim().split('.');
        let invalid = || ToolchainError::InvalidRevision(revision.to_string());

        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let minor = match parts.next() {
            Some(p) => p.parse().map_err(|_| invalid())?,
            None => 0,
        };

        Ok(Self { major, minor })
    }

    /// Reads `Pkg.Revision` from `<ndk_dir>/source.properties`.
    pub fn read(ndk_dir: &Path) -> Result<Self, ToolchainError> {
        let properties = ndk_dir.join(PROPERTIES_FILE);
        if !properties.is_file() {
            return Err(ToolchainError::MissingSourceProperties(properties));
        }

        let contents = fs::read_to_string(&properties)?;
        let revision = REVISION
            .captures(&contents)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| ToolchainError::MissingRevision(properties.clone()))?;

        Self::parse(revision.as_str())
    }

    pub fn uses_llvm(&self) -> bool {
        *self >= LLVM_ONLY_SINCE
    }
}

impl fmt::Display for NdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Finds the addr2line executable bundled with an engine installation.
pub struct ToolchainLocator<'a> {
    layout: &'a EngineLayout,
}

impl<'a> ToolchainLocator<'a> {
    pub fn new(layout: &'a EngineLayout) -> Self {
        Self { layout }
    }

    /// Tool path for the selected version and architecture. The file itself is
    /// not checked.
    pub fn locate(&self, config: &BuildConfig) -> Result<PathBuf, ToolchainError> {
        let version = config.runtime_version.as_deref().ok_or(ToolchainError::NoRuntimeVersion)?;
        let ndk_dir = self.layout.ndk_dir(version);
        let ndk = NdkVersion::read(&ndk_dir)?;
        log::debug!("NDK {} found in {}", ndk, ndk_dir.display());

        Ok(self.tool_path(&ndk_dir, ndk, config.architecture))
    }

    pub fn tool_path(&self, ndk_dir: &Path, ndk: NdkVersion, architecture: Architecture) -> PathBuf {
        let host = self.layout.host();

        if ndk.uses_llvm() {
            return ndk_dir
                .join("toolchains")
                .join("llvm")
                .join("prebuilt")
                .join(host.prebuilt_tag())
                .join("bin")
                .join(host.executable_name("llvm-addr2line"));
        }

        let triple = gnu_triple(architecture);
        ndk_dir
            .join("toolchains")
            .join(format!("{}-4.9", triple))
            .join("prebuilt")
            .join(host.prebuilt_tag())
            .join("bin")
            .join(host.executable_name(&format!("{}-addr2line", triple)))
    }
}

fn gnu_triple(architecture: Architecture) -> &'static str {
    match architecture {
        Architecture::Arm64V8a => "aarch64-linux-android",
        Architecture::ArmeabiV7a => "arm-linux-androideabi",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::host::HostPlatform;

    fn write_properties(layout: &EngineLayout, version: &str, contents: &str) {
        let ndk_dir = layout.ndk_dir(version);
        fs::create_dir_all(&ndk_dir).unwrap();
        fs::write(ndk_dir.join(PROPERTIES_FILE), contents).unwrap();
    }

    #[test]
    fn test_parse_revision() {
        assert_eq!(NdkVersion::parse("23.1.7779620").unwrap(), NdkVersion::new(23, 1));
        assert_eq!(NdkVersion::parse("21").unwrap(), NdkVersion::new(21, 0));
        assert!(NdkVersion::parse("r21e").is_err());
        assert!(NdkVersion::new(23, 1).uses_llvm());
        assert!(NdkVersion::new(25, 0).uses_llvm());
        assert!(!NdkVersion::new(23, 0).uses_llvm());
    }

    #[test]
    fn test_locate_llvm_tool() {
        let dir = tempfile::tempdir().unwrap();
        let layout = EngineLayout::new(dir.path()).with_host(HostPlatform::Linux);
        write_properties(&layout, "2022.3.1f1", "Pkg.Desc = Android NDK\nPkg.Revision = 23.1.7779620\n");

        let config = BuildConfig::new().with_runtime_version("2022.3.1f1");
        let tool = ToolchainLocator::new(&layout).locate(&config).unwrap();

        assert_eq!(
            tool,
            layout
                .ndk_dir("2022.3.1f1")
                .join("toolchains/llvm/prebuilt/linux-x86_64/bin/llvm-addr2line")
        );
    }

    #[test]
    fn test_locate_legacy_tool_per_architecture() {
        let dir = tempfile::tempdir().unwrap();
        let layout = EngineLayout::new(dir.path()).with_host(HostPlatform::Windows);
        write_properties(&layout, "2019.4.40f1", "Pkg.Revision=19.0.5232133");

        let locator = ToolchainLocator::new(&layout);
        let ndk_dir = layout.ndk_dir("2019.4.40f1");

        let arm64 = locator
            .locate(&BuildConfig::new().with_runtime_version("2019.4.40f1"))
            .unwrap();
        assert_eq!(
            arm64,
            ndk_dir.join("toolchains/aarch64-linux-android-4.9/prebuilt/windows-x86_64/bin/aarch64-linux-android-addr2line.exe")
        );

        let armv7 = locator
            .locate(
                &BuildConfig::new()
                    .with_runtime_version("2019.4.40f1")
                    .with_architecture(Architecture::ArmeabiV7a),
            )
            .unwrap();
        assert!(armv7.ends_with("arm-linux-androideabi-addr2line.exe"));
    }

    #[test]
    fn test_missing_properties() {
        let dir = tempfile::tempdir().unwrap();
        let layout = EngineLayout::new(dir.path());
        let locator = ToolchainLocator::new(&layout);

        let err = locator
            .locate(&BuildConfig::new().with_runtime_version("2021.3.5f1"))
            .unwrap_err();
        assert!(matches!(err, ToolchainError::MissingSourceProperties(_)));

        assert!(matches!(locator.locate(&BuildConfig::new()), Err(ToolchainError::NoRuntimeVersion)));
    }

    #[test]
    fn test_missing_revision() {
        let dir = tempfile::tempdir().unwrap();
        let layout = EngineLayout::new(dir.path());
        write_properties(&layout, "2021.3.5f1", "Pkg.Desc = Android NDK\n");

        let err = NdkVersion::read(&layout.ndk_dir("2021.3.5f1")).unwrap_err();
        assert!(matches!(err, ToolchainError::MissingRevision(_)));
    }
}
