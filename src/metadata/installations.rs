// Sat Oct 17 2026 - Alex

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

static VERSION_DIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9]\d*(\.\d+)+([a-z]+\d+)?$").expect("version directory pattern"));

/// Engine versions installed under an installation root, one directory each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installations {
    root: PathBuf,
    versions: Vec<String>,
}

impl Installations {
    pub fn discover<P: AsRef<Path>>(root: P) -> io::Result<Self> {
        let root = root.as_ref();
        let mut versions = Vec::new();

        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if Self::is_version_name(&name) {
                versions.push(name);
            } else {
                log::trace!("Skipping non-version directory {}", name);
            }
        }

        versions.sort_by_key(|v| version_key(v));
        log::debug!("Found {} installed versions under {}", versions.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            versions,
        })
    }

    pub fn from_versions(root: PathBuf, versions: Vec<String>) -> Self {
        Self { root, versions }
    }

    pub fn is_version_name(name: &str) -> bool {
        VERSION_DIR.is_match(name)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// An installation root is only usable when it holds at least one version.
    pub fn is_valid(&self) -> bool {
        !self.versions.is_empty()
    }

    pub fn contains(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }

    /// The preferred version when it is still installed, otherwise the first one.
    pub fn default_version(&self, preferred: Option<&str>) -> Option<String> {
        preferred
            .filter(|v| self.contains(v))
            .map(str::to_string)
            .or_else(|| self.versions.first().cloned())
    }
}

fn version_key(version: &str) -> Vec<u64> {
    version
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect()
}
