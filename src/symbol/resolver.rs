// Sat Oct 17 2026 - Alex

use super::library::{base_name, LibraryCatalog, LibraryRule, ENGINE_LIBRARY};
use super::registry::UnknownLibraryRegistry;
use crate::metadata::BuildConfig;
use crate::toolchain::host::EngineLayout;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEBUG_SUFFIX: &str = "dbg.so";
pub const SYM_SUFFIX: &str = "sym.so";
pub const DEFAULT_SUFFIX: &str = "so";

/// Symbol file quality. Ordered so that `Debug` is the greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolTier {
    Default,
    Stripped,
    Debug,
}

impl SymbolTier {
    /// Classifies a file name by suffix, checking the most specific one first.
    pub fn classify(file_name: &str) -> Option<Self> {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(DEBUG_SUFFIX) {
            Some(SymbolTier::Debug)
        } else if lower.ends_with(SYM_SUFFIX) {
            Some(SymbolTier::Stripped)
        } else if lower.ends_with(DEFAULT_SUFFIX) {
            Some(SymbolTier::Default)
        } else {
            None
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            SymbolTier::Debug => DEBUG_SUFFIX,
            SymbolTier::Stripped => SYM_SUFFIX,
            SymbolTier::Default => DEFAULT_SUFFIX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolFileCandidate {
    pub path: PathBuf,
    pub tier: SymbolTier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Best file found by searching the project symbols.
    Found(SymbolFileCandidate),
    /// Fixed engine path; it may not exist.
    Constructed(PathBuf),
    Unknown,
}

impl Resolution {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Resolution::Found(candidate) => Some(&candidate.path),
            Resolution::Constructed(path) => Some(path),
            Resolution::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolution::Unknown)
    }
}

pub struct SymbolPathResolver<'a> {
    catalog: &'a LibraryCatalog,
    layout: &'a EngineLayout,
    project_symbols_root: &'a Path,
}

impl<'a> SymbolPathResolver<'a> {
    pub fn new(catalog: &'a LibraryCatalog, layout: &'a EngineLayout, project_symbols_root: &'a Path) -> Self {
        Self {
            catalog,
            layout,
            project_symbols_root,
        }
    }

    /// Resolves `library` to a symbol file for the given build.
    ///
    /// Unresolvable names are recorded in `registry`.
    pub fn resolve(&self, library: &str, config: &BuildConfig, registry: &mut UnknownLibraryRegistry) -> Resolution {
        let resolution = match self.catalog.rule_for(library) {
            Some(LibraryRule::Engine) => self.engine_path(config),
            Some(LibraryRule::UserCode) | None => self
                .search_project(library, config)
                .map(Resolution::Found)
                .unwrap_or(Resolution::Unknown),
        };

        if resolution.is_unknown() && registry.record(library) {
            log::debug!("Unknown library {}", library);
        }

        resolution
    }

    fn engine_path(&self, config: &BuildConfig) -> Resolution {
        match self.layout.engine_symbols_dir(config) {
            Some(dir) => Resolution::Constructed(dir.join(format!("{}.{}", ENGINE_LIBRARY, SYM_SUFFIX))),
            None => {
                log::warn!("No runtime version selected, cannot locate {} symbols", ENGINE_LIBRARY);
                Resolution::Unknown
            }
        }
    }

    /// Highest-tier file under `<root>/<architecture>` whose name starts with
    /// the library's base name. Traversal is sorted by file name.
    pub fn search_project(&self, library: &str, config: &BuildConfig) -> Option<SymbolFileCandidate> {
        let search_dir = self.project_symbols_root.join(config.architecture.name());
        let prefix = base_name(library);
        let mut best: Option<SymbolFileCandidate> = None;

        for entry in WalkDir::new(&search_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping {}: {}", search_dir.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !file_name.starts_with(prefix) {
                continue;
            }

            let Some(tier) = SymbolTier::classify(&file_name) else {
                continue;
            };

            if best.as_ref().map_or(true, |current| tier > current.tier) {
                best = Some(SymbolFileCandidate {
                    path: entry.into_path(),
                    tier,
                });
            }

            if tier == SymbolTier::Debug {
                break;
            }
        }

        best
    }
}
