// Sat Oct 17 2026 - Alex

pub mod library;
pub mod registry;
pub mod resolver;

pub use library::{base_name, Library, LibraryCatalog, LibraryRule, ENGINE_LIBRARY, USER_CODE_LIBRARY};
pub use registry::UnknownLibraryRegistry;
pub use resolver::{Resolution, SymbolFileCandidate, SymbolPathResolver, SymbolTier};

use serde::Serialize;

/// How prominently a library label is shown next to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LibrarySeverity {
    Resolved,
    Engine,
    Unknown,
}

impl LibrarySeverity {
    /// Unknown names take precedence over the engine rule.
    pub fn of(name: &str, catalog: &LibraryCatalog, unknown: &UnknownLibraryRegistry) -> Self {
        if unknown.contains(name) {
            LibrarySeverity::Unknown
        } else if catalog.is_engine(name) {
            LibrarySeverity::Engine
        } else {
            LibrarySeverity::Resolved
        }
    }
}
