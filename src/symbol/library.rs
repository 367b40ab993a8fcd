// Sat Oct 17 2026 - Alex

use once_cell::sync::Lazy;
use std::path::Path;

pub const ENGINE_LIBRARY: &str = "libunity";
pub const USER_CODE_LIBRARY: &str = "libil2cpp";

static STANDARD_CATALOG: Lazy<LibraryCatalog> = Lazy::new(LibraryCatalog::standard);

/// How a catalog library's symbol file is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryRule {
    /// Fixed path inside the engine installation.
    Engine,
    /// Searched for under the project symbols root.
    UserCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub name: String,
    pub rule: LibraryRule,
}

impl Library {
    pub fn new(name: &str, rule: LibraryRule) -> Self {
        Self {
            name: name.to_string(),
            rule,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCatalog {
    libraries: Vec<Library>,
}

impl LibraryCatalog {
    pub fn new() -> Self {
        Self {
            libraries: Vec::new(),
        }
    }

    /// Engine runtime first, then user code.
    pub fn standard() -> Self {
        Self::new()
            .with_library(ENGINE_LIBRARY, LibraryRule::Engine)
            .with_library(USER_CODE_LIBRARY, LibraryRule::UserCode)
    }

    pub fn global() -> &'static LibraryCatalog {
        &STANDARD_CATALOG
    }

    pub fn with_library(mut self, name: &str, rule: LibraryRule) -> Self {
        if self.get(name).is_none() {
            self.libraries.push(Library::new(name, rule));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Library> {
        let base = base_name(name);
        self.libraries.iter().find(|lib| lib.name == base)
    }

    pub fn rule_for(&self, name: &str) -> Option<LibraryRule> {
        self.get(name).map(|lib| lib.rule)
    }

    pub fn names(&self) -> Vec<String> {
        self.libraries.iter().map(|lib| lib.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Library> {
        self.libraries.iter()
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// True when `name` refers to a user-code library (source mapping applies).
    pub fn is_user_code(&self, name: &str) -> bool {
        self.libraries
            .iter()
            .filter(|lib| lib.rule == LibraryRule::UserCode)
            .any(|lib| name.contains(lib.name.as_str()))
    }

    pub fn is_engine(&self, name: &str) -> bool {
        self.rule_for(name) == Some(LibraryRule::Engine)
    }
}

impl Default for LibraryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Library name without a trailing `.so`, as used for file-name prefixes.
pub fn base_name(name: &str) -> &str {
    let stem = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    stem.strip_suffix(".so").unwrap_or(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = LibraryCatalog::global();

        assert_eq!(catalog.names(), vec![ENGINE_LIBRARY.to_string(), USER_CODE_LIBRARY.to_string()]);
        assert!(catalog.is_engine("libunity"));
        assert!(catalog.is_engine("libunity.so"));
        assert!(catalog.is_user_code("libil2cpp"));
        assert!(!catalog.is_user_code("libunity"));
        assert!(catalog.get("MyGame").is_none());
    }

    #[test]
    fn test_with_library_ignores_duplicates() {
        let catalog = LibraryCatalog::standard()
            .with_library("libgame", LibraryRule::UserCode)
            .with_library("libunity", LibraryRule::UserCode);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.rule_for("libunity"), Some(LibraryRule::Engine));
        assert!(catalog.is_user_code("libgame"));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("libil2cpp.so"), "libil2cpp");
        assert_eq!(base_name("/data/app/lib/arm64/libunity.so"), "libunity");
        assert_eq!(base_name("MyGame"), "MyGame");
    }
}
