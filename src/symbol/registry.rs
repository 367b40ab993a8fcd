// Sat Oct 17 2026 - Alex

use indexmap::IndexSet;

/// Library names that could not be resolved during one run, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct UnknownLibraryRegistry {
    names: IndexSet<String>,
}

impl UnknownLibraryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a name is recorded.
    pub fn record(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_once() {
        let mut registry = UnknownLibraryRegistry::new();

        assert!(registry.record("MyGame"));
        assert!(registry.record("libfoo"));
        assert!(!registry.record("MyGame"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["MyGame", "libfoo"]);

        registry.clear();
        assert!(registry.is_empty());
    }
}
