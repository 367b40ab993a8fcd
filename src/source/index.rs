// Sun Oct 18 2026 - Alex

use super::SourceError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extensions treated as text assets.
pub const TEXT_EXTENSIONS: &[&str] = &["cs", "txt", "cpp", "h", "hpp", "c", "js", "json", "xml", "shader"];

const SKIPPED_DIRS: &[&str] = &["Library", "Temp", "obj", "Logs"];

/// Text files under a project root, keyed by file stem.
#[derive(Debug, Clone, Default)]
pub struct ProjectSourceIndex {
    root: PathBuf,
    by_stem: HashMap<String, Vec<PathBuf>>,
    file_count: usize,
}

impl ProjectSourceIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn build(root: &Path) -> Result<Self, SourceError> {
        if !root.is_dir() {
            return Err(SourceError::Index {
                root: root.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut index = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_text_asset(entry.path()) {
                index.insert(entry.into_path());
            }
        }

        log::debug!("Indexed {} source files under {}", index.file_count, root.display());
        Ok(index)
    }

    pub fn insert(&mut self, path: PathBuf) {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return;
        };
        self.by_stem.entry(stem.to_string()).or_default().push(path);
        self.file_count += 1;
    }

    /// Files whose stem equals `class_name` exactly.
    pub fn find_class(&self, class_name: &str) -> &[PathBuf] {
        self.by_stem.get(class_name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.file_count
    }

    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

fn is_text_asset(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_build_skips_generated_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Assets/Scripts")).unwrap();
        fs::create_dir_all(root.join("Library/ScriptAssemblies")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("Assets/Scripts/PlayerController.cs"), "class PlayerController {}").unwrap();
        fs::write(root.join("Assets/Scripts/PlayerController.prefab"), "").unwrap();
        fs::write(root.join("Library/ScriptAssemblies/PlayerController.cs"), "").unwrap();
        fs::write(root.join(".git/PlayerController.txt"), "").unwrap();

        let index = ProjectSourceIndex::build(root).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(
            index.find_class("PlayerController"),
            &[root.join("Assets/Scripts/PlayerController.cs")]
        );
        assert!(index.find_class("playercontroller").is_empty());
    }

    #[test]
    fn test_build_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProjectSourceIndex::build(&dir.path().join("missing")).is_err());
    }
}
