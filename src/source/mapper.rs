// Sun Oct 18 2026 - Alex

use super::index::ProjectSourceIndex;
use super::{SourceError, SourceLink};
use std::fs;
use std::path::{Path, PathBuf};

/// Guesses where a `Class_Method_...` symbol is declared in project sources.
pub struct SourceHeuristicMapper<'a> {
    index: &'a ProjectSourceIndex,
}

struct Hits {
    count: usize,
    last: Option<(PathBuf, u32)>,
}

impl<'a> SourceHeuristicMapper<'a> {
    pub fn new(index: &'a ProjectSourceIndex) -> Self {
        Self { index }
    }

    /// Never fails; read errors are logged and give `None`.
    pub fn annotate(&self, resolved_text: &str) -> Option<SourceLink> {
        match self.try_annotate(resolved_text) {
            Ok(link) => link,
            Err(e) => {
                log::warn!("Source lookup for '{}' failed: {}", resolved_text, e);
                None
            }
        }
    }

    fn try_annotate(&self, resolved_text: &str) -> Result<Option<SourceLink>, SourceError> {
        let mut parts = resolved_text.split('_').filter(|part| !part.is_empty());
        let (Some(class_name), Some(method_name)) = (parts.next(), parts.next()) else {
            return Ok(None);
        };

        let mut hits = Hits { count: 0, last: None };
        for file in self.index.find_class(class_name) {
            scan_file(file, method_name, &mut hits)?;
        }

        let link = match (hits.count, hits.last) {
            (1, Some((file, line))) => Some(SourceLink { file, line: Some(line) }),
            (_, Some((file, _))) => Some(SourceLink { file, line: None }),
            (_, None) => None,
        };

        Ok(link)
    }
}

/// A declaration line names the method and has no assignment or member access.
fn is_declaration(line: &str, method_name: &str) -> bool {
    line.contains(method_name) && !line.contains('=') && !line.contains('.')
}

fn scan_file(file: &Path, method_name: &str, hits: &mut Hits) -> Result<(), SourceError> {
    let bytes = fs::read(file)?;
    let contents = String::from_utf8_lossy(&bytes);

    for (idx, line) in contents.lines().enumerate() {
        if is_declaration(line, method_name) {
            hits.count += 1;
            hits.last = Some((file.to_path_buf(), idx as u32 + 1));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(contents: &str) -> (tempfile::TempDir, ProjectSourceIndex) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PlayerController.cs");
        fs::write(&path, contents).unwrap();
        let index = ProjectSourceIndex::build(dir.path()).unwrap();
        (dir, index)
    }

    #[test]
    fn test_single_declaration_gives_line() {
        let (dir, index) = index_with(
            "public class PlayerController\n{\n    void Update()\n    {\n        speed = 3;\n        this.Update();\n    }\n}\n",
        );
        let mapper = SourceHeuristicMapper::new(&index);

        let link = mapper.annotate("PlayerController_Update_something").unwrap();

        assert_eq!(link.file, dir.path().join("PlayerController.cs"));
        assert_eq!(link.line, Some(3));
    }

    #[test]
    fn test_two_declarations_give_file_only() {
        let (dir, index) = index_with("void Update()\nvoid Update(int frame)\n");
        let mapper = SourceHeuristicMapper::new(&index);

        let link = mapper.annotate("PlayerController_Update_something").unwrap();

        assert_eq!(
            link,
            SourceLink {
                file: dir.path().join("PlayerController.cs"),
                line: None,
            }
        );
    }

    #[test]
    fn test_no_match() {
        let (_dir, index) = index_with("void Update()\n");
        let mapper = SourceHeuristicMapper::new(&index);

        assert_eq!(mapper.annotate("PlayerController_Start_m1"), None);
        assert_eq!(mapper.annotate("EnemyController_Update_m1"), None);
        assert_eq!(mapper.annotate("Update"), None);
        assert_eq!(mapper.annotate("__Update_"), None);
    }

    #[test]
    fn test_empty_parts_are_dropped() {
        let (_dir, index) = index_with("void Update()\n");
        let mapper = SourceHeuristicMapper::new(&index);

        let link = mapper.annotate("__PlayerController__Update").unwrap();
        assert_eq!(link.line, Some(1));
    }

    #[test]
    fn test_unreadable_file_degrades() {
        let mut index = ProjectSourceIndex::empty();
        index.insert(PathBuf::from("/nonexistent/PlayerController.cs"));
        let mapper = SourceHeuristicMapper::new(&index);

        assert_eq!(mapper.annotate("PlayerController_Update_m1"), None);
    }
}
