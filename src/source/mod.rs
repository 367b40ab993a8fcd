// Sun Oct 18 2026 - Alex

pub mod index;
pub mod mapper;
pub mod navigation;

pub use index::ProjectSourceIndex;
pub use mapper::SourceHeuristicMapper;
pub use navigation::{CommandEditor, LinkDispatcher, NavigationHost, NavigationTarget};

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to index {}: {message}", .root.display())]
    Index { root: PathBuf, message: String },
    #[error("Invalid editor command: {0}")]
    InvalidEditorCommand(String),
}

/// A guessed declaration site. `line` is `None` when the method matched more
/// than one line of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    pub file: PathBuf,
    pub line: Option<u32>,
}

impl SourceLink {
    pub fn to_target(&self) -> NavigationTarget {
        NavigationTarget::new(self.file.clone(), self.line.unwrap_or(0), 0)
    }
}

impl fmt::Display for SourceLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "(at {}:{}, this is a guess)", self.file.display(), line),
            None => write!(f, "(at {}, this is a guess)", self.file.display()),
        }
    }
}
