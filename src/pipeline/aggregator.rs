// Mon Oct 19 2026 - Alex

use crate::report::AddressRecord;
use crate::source::SourceLink;
use crate::symbol::{LibraryCatalog, LibrarySeverity, UnknownLibraryRegistry};
use serde::Serialize;
use std::path::PathBuf;

/// One address resolved against one library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFrame {
    pub record: AddressRecord,
    pub library_index: usize,
    pub resolved_text: String,
    pub source_link: Option<SourceLink>,
    pub stderr: Option<String>,
}

impl ResolvedFrame {
    pub fn library(&self) -> &str {
        &self.record.libraries()[self.library_index]
    }

    pub fn address(&self) -> &str {
        self.record.address()
    }

    pub fn has_error(&self) -> bool {
        self.stderr.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputEntry {
    Context { text: String },
    Command { command: String },
    Frame(ResolvedFrame),
    UnknownLibrary { library: String, address: String },
    MissingFile { library: String, path: PathBuf, address: String },
}

impl OutputEntry {
    pub fn is_error(&self) -> bool {
        match self {
            OutputEntry::Frame(frame) => frame.has_error(),
            OutputEntry::UnknownLibrary { .. } | OutputEntry::MissingFile { .. } => true,
            OutputEntry::Context { .. } | OutputEntry::Command { .. } => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResultAggregator {
    entries: Vec<OutputEntry>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_context(&mut self, text: &str) {
        self.entries.push(OutputEntry::Context { text: text.to_string() });
    }

    pub fn push_command(&mut self, command: String) {
        self.entries.push(OutputEntry::Command { command });
    }

    pub fn push_frame(&mut self, frame: ResolvedFrame) {
        self.entries.push(OutputEntry::Frame(frame));
    }

    pub fn push_unknown(&mut self, library: &str, address: &str) {
        self.entries.push(OutputEntry::UnknownLibrary {
            library: library.to_string(),
            address: address.to_string(),
        });
    }

    pub fn push_missing(&mut self, library: &str, path: PathBuf, address: &str) {
        self.entries.push(OutputEntry::MissingFile {
            library: library.to_string(),
            path,
            address: address.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self, record_count: usize, unknown: UnknownLibraryRegistry) -> SymbolicationReport {
        SymbolicationReport {
            entries: self.entries,
            record_count,
            unknown_libraries: unknown,
        }
    }
}

/// Ordered result of one run.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolicationReport {
    entries: Vec<OutputEntry>,
    record_count: usize,
    #[serde(serialize_with = "serialize_registry")]
    unknown_libraries: UnknownLibraryRegistry,
}

fn serialize_registry<S: serde::Serializer>(registry: &UnknownLibraryRegistry, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(registry.iter())
}

impl SymbolicationReport {
    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn frames(&self) -> impl Iterator<Item = &ResolvedFrame> {
        self.entries.iter().filter_map(|entry| match entry {
            OutputEntry::Frame(frame) => Some(frame),
            _ => None,
        })
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn frame_count(&self) -> usize {
        self.frames().count()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_error()).count()
    }

    pub fn unknown_libraries(&self) -> Vec<&str> {
        self.unknown_libraries.iter().collect()
    }

    pub fn is_unknown(&self, library: &str) -> bool {
        self.unknown_libraries.contains(library)
    }

    pub fn severity(&self, library: &str, catalog: &LibraryCatalog) -> LibrarySeverity {
        LibrarySeverity::of(library, catalog, &self.unknown_libraries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(address: &str, stderr: Option<&str>) -> ResolvedFrame {
        ResolvedFrame {
            record: AddressRecord::new(address, vec!["libil2cpp".to_string()]).unwrap(),
            library_index: 0,
            resolved_text: "Foo_Bar".to_string(),
            source_link: None,
            stderr: stderr.map(str::to_string),
        }
    }

    #[test]
    fn test_counts_and_order() {
        let mut aggregator = ResultAggregator::new();
        let mut unknown = UnknownLibraryRegistry::new();
        unknown.record("MyGame");

        aggregator.push_context("Crash report");
        aggregator.push_frame(frame("0x10", None));
        aggregator.push_unknown("MyGame", "0x20");
        aggregator.push_frame(frame("0x30", Some("bad file")));
        aggregator.push_missing("libunity", PathBuf::from("/x/libunity.sym.so"), "0x40");

        let report = aggregator.finish(4, unknown);

        assert_eq!(report.entries().len(), 5);
        assert_eq!(report.frame_count(), 2);
        assert_eq!(report.error_count(), 3);
        assert_eq!(report.record_count(), 4);
        assert_eq!(report.unknown_libraries(), vec!["MyGame"]);
        assert_eq!(
            report.frames().map(ResolvedFrame::address).collect::<Vec<_>>(),
            vec!["0x10", "0x30"]
        );
        assert_eq!(
            report.severity("MyGame", LibraryCatalog::global()),
            LibrarySeverity::Unknown
        );
    }

    #[test]
    fn test_entry_serialization_is_tagged() {
        let entry = OutputEntry::UnknownLibrary {
            library: "MyGame".to_string(),
            address: "0x1".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["kind"], "unknown_library");
        assert_eq!(json["library"], "MyGame");
    }
}
