// Mon Oct 19 2026 - Alex

use super::OutputError;
use crate::pipeline::{OutputEntry, ResolvedFrame, SymbolicationReport};
use crate::symbol::{LibraryCatalog, LibrarySeverity};
use colored::*;
use std::io::Write;
use std::path::Path;

/// Renders a report as the plain-text block users paste into bug trackers.
pub struct ReportFormatter<'a> {
    catalog: &'a LibraryCatalog,
    use_color: bool,
}

impl<'a> ReportFormatter<'a> {
    pub fn new(catalog: &'a LibraryCatalog) -> Self {
        Self {
            catalog,
            use_color: true,
        }
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.use_color = enabled;
        self
    }

    pub fn render(&self, report: &SymbolicationReport) -> String {
        let mut out = String::new();
        for entry in report.entries() {
            out.push_str(&self.format_entry(entry, report));
            out.push('\n');
        }
        out
    }

    pub fn write_to<W: Write>(&self, report: &SymbolicationReport, writer: &mut W) -> Result<(), OutputError> {
        writer.write_all(self.render(report).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Writes without color regardless of the formatter setting.
    pub fn write_to_file<P: AsRef<Path>>(&self, report: &SymbolicationReport, path: P) -> Result<(), OutputError> {
        let plain = ReportFormatter::new(self.catalog).with_color(false);
        std::fs::write(path, plain.render(report))?;
        Ok(())
    }

    pub fn format_entry(&self, entry: &OutputEntry, report: &SymbolicationReport) -> String {
        match entry {
            OutputEntry::Context { text } => text.clone(),
            OutputEntry::Command { command } => format!("{} {}", self.paint("Executing Command:", |s| s.bold()), command),
            OutputEntry::Frame(frame) => self.format_frame(frame, report),
            OutputEntry::UnknownLibrary { library, address } => {
                self.paint(&format!("Unknown library named {} :: {}", library, address), |s| s.red())
            }
            OutputEntry::MissingFile { library, path, .. } => self.paint(
                &format!("Failed to find lib {} at Path: {}", library, path.display()),
                |s| s.red(),
            ),
        }
    }

    fn format_frame(&self, frame: &ResolvedFrame, report: &SymbolicationReport) -> String {
        let library = frame.library();
        let label = match report.severity(library, self.catalog) {
            LibrarySeverity::Resolved => self.paint(library, |s| s.green()),
            LibrarySeverity::Engine => self.paint(library, |s| s.yellow()),
            LibrarySeverity::Unknown => self.paint(library, |s| s.red()),
        };

        let mut line = format!(" at {}.{} => {}", label, frame.address(), frame.resolved_text);
        if let Some(link) = &frame.source_link {
            line.push(' ');
            line.push_str(&self.paint(&link.to_string(), |s| s.italic()));
        }

        if let Some(stderr) = &frame.stderr {
            line.push('\n');
            line.push_str(&format!("{} {} => {}", self.paint("[Error]", |s| s.red()), frame.address(), stderr));
        }

        line
    }

    fn paint(&self, text: &str, style: impl Fn(ColoredString) -> ColoredString) -> String {
        if self.use_color {
            style(text.normal()).to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ResultAggregator;
    use crate::report::AddressRecord;
    use crate::source::SourceLink;
    use crate::symbol::UnknownLibraryRegistry;
    use std::path::PathBuf;

    fn report() -> SymbolicationReport {
        let mut aggregator = ResultAggregator::new();
        let mut unknown = UnknownLibraryRegistry::new();
        unknown.record("MyGame");

        aggregator.push_context("Crash report");
        aggregator.push_unknown("MyGame", "0x1a2b3c4");
        aggregator.push_frame(ResolvedFrame {
            record: AddressRecord::new("0x10", vec!["libil2cpp".to_string()]).unwrap(),
            library_index: 0,
            resolved_text: "PlayerController_Update_m1".to_string(),
            source_link: Some(SourceLink {
                file: PathBuf::from("Assets/PlayerController.cs"),
                line: Some(3),
            }),
            stderr: None,
        });
        aggregator.push_frame(ResolvedFrame {
            record: AddressRecord::new("0x20", vec!["libunity".to_string()]).unwrap(),
            library_index: 0,
            resolved_text: String::new(),
            source_link: None,
            stderr: Some("File format not recognized".to_string()),
        });
        aggregator.push_missing("libunity", PathBuf::from("/hub/libunity.sym.so"), "0x30");
        aggregator.finish(4, unknown)
    }

    #[test]
    fn test_plain_rendering() {
        let formatter = ReportFormatter::new(LibraryCatalog::global()).with_color(false);
        let text = formatter.render(&report());

        assert_eq!(
            text,
            "Crash report\n\
             Unknown library named MyGame :: 0x1a2b3c4\n \
             at libil2cpp.0x10 => PlayerController_Update_m1 (at Assets/PlayerController.cs:3, this is a guess)\n \
             at libunity.0x20 => \n\
             [Error] 0x20 => File format not recognized\n\
             Failed to find lib libunity at Path: /hub/libunity.sym.so\n"
        );
    }

    #[test]
    fn test_write_to_file_has_no_escape_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        ReportFormatter::new(LibraryCatalog::global())
            .write_to_file(&report(), &path)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains('\u{1b}'));
        assert!(contents.starts_with("Crash report\n"));
    }
}
