// Mon Oct 19 2026 - Alex

use super::OutputError;
use crate::pipeline::SymbolicationReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct JsonExporter {
    pretty_print: bool,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn export(&self, report: &SymbolicationReport) -> Result<String, OutputError> {
        let json = if self.pretty_print {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    pub fn export_to_file<P: AsRef<Path>>(&self, report: &SymbolicationReport, path: P) -> Result<(), OutputError> {
        let json = self.export(report)?;
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        writer.write_all(json.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}
