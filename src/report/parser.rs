// Sat Oct 17 2026 - Alex

use super::{AddressRecord, ExtractionMode, ReportLine};
use crate::symbol::library::{LibraryCatalog, ENGINE_LIBRARY, USER_CODE_LIBRARY};
use once_cell::sync::Lazy;
use regex::Regex;

static ADDRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"0[xX][0-9a-fA-F]+").expect("address pattern"));
static CONTEXT_LIBRARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bat (.+?)\.").expect("library pattern"));
static LEGACY_LIBRARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bat (.+?)\.0[xX][0-9a-fA-F]").expect("legacy library pattern"));

const MIN_CONTEXT_CHARS: usize = 3;

pub struct ReportParser<'a> {
    mode: ExtractionMode,
    catalog: &'a LibraryCatalog,
}

impl<'a> ReportParser<'a> {
    pub fn new(mode: ExtractionMode, catalog: &'a LibraryCatalog) -> Self {
        Self { mode, catalog }
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    /// Splits `text` into context lines and address records, keeping input order.
    ///
    /// Only the first hex literal of a line is used. In the contextual modes a
    /// line whose library cannot be found is dropped entirely.
    pub fn parse(&self, text: &str) -> Vec<ReportLine> {
        let mut lines = Vec::new();

        for raw in text.split('\n') {
            let line = raw.trim_end_matches('\r');

            let Some(address) = ADDRESS.find(line) else {
                if line.chars().filter(|c| !c.is_whitespace()).count() >= MIN_CONTEXT_CHARS {
                    lines.push(ReportLine::Context(line.to_string()));
                }
                continue;
            };

            match AddressRecord::new(address.as_str(), self.libraries_for(line)) {
                Some(record) => lines.push(ReportLine::Address(record)),
                None => log::debug!("No library found for {}, skipping line", address.as_str()),
            }
        }

        lines
    }

    /// Address records only.
    pub fn records(&self, text: &str) -> Vec<AddressRecord> {
        self.parse(text)
            .into_iter()
            .filter_map(|line| match line {
                ReportLine::Address(record) => Some(record),
                ReportLine::Context(_) => None,
            })
            .collect()
    }

    fn libraries_for(&self, line: &str) -> Vec<String> {
        match self.mode {
            ExtractionMode::Contextual => captured_library(&CONTEXT_LIBRARY, line),
            ExtractionMode::ContextualLegacy => captured_library(&LEGACY_LIBRARY, line),
            ExtractionMode::EngineOnly => vec![ENGINE_LIBRARY.to_string()],
            ExtractionMode::UserCodeOnly => vec![USER_CODE_LIBRARY.to_string()],
            ExtractionMode::AllKnown => self.catalog.names(),
        }
    }
}

fn captured_library(pattern: &Regex, line: &str) -> Vec<String> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
        .map(|name| vec![name.to_string()])
        .unwrap_or_default()
}
