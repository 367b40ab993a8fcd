// Sat Oct 17 2026 - Alex

pub mod parser;

pub use parser::ReportParser;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One address found in a crash report and the libraries to resolve it against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRecord {
    address: String,
    libraries: Vec<String>,
}

impl AddressRecord {
    /// Returns `None` when no library is given; a record always has at least one.
    pub fn new(address: &str, libraries: Vec<String>) -> Option<Self> {
        if libraries.is_empty() {
            return None;
        }
        Some(Self {
            address: address.to_string(),
            libraries,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Context(String),
    Address(AddressRecord),
}

impl ReportLine {
    pub fn as_record(&self) -> Option<&AddressRecord> {
        match self {
            ReportLine::Address(record) => Some(record),
            ReportLine::Context(_) => None,
        }
    }
}

pub fn count_records(lines: &[ReportLine]) -> usize {
    lines.iter().filter(|line| line.as_record().is_some()).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// Library named by the text between `at ` and the next `.`.
    #[default]
    #[serde(rename = "contextual")]
    Contextual,
    /// Library named by the text between `at ` and `.0x`. Kept for older reports.
    #[serde(rename = "legacy")]
    ContextualLegacy,
    #[serde(rename = "engine")]
    EngineOnly,
    #[serde(rename = "user")]
    UserCodeOnly,
    #[serde(rename = "all")]
    AllKnown,
}

impl ExtractionMode {
    pub const ALL: [ExtractionMode; 5] = [
        ExtractionMode::Contextual,
        ExtractionMode::ContextualLegacy,
        ExtractionMode::EngineOnly,
        ExtractionMode::UserCodeOnly,
        ExtractionMode::AllKnown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExtractionMode::Contextual => "contextual",
            ExtractionMode::ContextualLegacy => "legacy",
            ExtractionMode::EngineOnly => "engine",
            ExtractionMode::UserCodeOnly => "user",
            ExtractionMode::AllKnown => "all",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| format!("unknown extraction mode '{}' (expected contextual, legacy, engine, user or all)", s))
    }
}
