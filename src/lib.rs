// Mon Oct 19 2026 - Alex

pub mod config;
pub mod metadata;
pub mod report;
pub mod symbol;
pub mod toolchain;
pub mod source;
pub mod pipeline;
pub mod output;
pub mod ui;
pub mod utils;

pub use config::Settings;
pub use metadata::{BuildConfig, MetadataExtractor};
pub use report::{AddressRecord, ExtractionMode, ReportParser};
pub use symbol::{LibraryCatalog, SymbolPathResolver};
pub use toolchain::{Addr2LineInvoker, SymbolLookup};
pub use source::SourceHeuristicMapper;
pub use pipeline::{SymbolicationJob, SymbolicationReport, Symbolicator, SymbolicationWorker};
