// Mon Oct 19 2026 - Alex

use super::aggregator::{ResolvedFrame, ResultAggregator, SymbolicationReport};
use super::error::PipelineError;
use super::CancelToken;
use crate::config::{ConfigError, Settings};
use crate::metadata::BuildConfig;
use crate::report::{count_records, AddressRecord, ExtractionMode, ReportLine, ReportParser};
use crate::source::{ProjectSourceIndex, SourceHeuristicMapper};
use crate::symbol::{LibraryCatalog, SymbolPathResolver, UnknownLibraryRegistry};
use crate::toolchain::{EngineLayout, HostPlatform, SymbolLookup, ToolchainLocator};
use crate::utils::ScopedTimer;
use std::path::{Path, PathBuf};

/// Receives a notification after each address record.
pub trait ProgressSink {
    fn progress(&self, done: usize, total: usize, message: &str);
}

pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn progress(&self, _done: usize, _total: usize, _message: &str) {}
}

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct SymbolicationJob {
    pub text: String,
    pub mode: ExtractionMode,
    pub config: BuildConfig,
    pub install_root: PathBuf,
    pub project_symbols_root: PathBuf,
    pub project_source_root: Option<PathBuf>,
    pub tool_override: Option<PathBuf>,
    pub print_commands: bool,
    pub catalog: LibraryCatalog,
    pub host: HostPlatform,
}

impl SymbolicationJob {
    pub fn new<A: Into<PathBuf>, B: Into<PathBuf>>(text: &str, install_root: A, project_symbols_root: B) -> Self {
        Self {
            text: text.to_string(),
            mode: ExtractionMode::default(),
            config: BuildConfig::default(),
            install_root: install_root.into(),
            project_symbols_root: project_symbols_root.into(),
            project_source_root: None,
            tool_override: None,
            print_commands: false,
            catalog: LibraryCatalog::standard(),
            host: HostPlatform::current(),
        }
    }

    /// Fails when a required root is not configured.
    pub fn from_settings(text: &str, settings: &Settings, config: BuildConfig) -> Result<Self, ConfigError> {
        settings.validate()?;
        let install_root = settings.install_root.clone().ok_or(ConfigError::MissingInstallRoot)?;
        let symbols_root = settings
            .project_symbols_root
            .clone()
            .ok_or(ConfigError::MissingSymbolsRoot)?;

        let mut job = Self::new(text, install_root, symbols_root)
            .with_mode(settings.extraction_mode)
            .with_config(config)
            .with_print_commands(settings.print_commands);
        job.project_source_root = settings.project_source_root.clone();
        job.tool_override = settings.tool_override.clone();
        Ok(job)
    }

    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_source_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.project_source_root = Some(root.into());
        self
    }

    pub fn with_tool<P: Into<PathBuf>>(mut self, tool: P) -> Self {
        self.tool_override = Some(tool.into());
        self
    }

    pub fn with_print_commands(mut self, enabled: bool) -> Self {
        self.print_commands = enabled;
        self
    }

    pub fn with_catalog(mut self, catalog: LibraryCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_host(mut self, host: HostPlatform) -> Self {
        self.host = host;
        self
    }

    pub fn layout(&self) -> EngineLayout {
        EngineLayout::new(&self.install_root).with_host(self.host)
    }

    /// The override when set, otherwise the NDK's addr2line.
    pub fn tool_path(&self) -> Result<PathBuf, PipelineError> {
        if let Some(tool) = &self.tool_override {
            return Ok(tool.clone());
        }
        let layout = self.layout();
        Ok(ToolchainLocator::new(&layout).locate(&self.config)?)
    }
}

/// Per-run state shared by the record loop.
struct RunContext<'a> {
    job: &'a SymbolicationJob,
    tool: &'a Path,
    resolver: SymbolPathResolver<'a>,
    mapper: SourceHeuristicMapper<'a>,
    registry: UnknownLibraryRegistry,
    aggregator: ResultAggregator,
}

pub struct Symbolicator<L: SymbolLookup> {
    lookup: L,
}

impl<L: SymbolLookup> Symbolicator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn run(&self, job: &SymbolicationJob, progress: &dyn ProgressSink) -> Result<SymbolicationReport, PipelineError> {
        self.run_with_cancel(job, progress, &CancelToken::new())
    }

    /// Resolves every record in input order. Fails before launching any
    /// process when there is nothing to resolve or the tool is missing.
    pub fn run_with_cancel(
        &self,
        job: &SymbolicationJob,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<SymbolicationReport, PipelineError> {
        let _timer = ScopedTimer::new("symbolication");

        let lines = ReportParser::new(job.mode, &job.catalog).parse(&job.text);
        let total = count_records(&lines);
        if total == 0 {
            return Err(PipelineError::NoAddresses);
        }

        let tool = job.tool_path()?;
        if !tool.is_file() {
            return Err(PipelineError::MissingTool(tool));
        }
        log::info!("Symbolicating {} addresses with {}", total, tool.display());

        let layout = job.layout();
        let index = build_source_index(job.project_source_root.as_deref());
        let mut ctx = RunContext {
            job,
            tool: &tool,
            resolver: SymbolPathResolver::new(&job.catalog, &layout, &job.project_symbols_root),
            mapper: SourceHeuristicMapper::new(&index),
            registry: UnknownLibraryRegistry::new(),
            aggregator: ResultAggregator::new(),
        };

        let mut done = 0;
        for line in &lines {
            match line {
                ReportLine::Context(text) => ctx.aggregator.push_context(text),
                ReportLine::Address(record) => {
                    if cancel.is_cancelled() {
                        log::info!("Cancelled after {} of {} addresses", done, total);
                        return Err(PipelineError::Cancelled);
                    }

                    self.symbolicate_record(&mut ctx, record);
                    done += 1;
                    progress.progress(done, total, record.address());
                }
            }
        }

        if !ctx.registry.is_empty() {
            log::warn!("{} unknown libraries", ctx.registry.len());
        }

        Ok(ctx.aggregator.finish(total, ctx.registry))
    }

    fn symbolicate_record(&self, ctx: &mut RunContext<'_>, record: &AddressRecord) {
        let address = record.address();

        for (library_index, library) in record.libraries().iter().enumerate() {
            let resolution = ctx.resolver.resolve(library, &ctx.job.config, &mut ctx.registry);
            let Some(symbol_file) = resolution.path() else {
                ctx.aggregator.push_unknown(library, address);
                continue;
            };

            if !symbol_file.exists() {
                log::warn!("Symbol file for {} missing: {}", library, symbol_file.display());
                ctx.aggregator.push_missing(library, symbol_file.to_path_buf(), address);
                continue;
            }

            if ctx.job.print_commands {
                ctx.aggregator
                    .push_command(self.lookup.command_line(ctx.tool, symbol_file, address));
            }

            let (resolved_text, stderr) = match self.lookup.lookup(ctx.tool, symbol_file, address) {
                Ok(output) => (output.symbol_text(), output.error_text()),
                Err(e) => {
                    log::error!("{}", e);
                    (String::new(), Some(e.to_string()))
                }
            };

            let source_link = if ctx.job.catalog.is_user_code(library) && !resolved_text.is_empty() {
                ctx.mapper.annotate(&resolved_text)
            } else {
                None
            };

            ctx.aggregator.push_frame(ResolvedFrame {
                record: record.clone(),
                library_index,
                resolved_text,
                source_link,
                stderr,
            });
        }
    }
}

fn build_source_index(root: Option<&Path>) -> ProjectSourceIndex {
    let Some(root) = root else {
        return ProjectSourceIndex::empty();
    };

    match ProjectSourceIndex::build(root) {
        Ok(index) => index,
        Err(e) => {
            log::warn!("Source mapping disabled: {}", e);
            ProjectSourceIndex::empty()
        }
    }
}
