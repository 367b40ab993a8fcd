// Mon Oct 19 2026 - Alex

use super::args::{Args, Command, ConfigCommand, MetadataArgs, OpenArgs, SymbolicateArgs};
use crate::config::Settings;
use crate::metadata::{BuildConfig, Installations, MetadataExtractor};
use crate::output::{JsonExporter, OutputFormat, ReportFormatter};
use crate::pipeline::{SymbolicationJob, SymbolicationReport, SymbolicationWorker};
use crate::source::navigation::parse_reference;
use crate::source::{CommandEditor, NavigationHost};
use crate::symbol::LibraryCatalog;
use crate::toolchain::Addr2LineInvoker;
use crate::ui::progress::ProgressManager;
use crate::ui::{print_info, print_success, print_warning};
use crate::utils::{pluralize, LoggingUtils};
use anyhow::{anyhow, Context};
use colored::Colorize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub struct CommandHandler {
    quiet: bool,
    color: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            quiet: false,
            color: true,
        }
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args)?;
        self.quiet = args.quiet;
        self.color = !args.no_color;
        if args.no_color {
            colored::control::set_override(false);
        }

        let settings_path = args.settings.clone().unwrap_or_else(Settings::default_path);

        match args.command {
            Command::Symbolicate(sym_args) => self.handle_symbolicate(&settings_path, sym_args),
            Command::Metadata(meta_args) => self.handle_metadata(&settings_path, meta_args),
            Command::Versions => self.handle_versions(&settings_path),
            Command::Config(config_cmd) => self.handle_config(&settings_path, config_cmd),
            Command::Open(open_args) => self.handle_open(&settings_path, open_args),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = LoggingUtils::effective_level(&args.log_level, args.quiet);

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }

    fn handle_symbolicate(&self, settings_path: &Path, args: SymbolicateArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow!(e))?;

        let mut settings = Settings::load_or_default(settings_path);
        if let Some(mode) = args.mode {
            settings.extraction_mode = mode;
        }
        if let Some(tool) = &args.tool {
            settings.tool_override = Some(tool.clone());
        }
        if args.print_commands {
            settings.print_commands = true;
        }

        let text = read_report(args.input.as_deref())?;
        let config = self.resolve_build_config(&settings, &text, &args);
        if !self.quiet {
            print_info(&format!("Build: {}", config));
        }

        let job = SymbolicationJob::from_settings(&text, &settings, config.selection())?;

        let progress = ProgressManager::new()
            .with_enabled(!args.no_progress && !self.quiet)
            .create_record_progress("Symbolicating");
        let worker = SymbolicationWorker::spawn(job, Addr2LineInvoker::new());
        let result = worker.wait(|done, total, address| progress.update(done, total, address));
        progress.finish();
        let report = result?;

        self.write_report(&report, args.format, args.output.as_deref())?;

        if !self.quiet {
            let summary = format!(
                "Symbolicated {} ({})",
                pluralize(report.frame_count(), "frame", "frames"),
                pluralize(report.error_count(), "error", "errors")
            );
            if report.error_count() == 0 {
                print_success(&summary);
            } else {
                print_warning(&summary);
            }
        }

        if args.remember {
            settings.last_selection = config.selection();
            settings
                .save(settings_path)
                .with_context(|| format!("Failed to save settings to {}", settings_path.display()))?;
        }

        Ok(())
    }

    /// Last saved selection, then report metadata, then command-line overrides.
    fn resolve_build_config(&self, settings: &Settings, text: &str, args: &SymbolicateArgs) -> BuildConfig {
        let installations = discover_installations(settings);
        let mut config = settings.last_selection.clone();
        let version = installations
            .default_version(config.runtime_version.as_deref())
            .or_else(|| config.runtime_version.clone());
        config.runtime_version = version;

        MetadataExtractor::extract(text, installations.versions(), &mut config);
        self.warn_missing(&config);

        if let Some(arch) = args.arch {
            config.architecture = arch;
        }
        if let Some(flavor) = args.flavor {
            config.release_flavor = flavor;
        }
        if let Some(backend) = args.backend {
            config.scripting_backend = backend;
        }
        if let Some(version) = &args.runtime_version {
            if !installations.contains(version) {
                log::warn!("Runtime version {} is not installed", version);
            }
            config.runtime_version = Some(version.clone());
        }

        config
    }

    fn warn_missing(&self, config: &BuildConfig) {
        if self.quiet {
            return;
        }
        if let Some(version) = &config.missing_version {
            print_warning(&format!("Crash report needs engine version {}, which is not installed", version));
        }
        if let Some(arch) = &config.missing_architecture {
            print_warning(&format!("Missing CPU type {}", arch));
        }
    }

    fn write_report(&self, report: &SymbolicationReport, format: OutputFormat, output: Option<&Path>) -> anyhow::Result<()> {
        match (format, output) {
            (OutputFormat::Text, None) => {
                let formatter = ReportFormatter::new(LibraryCatalog::global()).with_color(self.color);
                formatter.write_to(report, &mut io::stdout().lock())?;
            }
            (OutputFormat::Text, Some(path)) => {
                ReportFormatter::new(LibraryCatalog::global())
                    .write_to_file(report, path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            (OutputFormat::Json, None) => println!("{}", JsonExporter::new().export(report)?),
            (OutputFormat::Json, Some(path)) => {
                JsonExporter::new()
                    .export_to_file(report, path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }

        if let Some(path) = output {
            if !self.quiet {
                print_success(&format!("Output written to: {}", path.display()));
            }
        }
        Ok(())
    }

    fn handle_metadata(&self, settings_path: &Path, args: MetadataArgs) -> anyhow::Result<()> {
        let settings = Settings::load_or_default(settings_path);
        let text = read_report(args.input.as_deref())?;
        let installations = discover_installations(&settings);

        let mut config = settings.last_selection.clone();
        let found = MetadataExtractor::extract(&text, installations.versions(), &mut config);

        if found.is_empty() {
            print_warning("No build metadata found in the crash report");
        }

        let show = |label: &str, value: &Option<String>| {
            println!("  {:<18} {}", label.bold(), value.as_deref().unwrap_or("-"));
        };
        show("Version", &found.runtime_version);
        show("CPU", &found.cpu);
        show("Scripting backend", &found.scripting_backend);
        show("Build type", &found.build_type);

        println!();
        println!("  {:<18} {}", "Selection".bold(), config);
        self.warn_missing(&config);
        Ok(())
    }

    fn handle_versions(&self, settings_path: &Path) -> anyhow::Result<()> {
        let settings = Settings::load_or_default(settings_path);
        let root = settings.install_root.clone().ok_or(crate::config::ConfigError::MissingInstallRoot)?;
        let installations =
            Installations::discover(&root).with_context(|| format!("Failed to read install root {}", root.display()))?;

        if !installations.is_valid() {
            print_warning(&format!("No engine versions found under {}", root.display()));
            return Ok(());
        }

        let preferred = installations.default_version(settings.last_selection.runtime_version.as_deref());
        for version in installations.versions() {
            if preferred.as_deref() == Some(version.as_str()) {
                println!("{} {}", "*".green(), version.green());
            } else {
                println!("  {}", version);
            }
        }
        Ok(())
    }

    fn handle_config(&self, settings_path: &Path, command: ConfigCommand) -> anyhow::Result<()> {
        let settings = Settings::load_or_default(settings_path);

        let updated = match command {
            ConfigCommand::Show => {
                println!("{}", format!("Settings: {}", settings_path.display()).cyan());
                println!("{}", serde_json::to_string_pretty(&settings)?);
                if let Err(e) = settings.validate() {
                    print_warning(&e.to_string());
                }
                return Ok(());
            }
            ConfigCommand::SetInstallRoot { path } => {
                let installations = Installations::discover(&path)
                    .with_context(|| format!("Failed to read install root {}", path.display()))?;
                if !installations.is_valid() {
                    print_warning("No engine versions found there; keeping it anyway");
                }
                settings.with_install_root(absolute(path))
            }
            ConfigCommand::SetSymbolsRoot { path } => settings.with_project_symbols_root(absolute(path)),
            ConfigCommand::SetSourceRoot { path } => settings.with_project_source_root(absolute(path)),
            ConfigCommand::SetTool { path } => {
                if !path.is_file() {
                    return Err(anyhow!("Tool does not exist: {}", path.display()));
                }
                settings.with_tool_override(absolute(path))
            }
            ConfigCommand::SetEditor { command } => {
                CommandEditor::from_template(&command)?;
                settings.with_editor_command(&command)
            }
        };

        updated
            .save(settings_path)
            .with_context(|| format!("Failed to save settings to {}", settings_path.display()))?;
        if !self.quiet {
            print_success(&format!("Settings saved to {}", settings_path.display()));
        }
        Ok(())
    }

    fn handle_open(&self, settings_path: &Path, args: OpenArgs) -> anyhow::Result<()> {
        let settings = Settings::load_or_default(settings_path);
        let template = args
            .editor
            .or(settings.editor_command)
            .ok_or_else(|| anyhow!("No editor configured; use `config set-editor` or --editor"))?;

        let editor = CommandEditor::from_template(&template)?;
        let target = parse_reference(&args.reference);
        if !target.path.exists() {
            return Err(anyhow!("File does not exist: {}", target.path.display()));
        }

        if !editor.open(&target) {
            return Err(anyhow!("Editor {} could not be started", editor.program()));
        }
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn read_report(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let file = fs::File::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
            read_lossy(file).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => read_lossy(io::stdin().lock()).context("Failed to read crash report from stdin"),
    }
}

/// Invalid UTF-8 is replaced, not rejected.
fn read_lossy<R: Read>(mut reader: R) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn discover_installations(settings: &Settings) -> Installations {
    let Some(root) = &settings.install_root else {
        return Installations::from_versions(PathBuf::new(), Vec::new());
    };

    match Installations::discover(root) {
        Ok(installations) => installations,
        Err(e) => {
            log::warn!("Cannot list engine versions in {}: {}", root.display(), e);
            Installations::from_versions(root.clone(), Vec::new())
        }
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    fs::canonicalize(&path).unwrap_or(path)
}
