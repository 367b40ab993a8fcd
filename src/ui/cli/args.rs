// Mon Oct 19 2026 - Alex

use crate::metadata::{Architecture, ReleaseFlavor, ScriptingBackend};
use crate::output::OutputFormat;
use crate::report::ExtractionMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crash-symbolicator")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Symbolicates Android crash reports from Unity player builds", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    /// Settings file to use instead of the per-user one.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every address in a crash report.
    Symbolicate(SymbolicateArgs),
    /// Show the build metadata found in a crash report.
    Metadata(MetadataArgs),
    /// List engine versions under the install root.
    Versions,
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Open `path[:line[:column]]` in the configured editor.
    Open(OpenArgs),
}

#[derive(Parser, Debug)]
pub struct SymbolicateArgs {
    /// Crash report file; reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// contextual, legacy, engine, user or all.
    #[arg(short, long)]
    pub mode: Option<ExtractionMode>,

    #[arg(short, long)]
    pub arch: Option<Architecture>,

    #[arg(long)]
    pub flavor: Option<ReleaseFlavor>,

    #[arg(long)]
    pub backend: Option<ScriptingBackend>,

    #[arg(long)]
    pub runtime_version: Option<String>,

    /// addr2line to use instead of the NDK one.
    #[arg(long)]
    pub tool: Option<PathBuf>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    #[arg(long)]
    pub print_commands: bool,

    #[arg(long)]
    pub no_progress: bool,

    /// Save the final build selection as the new default.
    #[arg(long)]
    pub remember: bool,
}

#[derive(Parser, Debug)]
pub struct MetadataArgs {
    pub input: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    Show,
    SetInstallRoot { path: PathBuf },
    SetSymbolsRoot { path: PathBuf },
    SetSourceRoot { path: PathBuf },
    SetTool { path: PathBuf },
    /// Template with `{path}`, `{line}` and `{column}` placeholders.
    SetEditor { command: String },
}

#[derive(Parser, Debug)]
pub struct OpenArgs {
    pub reference: String,

    /// Overrides the configured editor command.
    #[arg(long)]
    pub editor: Option<String>,
}

impl SymbolicateArgs {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(input) = &self.input {
            if input.as_os_str() != "-" && !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }
        if let Some(tool) = &self.tool {
            if !tool.exists() {
                return Err(format!("Tool does not exist: {}", tool.display()));
            }
        }
        Ok(())
    }
}
