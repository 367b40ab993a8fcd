// Sun Oct 18 2026 - Alex

pub mod error;
pub mod host;
pub mod invoker;
pub mod ndk;

pub use error::{InvokeError, ToolchainError};
pub use host::{EngineLayout, HostPlatform};
pub use invoker::Addr2LineInvoker;
pub use ndk::{NdkVersion, ToolchainLocator};

use itertools::Itertools;
use std::path::Path;

/// Printed by addr2line when it has no file/line information.
pub const NO_LINE_INFO: &str = "??:?";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Stdout with `??:?` removed and the remaining lines joined by one space.
    pub fn symbol_text(&self) -> String {
        self.stdout
            .replace(NO_LINE_INFO, "")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .join(" ")
    }

    pub fn error_text(&self) -> Option<String> {
        let trimmed = self.stderr.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Resolves one address in one symbol file.
pub trait SymbolLookup {
    fn lookup(&self, tool: &Path, symbol_file: &Path, address: &str) -> Result<ToolOutput, InvokeError>;

    /// Printable form of a lookup. The symbol file is quoted since install
    /// roots often contain spaces.
    fn command_line(&self, tool: &Path, symbol_file: &Path, address: &str) -> String {
        format!("{} -f -C -e \"{}\" {}", tool.display(), symbol_file.display(), address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_text_strips_sentinel() {
        let output = ToolOutput::new("PlayerController_Update_m1\n??:?\n", "");
        assert_eq!(output.symbol_text(), "PlayerController_Update_m1");
        assert_eq!(output.error_text(), None);
    }

    #[test]
    fn test_symbol_text_joins_lines() {
        let output = ToolOutput::new("  Foo::bar()\r\n/src/foo.cpp:42\n\n", "  warning: no debug info \n");
        assert_eq!(output.symbol_text(), "Foo::bar() /src/foo.cpp:42");
        assert_eq!(output.error_text().as_deref(), Some("warning: no debug info"));
    }
}
