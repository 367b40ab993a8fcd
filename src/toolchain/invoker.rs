// Sun Oct 18 2026 - Alex

use super::error::InvokeError;
use super::{SymbolLookup, ToolOutput};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs `addr2line -f -C -e <file> <address>` once per lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Addr2LineInvoker;

impl Addr2LineInvoker {
    pub fn new() -> Self {
        Self
    }

    pub fn arguments(symbol_file: &Path, address: &str) -> Vec<OsString> {
        vec![
            OsString::from("-f"),
            OsString::from("-C"),
            OsString::from("-e"),
            symbol_file.as_os_str().to_os_string(),
            OsString::from(address),
        ]
    }

    fn command(tool: &Path, symbol_file: &Path, address: &str) -> Command {
        let mut command = Command::new(tool);
        command
            .args(Self::arguments(symbol_file, address))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        command
    }
}

impl SymbolLookup for Addr2LineInvoker {
    fn lookup(&self, tool: &Path, symbol_file: &Path, address: &str) -> Result<ToolOutput, InvokeError> {
        let output = Self::command(tool, symbol_file, address)
            .output()
            .map_err(|source| InvokeError::Spawn {
                tool: tool.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            log::debug!("{} exited with {}", tool.display(), output.status);
        }

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments() {
        let args = Addr2LineInvoker::arguments(Path::new("/symbols/libil2cpp.sym.so"), "0x1a2b");
        assert_eq!(args, vec!["-f", "-C", "-e", "/symbols/libil2cpp.sym.so", "0x1a2b"]);
    }

    #[test]
    fn test_command_line() {
        let line = Addr2LineInvoker.command_line(Path::new("addr2line"), Path::new("lib.so"), "0x10");
        assert_eq!(line, "addr2line -f -C -e \"lib.so\" 0x10");

        let spaced = Addr2LineInvoker.command_line(
            Path::new("addr2line"),
            Path::new("/Program Files/Unity/libunity.sym.so"),
            "0x20",
        );
        assert_eq!(spaced, "addr2line -f -C -e \"/Program Files/Unity/libunity.sym.so\" 0x20");
    }

    #[test]
    fn test_spawn_failure() {
        let result = Addr2LineInvoker.lookup(Path::new("/nonexistent/addr2line"), Path::new("lib.so"), "0x10");
        assert!(matches!(result, Err(InvokeError::Spawn { .. })));
    }
}
