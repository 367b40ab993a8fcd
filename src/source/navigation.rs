// Sun Oct 18 2026 - Alex

use super::SourceError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl NavigationTarget {
    pub fn new<P: Into<PathBuf>>(path: P, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

/// Something able to show a file at a position, typically an editor.
pub trait NavigationHost {
    /// Returns `true` when the host accepted the request.
    fn open(&self, target: &NavigationTarget) -> bool;
}

/// Turns raw hyperlink payloads into navigation requests.
pub struct LinkDispatcher<H: NavigationHost> {
    host: H,
}

impl<H: NavigationHost> LinkDispatcher<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Reads `href`, `line` and `column`. Unparsable numbers become 0; a
    /// missing `href` or a path that does not exist is ignored.
    pub fn dispatch(&self, payload: &HashMap<String, String>) -> bool {
        let Some(href) = payload.get("href") else {
            return false;
        };

        let path = PathBuf::from(href);
        if !path.exists() {
            log::debug!("Ignoring link to missing file {}", href);
            return false;
        }

        let target = NavigationTarget::new(path, number(payload, "line"), number(payload, "column"));
        self.host.open(&target)
    }
}

fn number(payload: &HashMap<String, String>, key: &str) -> u32 {
    payload.get(key).and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Splits `path[:line[:column]]`, keeping colons that belong to the path.
pub fn parse_reference(reference: &str) -> NavigationTarget {
    let mut parts = reference.rsplitn(3, ':').collect::<Vec<_>>();
    parts.reverse();

    let numbers = parts
        .iter()
        .skip(1)
        .map(|p| p.parse::<u32>().ok())
        .collect::<Vec<_>>();

    match (parts.as_slice(), numbers.as_slice()) {
        ([path, _, _], [Some(line), Some(column)]) => NavigationTarget::new(*path, *line, *column),
        ([head, mid, _], [None, Some(line)]) => NavigationTarget::new(format!("{}:{}", head, mid), *line, 0),
        ([path, _], [Some(line)]) => NavigationTarget::new(*path, *line, 0),
        _ => NavigationTarget::new(reference, 0, 0),
    }
}

/// Opens files by running an editor command template. `{path}`, `{line}` and
/// `{column}` are substituted in each argument.
#[derive(Debug, Clone)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
}

impl CommandEditor {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
        }
    }

    /// Whitespace-separated template, e.g. `code --goto {path}:{line}:{column}`.
    pub fn from_template(template: &str) -> Result<Self, SourceError> {
        let mut words = template.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| SourceError::InvalidEditorCommand(template.to_string()))?;
        Ok(Self::new(program, words.map(str::to_string).collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn render_args(&self, target: &NavigationTarget) -> Vec<String> {
        let path = target.path.display().to_string();
        let line = target.line.to_string();
        let column = target.column.to_string();

        self.args
            .iter()
            .map(|arg| {
                arg.replace("{path}", &path)
                    .replace("{line}", &line)
                    .replace("{column}", &column)
            })
            .collect()
    }

    /// Starts the editor and reaps it on a background thread, which yields
    /// the exit status once the editor closes.
    pub fn launch(&self, target: &NavigationTarget) -> io::Result<JoinHandle<Option<ExitStatus>>> {
        let mut child = Command::new(&self.program)
            .args(self.render_args(target))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let program = self.program.clone();
        thread::Builder::new()
            .name("editor-reaper".to_string())
            .spawn(move || match child.wait() {
                Ok(status) => {
                    log::debug!("Editor {} exited with {}", program, status);
                    Some(status)
                }
                Err(e) => {
                    log::warn!("Lost track of editor {}: {}", program, e);
                    None
                }
            })
    }
}

impl NavigationHost for CommandEditor {
    fn open(&self, target: &NavigationTarget) -> bool {
        match self.launch(target) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to launch editor {}: {}", self.program, e);
                false
            }
        }
    }
}
