// Mon Oct 19 2026 - Alex

use colored::Colorize;
use std::error::Error;

const MAX_CAUSES: usize = 10;

pub struct ErrorDisplay {
    color_enabled: bool,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self {
            color_enabled: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    /// Header line followed by the `anyhow` context chain.
    pub fn format_anyhow(&self, error: &anyhow::Error) -> String {
        let mut output = format!("{} {}\n", self.header(), error);
        self.push_causes(&mut output, error.chain().nth(1));
        output
    }

    pub fn print_anyhow(&self, error: &anyhow::Error) {
        eprint!("{}", self.format_anyhow(error));
        if let Some(hint) = hint_for(error) {
            eprintln!("{}", self.format_hint(hint));
        }
    }

    pub fn format_hint(&self, message: &str) -> String {
        if self.color_enabled {
            format!("{} {}", "Hint:".cyan(), message)
        } else {
            format!("Hint: {}", message)
        }
    }

    fn header(&self) -> String {
        if self.color_enabled {
            "Error:".red().bold().to_string()
        } else {
            "Error:".to_string()
        }
    }

    fn push_causes(&self, output: &mut String, mut source: Option<&(dyn Error + 'static)>) {
        let arrow = if self.color_enabled {
            "→".yellow().to_string()
        } else {
            "->".to_string()
        };

        let mut depth = 0;
        while let Some(cause) = source {
            if depth == MAX_CAUSES {
                output.push_str("  ... (cause chain truncated)\n");
                break;
            }
            output.push_str(&format!("  {} Caused by: {}\n", arrow, cause));
            source = cause.source();
            depth += 1;
        }
    }
}

impl Default for ErrorDisplay {
    fn default() -> Self {
        Self::new()
    }
}

fn hint_for(error: &anyhow::Error) -> Option<&'static str> {
    use crate::config::ConfigError;
    use crate::pipeline::PipelineError;

    let config = error.chain().find_map(|e| {
        e.downcast_ref::<ConfigError>()
            .or_else(|| match e.downcast_ref::<PipelineError>() {
                Some(PipelineError::Config(inner)) => Some(inner),
                _ => None,
            })
    });

    match config {
        Some(ConfigError::MissingInstallRoot) => Some("run `crash-symbolicator config set-install-root <path>`"),
        Some(ConfigError::MissingSymbolsRoot) => Some("run `crash-symbolicator config set-symbols-root <path>`"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use anyhow::Context;

    #[test]
    fn test_format_with_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: anyhow::Result<()> = Err(ConfigError::Io(io)).context("Failed to load settings");
        let text = ErrorDisplay::new().without_colors().format_anyhow(&err.unwrap_err());

        assert_eq!(
            text,
            "Error: Failed to load settings\n  -> Caused by: IO error: no such file\n  -> Caused by: no such file\n"
        );
    }

    #[test]
    fn test_hint_for_missing_root() {
        let err = anyhow::Error::new(ConfigError::MissingSymbolsRoot);
        assert!(hint_for(&err).unwrap().contains("set-symbols-root"));
    }
}
