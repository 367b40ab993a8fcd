// Mon Oct 19 2026 - Alex

pub mod cli;
pub mod errors;
pub mod progress;

pub use cli::{Args, Command, CommandHandler};
pub use errors::ErrorDisplay;
pub use progress::{ProgressManager, RecordProgress};

use colored::Colorize;

pub fn print_info(message: &str) {
    eprintln!("{} {}", "[INFO]".cyan(), message);
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "[OK]".green(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "[WARN]".yellow(), message);
}
