// Mon Oct 19 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, Command, ConfigCommand, MetadataArgs, OpenArgs, SymbolicateArgs};
pub use handler::CommandHandler;
