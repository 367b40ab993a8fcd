// Mon Oct 19 2026 - Alex

use clap::Parser;
use crash_symbolicator::ui::{Args, CommandHandler, ErrorDisplay};
use std::process;

fn main() {
    let args = Args::parse();
    let no_color = args.no_color;

    if let Err(e) = CommandHandler::new().execute(args) {
        let display = if no_color {
            ErrorDisplay::new().without_colors()
        } else {
            ErrorDisplay::new()
        };
        display.print_anyhow(&e);
        process::exit(1);
    }
}
