// Mon Oct 19 2026 - Alex

use crate::pipeline::ProgressSink;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Bar for address records; the length is set once the run reports it.
    pub fn create_record_progress(&self, message: &str) -> RecordProgress {
        if !self.enabled {
            return RecordProgress { bar: ProgressBar::hidden() };
        }

        let bar = ProgressBar::new(0);
        bar.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("█▓▒░ "));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        RecordProgress { bar }
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RecordProgress {
    bar: ProgressBar,
}

impl RecordProgress {
    pub fn update(&self, done: usize, total: usize, address: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
        self.bar.set_message(format!("Processing {}", address));
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressSink for RecordProgress {
    fn progress(&self, done: usize, total: usize, message: &str) {
        self.update(done, total, message);
    }
}
