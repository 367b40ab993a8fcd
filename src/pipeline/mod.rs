// Mon Oct 19 2026 - Alex

pub mod aggregator;
pub mod error;
pub mod runner;
pub mod worker;

pub use aggregator::{OutputEntry, ResolvedFrame, ResultAggregator, SymbolicationReport};
pub use error::PipelineError;
pub use runner::{NoProgress, ProgressSink, SymbolicationJob, Symbolicator};
pub use worker::{SymbolicationWorker, WorkerEvent};

use parking_lot::RwLock;
use std::sync::Arc;

/// Shared stop flag, checked between address records.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<RwLock<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        *self.cancelled.write() = true;
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.read()
    }
}
