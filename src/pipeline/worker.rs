// Mon Oct 19 2026 - Alex

use super::aggregator::SymbolicationReport;
use super::error::PipelineError;
use super::runner::{ProgressSink, SymbolicationJob, Symbolicator};
use super::CancelToken;
use crate::toolchain::SymbolLookup;
use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

#[derive(Debug)]
pub enum WorkerEvent {
    Progress { done: usize, total: usize, message: String },
    Finished(Result<SymbolicationReport, PipelineError>),
}

struct ChannelProgress {
    sender: Sender<WorkerEvent>,
}

impl ProgressSink for ChannelProgress {
    fn progress(&self, done: usize, total: usize, message: &str) {
        let _ = self.sender.send(WorkerEvent::Progress {
            done,
            total,
            message: message.to_string(),
        });
    }
}

/// Runs one job on its own thread so the caller stays responsive.
pub struct SymbolicationWorker {
    receiver: Receiver<WorkerEvent>,
    cancel: CancelToken,
    thread_handle: Option<JoinHandle<()>>,
    finished: Cell<bool>,
}

impl SymbolicationWorker {
    pub fn spawn<L>(job: SymbolicationJob, lookup: L) -> Self
    where
        L: SymbolLookup + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let cancel = CancelToken::new();
        let thread_cancel = cancel.clone();

        let handle = thread::spawn(move || {
            let symbolicator = Symbolicator::new(lookup);
            let progress = ChannelProgress { sender: sender.clone() };
            let result = symbolicator.run_with_cancel(&job, &progress, &thread_cancel);
            let _ = sender.send(WorkerEvent::Finished(result));
        });

        Self {
            receiver,
            cancel,
            thread_handle: Some(handle),
            finished: Cell::new(false),
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Next event without blocking. A worker that hangs up without
    /// finishing yields `Finished(Err(WorkerFailed))` once.
    pub fn poll(&self) -> Option<WorkerEvent> {
        if self.finished.get() {
            return None;
        }

        match self.receiver.try_recv() {
            Ok(event) => {
                if matches!(event, WorkerEvent::Finished(_)) {
                    self.finished.set(true);
                }
                Some(event)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished.set(true);
                Some(WorkerEvent::Finished(Err(PipelineError::WorkerFailed)))
            }
        }
    }

    /// Blocks until the run ends, forwarding progress to `on_progress`.
    pub fn wait<F>(mut self, mut on_progress: F) -> Result<SymbolicationReport, PipelineError>
    where
        F: FnMut(usize, usize, &str),
    {
        let mut outcome = Err(PipelineError::WorkerFailed);

        for event in self.receiver.iter() {
            match event {
                WorkerEvent::Progress { done, total, message } => on_progress(done, total, &message),
                WorkerEvent::Finished(result) => {
                    outcome = result;
                    break;
                }
            }
        }

        self.join();
        outcome
    }

    fn join(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("Symbolication worker panicked");
            }
        }
    }
}

impl Drop for SymbolicationWorker {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::{HostPlatform, InvokeError, ToolOutput};
    use std::fs;
    use std::path::Path;
    use std::time::{Duration, Instant};

    struct EchoLookup;

    impl SymbolLookup for EchoLookup {
        fn lookup(&self, _tool: &Path, _symbol_file: &Path, address: &str) -> Result<ToolOutput, InvokeError> {
            Ok(ToolOutput::new(format!("frame_{}", address), ""))
        }
    }

    #[test]
    fn test_worker_reports_progress_and_result() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("addr2line");
        fs::write(&tool, "").unwrap();
        let symbols = dir.path().join("symbols").join("arm64-v8a");
        fs::create_dir_all(&symbols).unwrap();
        fs::write(symbols.join("libil2cpp.so"), "").unwrap();

        let job = SymbolicationJob::new("at libil2cpp.0x1\nat libil2cpp.0x2", dir.path(), dir.path().join("symbols"))
            .with_tool(&tool)
            .with_host(HostPlatform::Linux);

        let worker = SymbolicationWorker::spawn(job, EchoLookup);
        let mut seen = Vec::new();
        let report = worker.wait(|done, total, _| seen.push((done, total))).unwrap();

        assert_eq!(seen, vec![(1, 2), (2, 2)]);
        assert_eq!(report.frame_count(), 2);
    }

    #[test]
    fn test_worker_propagates_errors() {
        let dir = tempfile::tempdir().unwrap();
        let job = SymbolicationJob::new("nothing", dir.path(), dir.path());

        let worker = SymbolicationWorker::spawn(job, EchoLookup);
        let result = worker.wait(|_, _, _| {});

        assert!(matches!(result, Err(PipelineError::NoAddresses)));
    }

    fn poll_until_finished(worker: &SymbolicationWorker) -> Result<SymbolicationReport, PipelineError> {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            match worker.poll() {
                Some(WorkerEvent::Finished(result)) => return result,
                Some(WorkerEvent::Progress { .. }) => {}
                None => thread::sleep(Duration::from_millis(5)),
            }
        }
        panic!("worker did not finish");
    }

    #[test]
    fn test_poll_reports_result_once() {
        let dir = tempfile::tempdir().unwrap();
        let job = SymbolicationJob::new("nothing", dir.path(), dir.path());
        let worker = SymbolicationWorker::spawn(job, EchoLookup);

        assert!(matches!(poll_until_finished(&worker), Err(PipelineError::NoAddresses)));
        thread::sleep(Duration::from_millis(20));
        assert!(worker.poll().is_none());
    }

    #[test]
    fn test_poll_detects_dead_worker() {
        struct PanickingLookup;
        impl SymbolLookup for PanickingLookup {
            fn lookup(&self, _tool: &Path, _symbol_file: &Path, _address: &str) -> Result<ToolOutput, InvokeError> {
                panic!("lookup crashed");
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("addr2line");
        fs::write(&tool, "").unwrap();
        let symbols = dir.path().join("symbols").join("arm64-v8a");
        fs::create_dir_all(&symbols).unwrap();
        fs::write(symbols.join("libil2cpp.so"), "").unwrap();
        let job = SymbolicationJob::new("at libil2cpp.0x1", dir.path(), dir.path().join("symbols"))
            .with_tool(&tool)
            .with_host(HostPlatform::Linux);

        let worker = SymbolicationWorker::spawn(job, PanickingLookup);

        assert!(matches!(poll_until_finished(&worker), Err(PipelineError::WorkerFailed)));
        assert!(worker.poll().is_none());
    }
}
