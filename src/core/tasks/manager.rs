use std::{
    path::PathBuf,
    sync::{
        atomic::{
            AtomicBool,
            Ordering,
        },
        mpsc,
        Arc,
    },
    thread::{
        self,
        JoinHandle,
    },
    time::Duration,
};

use tracing::debug;

use super::{
    AnalysisUpdate,
    ExportFormat,
    TaskResult,
};
use crate::{
    core::{
        pipeline::{
            analyze_folder,
            ProgressCallback,
        },
        DaoError,
    },
    tools::analysis::{
        export::{
            export_csv,
            export_xlsx,
        },
        AnalysisOptions,
        AnalysisOutcome,
    },
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The running folder analysis: its cancel flag and worker thread.
struct AnalysisTask {
    cancel_token: Arc<AtomicBool>,
    join_handle: Option<JoinHandle<()>>,
}

impl AnalysisTask {
    fn is_finished(&self) -> bool {
        self.join_handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }
}

/// Runs analysis and export work on background threads and collects their results on a
/// channel. Only one folder analysis may be in flight at a time.
pub struct TaskManager {
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    analysis: Option<AnalysisTask>,
    exports: Vec<JoinHandle<()>>,
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskManager {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();

        Self { receiver, sender, analysis: None, exports: Vec::new() }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    /// Blocks until the next result arrives. Returns `None` once every worker has exited
    /// and nothing is left to read.
    pub fn wait_result(&mut self) -> Option<TaskResult> {
        loop {
            match self.receiver.recv_timeout(POLL_INTERVAL) {
                Ok(result) => return Some(result),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if !self.has_pending() {
                        return self.receiver.try_recv().ok();
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.analysis.as_ref().map(|task| !task.is_finished()).unwrap_or(false)
    }

    fn has_pending(&mut self) -> bool {
        self.exports.retain(|h| !h.is_finished());
        self.is_busy() || !self.exports.is_empty()
    }

    /// Asks the running analysis to stop before its next document.
    pub fn cancel_analysis(&self) {
        if let Some(task) = &self.analysis {
            task.cancel_token.store(true, Ordering::Relaxed);
        }
    }

    pub fn analyze_folder(&mut self, folder: PathBuf, options: AnalysisOptions) -> Result<(), DaoError> {
        if self.is_busy() {
            return Err(DaoError::TaskBusy);
        }

        let sender = self.sender.clone();
        let cancel_token = Arc::new(AtomicBool::new(false));
        let worker_cancel = cancel_token.clone();

        let join_handle = thread::spawn(move || {
            let progress_sender = sender.clone();
            let progress_callback: ProgressCallback = Box::new(move |phase| {
                let _ = progress_sender.send(TaskResult::Analysis(AnalysisUpdate::Progress(phase)));
            });

            let update = match analyze_folder(&folder, &options, Some(progress_callback), Some(worker_cancel)) {
                Ok(outcome) => AnalysisUpdate::Complete(outcome),
                Err(DaoError::Cancelled) => AnalysisUpdate::Cancelled,
                Err(e) => AnalysisUpdate::Complete(AnalysisOutcome::from(e)),
            };

            let _ = sender.send(TaskResult::Analysis(update));
        });

        debug!("Started folder analysis task");
        self.analysis = Some(AnalysisTask { cancel_token, join_handle: Some(join_handle) });
        Ok(())
    }

    pub fn export_report(&mut self, report: String, output_path: PathBuf, format: ExportFormat) {
        let sender = self.sender.clone();

        let join_handle = thread::spawn(move || {
            let result = match format {
                ExportFormat::Csv => export_csv(&report, &output_path),
                ExportFormat::Xlsx => export_xlsx(&report, &output_path),
            };

            let _ = sender.send(TaskResult::Export {
                format,
                result: result.map(|_| output_path).map_err(|e| e.to_string()),
            });
        });

        self.exports.push(join_handle);
    }

    /// Waits for the running analysis worker, if any, to exit.
    pub fn join_analysis(&mut self) {
        if let Some(handle) = self.analysis.as_mut().and_then(|task| task.join_handle.take()) {
            let _ = handle.join();
        }
    }
}
