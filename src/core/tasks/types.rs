use std::path::PathBuf;

use crate::tools::analysis::{
    AnalysisOutcome,
    RunPhase,
};

#[derive(Debug, Clone)]
pub enum AnalysisUpdate {
    Progress(RunPhase),
    Complete(AnalysisOutcome),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    Analysis(AnalysisUpdate),
    Export { format: ExportFormat, result: Result<PathBuf, String> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Analysis(update) => match update {
                AnalysisUpdate::Progress(_) => "analysis_progress",
                AnalysisUpdate::Complete(_) => "analysis",
                AnalysisUpdate::Cancelled => "analysis_cancelled",
            },
            TaskResult::Export { .. } => "export",
        }
    }

    /// True for the message that ends a task.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskResult::Analysis(AnalysisUpdate::Progress(_)))
    }
}
