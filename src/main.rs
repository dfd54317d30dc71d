mod cli;

use std::{
    path::{
        Path,
        PathBuf,
    },
    process::ExitCode,
};

use clap::Parser;
use phantichdao::{
    core::tasks::{
        AnalysisUpdate,
        ExportFormat,
        TaskManager,
        TaskResult,
    },
    persistence::{
        load_settings,
        Settings,
    },
    tools::analysis::{
        default_file_name,
        summary_header,
        AnalysisOutcome,
        AnalysisResult,
        RunPhase,
    },
};
use tracing::{
    debug,
    error,
    info,
    warn,
};
use tracing_subscriber::EnvFilter;

use crate::cli::{
    Cli,
    Commands,
};

const EXIT_FAILURE: u8 = 1;
const EXIT_NO_DOCUMENTS: u8 = 2;
const EXIT_NO_DATA: u8 = 3;

fn init_tracing(quiet: bool, configured: Option<&str>) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or("info")))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (settings, settings_error) = match load_settings(cli.config.as_deref()) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    init_tracing(cli.quiet, settings.log_filter.as_deref());
    if let Some(e) = settings_error {
        warn!("Failed to load settings: {}. Using defaults.", e);
    }

    match cli.command {
        Commands::Analyze { folder, json, table, csv, xlsx } => {
            let mut exports = Vec::new();
            if let Some(path) = csv {
                exports.push((ExportFormat::Csv, path));
            }
            if let Some(path) = xlsx {
                exports.push((ExportFormat::Xlsx, path));
            }
            run_analyze(&settings, folder, json, table, exports)
        }
    }
}

fn run_analyze(
    settings: &Settings,
    folder: PathBuf,
    json: bool,
    table: bool,
    exports: Vec<(ExportFormat, PathBuf)>,
) -> ExitCode {
    let mut task_manager = TaskManager::new();
    if let Err(e) = task_manager.analyze_folder(folder.clone(), settings.analysis_options()) {
        error!("{}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    let outcome = loop {
        match task_manager.wait_result() {
            Some(TaskResult::Analysis(AnalysisUpdate::Progress(phase))) => {
                // Skipped documents are already logged as warnings by the pipeline.
                if !matches!(phase, RunPhase::DocumentSkipped { .. }) {
                    info!("{}", phase.message());
                }
            }
            Some(TaskResult::Analysis(AnalysisUpdate::Complete(outcome))) => break outcome,
            Some(TaskResult::Analysis(AnalysisUpdate::Cancelled)) => {
                warn!("Analysis cancelled");
                return ExitCode::from(EXIT_FAILURE);
            }
            Some(other) => debug!("Ignoring {} result", other.task_type()),
            None => {
                error!("Analysis task exited without a result");
                return ExitCode::from(EXIT_FAILURE);
            }
        }
    };

    if json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("Failed to serialize result: {}", e);
                return ExitCode::from(EXIT_FAILURE);
            }
        }
    }

    let code = match &outcome {
        AnalysisOutcome::Success(result) => {
            if !json {
                print_result(result, table);
            }
            ExitCode::SUCCESS
        }
        AnalysisOutcome::NoDocumentsFound => {
            warn!("No .docx files found in {}", folder.display());
            return ExitCode::from(EXIT_NO_DOCUMENTS);
        }
        AnalysisOutcome::NoAnalyzableData { report, .. } => {
            if !json {
                println!("{}", report);
            }
            warn!("No 3-digit data to analyse in {}", folder.display());
            ExitCode::from(EXIT_NO_DATA)
        }
        AnalysisOutcome::Failed(reason) => {
            error!("Analysis failed: {}", reason);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match outcome.report() {
        Some(report) if !exports.is_empty() => {
            if run_exports(&mut task_manager, settings, report, exports) {
                code
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
        _ => code,
    }
}

fn print_result(result: &AnalysisResult, table: bool) {
    if !table {
        println!("{}", result.report);
        return;
    }

    println!("{}", summary_header(&result.milestones).join(","));
    for row in &result.summary_rows {
        println!("{}", row.fields().join(","));
    }
}

fn export_target(settings: &Settings, path: &Path, format: ExportFormat) -> PathBuf {
    let resolved = settings.resolve_export_path(path);
    if resolved.is_dir() {
        resolved.join(default_file_name(format.extension()))
    } else {
        resolved
    }
}

/// Runs every requested export and waits for them. Returns false if any failed.
fn run_exports(
    task_manager: &mut TaskManager,
    settings: &Settings,
    report: &str,
    exports: Vec<(ExportFormat, PathBuf)>,
) -> bool {
    let mut pending = exports.len();
    for (format, path) in exports {
        let target = export_target(settings, &path, format);
        task_manager.export_report(report.to_string(), target, format);
    }

    let mut all_ok = true;
    while pending > 0 {
        match task_manager.wait_result() {
            Some(TaskResult::Export { format, result }) => {
                pending -= 1;
                match result {
                    Ok(path) => info!("Saved {} to {}", format.extension(), path.display()),
                    Err(e) => {
                        error!("Failed to save {}: {}", format.extension(), e);
                        all_ok = false;
                    }
                }
            }
            Some(other) => debug!("Ignoring {} result", other.task_type()),
            None => {
                error!("Export task exited without a result");
                return false;
            }
        }
    }

    all_ok
}
