use std::{
    path::Path,
    sync::{
        atomic::{
            AtomicBool,
            Ordering,
        },
        Arc,
    },
    time::Instant,
};

use tracing::{
    debug,
    info,
    warn,
};

use super::{
    DaoError,
    FileEntries,
};
use crate::{
    parser::DocxReader,
    tools::analysis::{
        analyzer::{
            build_frequency_tables,
            build_summary_rows,
            rank_milestones,
            union_keys,
        },
        extractor::TokenExtractor,
        models::{
            AnalysisOptions,
            AnalysisOutcome,
            AnalysisResult,
            DocumentWarning,
            RunPhase,
            MILESTONES,
            TOP_N,
        },
        report::{
            render_no_data_report,
            render_report,
        },
        scanner::find_documents,
    },
};

pub type ProgressCallback = Box<dyn Fn(RunPhase) + Send + Sync>;

fn check_cancelled(cancel_flag: &Option<Arc<AtomicBool>>) -> Result<(), DaoError> {
    match cancel_flag {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(DaoError::Cancelled),
        _ => Ok(()),
    }
}

/// Runs the whole analysis over the documents of `folder`.
///
/// Documents are read one at a time, in file name order. A document that cannot be read is
/// recorded as a warning and contributes no tokens. Cancellation is honoured between
/// documents and surfaces as [`DaoError::Cancelled`]; any other error aborts the run.
pub fn analyze_folder(
    folder: &Path,
    options: &AnalysisOptions,
    progress_callback: Option<ProgressCallback>,
    cancel_flag: Option<Arc<AtomicBool>>,
) -> Result<AnalysisOutcome, DaoError> {
    let start = Instant::now();
    let report_progress = |phase: RunPhase| {
        if let Some(ref callback) = progress_callback {
            callback(phase);
        }
    };

    report_progress(RunPhase::Scanning);
    let documents = find_documents(folder)?;
    if documents.is_empty() {
        info!("No .docx documents found in {}", folder.display());
        return Ok(AnalysisOutcome::NoDocumentsFound);
    }

    let reader = DocxReader::new()?;
    let extractor = TokenExtractor::new()?;
    let total = documents.len();
    let mut files: Vec<FileEntries> = Vec::with_capacity(total);
    let mut warnings: Vec<DocumentWarning> = Vec::new();

    for (idx, document) in documents.iter().enumerate() {
        check_cancelled(&cancel_flag)?;

        report_progress(RunPhase::Extracting {
            current: idx + 1,
            total,
            document: document.title.clone(),
        });

        let tokens = match reader.read(&document.path) {
            Ok(paragraphs) => extractor.extract_tokens(&paragraphs),
            Err(e) => {
                warn!("Cannot read {}: {}", document.title, e);
                report_progress(RunPhase::DocumentSkipped {
                    document: document.title.clone(),
                    reason: e.to_string(),
                });
                warnings.push(DocumentWarning { document: document.title.clone(), reason: e.to_string() });
                Vec::new()
            }
        };

        debug!("{}: {} tokens", document.title, tokens.len());
        files.push(FileEntries { document: document.title.clone(), tokens });
    }

    check_cancelled(&cancel_flag)?;

    report_progress(RunPhase::Aggregating);
    let tables = build_frequency_tables(&files, &MILESTONES);

    report_progress(RunPhase::Ranking);
    let top_lists = rank_milestones(&tables, &MILESTONES, files.len(), TOP_N);
    let keys = union_keys(&top_lists);

    if keys.is_empty() {
        info!("No 3-digit data found in {} documents", total);
        return Ok(AnalysisOutcome::NoAnalyzableData {
            report: render_no_data_report(&options.report_title, &top_lists),
            warnings,
        });
    }

    let summary_rows = build_summary_rows(&keys, &tables);
    let report = render_report(&options.report_title, &MILESTONES, &top_lists, &summary_rows);

    report_progress(RunPhase::Done);
    info!(
        "Analysed {} documents into {} groups ({:.1}s)",
        total,
        summary_rows.len(),
        start.elapsed().as_secs_f32()
    );

    Ok(AnalysisOutcome::Success(AnalysisResult {
        milestones: MILESTONES.to_vec(),
        documents: files.into_iter().map(|f| f.document).collect(),
        top_lists,
        summary_rows,
        report,
        warnings,
    }))
}

impl From<DaoError> for AnalysisOutcome {
    fn from(error: DaoError) -> Self {
        AnalysisOutcome::Failed(error.to_string())
    }
}
