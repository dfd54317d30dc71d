use std::collections::HashMap;

use serde::Serialize;

/// Trailing window sizes, in documents, in the order they are reported.
pub const MILESTONES: [usize; 4] = [5, 10, 15, 20];
/// Only the most recent documents (by file name) are analysed.
pub const MAX_DOCUMENTS: usize = 30;
/// Number of groups kept per milestone.
pub const TOP_N: usize = 3;
pub const DOCUMENT_EXTENSION: &str = "docx";
pub const DEFAULT_REPORT_TITLE: &str = "PHAN TICH DAO 6 VONG - TP.HCM (GOM NHOM 6 HOAN VI)";

/// Canonical key counts for one milestone window.
///
/// Entries keep the order in which each key was first seen, which is also the tie-break
/// used when ranking.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
    total: u32,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: String) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
        self.total += 1;
    }

    pub fn count(&self, key: &str) -> u32 {
        self.index.get(key).map(|&position| self.entries[position].1).unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    /// Share of `key` in this window as a percentage in `[0, 100]`; 0 for an empty window.
    pub fn percentage(&self, key: &str) -> f64 {
        percentage_of(self.count(key), self.total)
    }
}

pub fn percentage_of(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: u32,
    pub percentage: f64,
}

/// Top-ranked groups of one milestone window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneTop {
    pub milestone: usize,
    pub files_considered: usize,
    pub total_entries: u32,
    pub entries: Vec<RankedEntry>,
}

impl MilestoneTop {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MilestoneCell {
    pub count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: String,
    pub cells: Vec<MilestoneCell>, // One per milestone, in milestone order
}

impl SummaryRow {
    /// Flat field list: key, then count and formatted percentage per milestone.
    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(1 + self.cells.len() * 2);
        fields.push(self.key.clone());
        for cell in &self.cells {
            fields.push(cell.count.to_string());
            fields.push(format_percentage(cell.percentage));
        }
        fields
    }
}

/// Formats a percentage with two decimals, e.g. `33.333` -> `"33.33%"`.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentWarning {
    pub document: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub milestones: Vec<usize>,
    pub documents: Vec<String>,
    pub top_lists: Vec<MilestoneTop>,
    pub summary_rows: Vec<SummaryRow>,
    pub report: String,
    pub warnings: Vec<DocumentWarning>,
}

/// How a run ended, as seen by the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Success(AnalysisResult),
    NoDocumentsFound,
    NoAnalyzableData { report: String, warnings: Vec<DocumentWarning> },
    Failed(String),
}

impl AnalysisOutcome {
    pub fn report(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Success(result) => Some(&result.report),
            AnalysisOutcome::NoAnalyzableData { report, .. } => Some(report),
            AnalysisOutcome::NoDocumentsFound | AnalysisOutcome::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub report_title: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self { report_title: DEFAULT_REPORT_TITLE.to_string() }
    }
}

/// Pipeline state reported to progress listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    Scanning,
    Extracting { current: usize, total: usize, document: String },
    DocumentSkipped { document: String, reason: String },
    Aggregating,
    Ranking,
    Done,
}

impl RunPhase {
    pub fn message(&self) -> String {
        match self {
            RunPhase::Scanning => "Scanning folder...".to_string(),
            RunPhase::Extracting { current, total, document } => {
                format!("Reading {} ({}/{})...", document, current, total)
            }
            RunPhase::DocumentSkipped { document, reason } => {
                format!("Warning: cannot read {}: {}", document, reason)
            }
            RunPhase::Aggregating => "Counting groups per milestone...".to_string(),
            RunPhase::Ranking => "Ranking groups...".to_string(),
            RunPhase::Done => "Analysis complete.".to_string(),
        }
    }
}
