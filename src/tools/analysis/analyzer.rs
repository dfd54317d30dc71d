use std::ops::Range;

use super::models::{
    FrequencyTable,
    MilestoneCell,
    MilestoneTop,
    RankedEntry,
    SummaryRow,
};
use crate::core::FileEntries;

/// Indices of the documents covered by a milestone: the last `min(milestone, total_files)`
/// documents. Windows of a smaller milestone are always a suffix of a larger one.
pub fn milestone_window(milestone: usize, total_files: usize) -> Range<usize> {
    let files_to_consider = milestone.min(total_files);
    (total_files - files_to_consider)..total_files
}

/// Counts canonical keys of every token inside one milestone window.
pub fn count_window(files: &[FileEntries], milestone: usize) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for file in &files[milestone_window(milestone, files.len())] {
        for token in &file.tokens {
            table.increment(token.canonical_key());
        }
    }
    table
}

/// One frequency table per milestone, in milestone order.
pub fn build_frequency_tables(files: &[FileEntries], milestones: &[usize]) -> Vec<FrequencyTable> {
    milestones.iter().map(|&milestone| count_window(files, milestone)).collect()
}

/// Highest counts first. The sort is stable, so equal counts keep the table's first-seen
/// order.
pub fn rank_entries(table: &FrequencyTable, limit: usize) -> Vec<RankedEntry> {
    let mut sorted: Vec<&(String, u32)> = table.entries().iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    sorted
        .into_iter()
        .take(limit)
        .map(|(key, count)| RankedEntry {
            key: key.clone(),
            count: *count,
            percentage: table.percentage(key),
        })
        .collect()
}

pub fn rank_milestones(
    tables: &[FrequencyTable],
    milestones: &[usize],
    total_files: usize,
    limit: usize,
) -> Vec<MilestoneTop> {
    milestones
        .iter()
        .zip(tables)
        .map(|(&milestone, table)| MilestoneTop {
            milestone,
            files_considered: milestone.min(total_files),
            total_entries: table.total(),
            entries: rank_entries(table, limit),
        })
        .collect()
}

/// Distinct keys of all top lists, in milestone order then rank order.
pub fn union_keys(top_lists: &[MilestoneTop]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in top_lists.iter().flat_map(|top| top.keys()) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

pub fn build_summary_rows(keys: &[String], tables: &[FrequencyTable]) -> Vec<SummaryRow> {
    keys.iter()
        .map(|key| SummaryRow {
            key: key.clone(),
            cells: tables
                .iter()
                .map(|table| MilestoneCell {
                    count: table.count(key),
                    percentage: table.percentage(key),
                })
                .collect(),
        })
        .collect()
}
