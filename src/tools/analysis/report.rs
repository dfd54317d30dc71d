use super::models::{
    format_percentage,
    MilestoneTop,
    SummaryRow,
};

pub const NO_ENTRIES_MARKER: &str = "(khong co du lieu)";
pub const NO_DATA_MESSAGE: &str = "Khong co du lieu 3-chu-so de phan tich.";
pub const SUMMARY_TITLE: &str = "BANG TONG HOP SO SANH CAC NHOM (TOP3 cac moc)";
pub const MILESTONE_HEADER: &str = "NhomDao,SoLan,TyLe(%)";

/// Column names of the comparison table: the group, then count and share per milestone.
pub fn summary_header(milestones: &[usize]) -> Vec<String> {
    let mut header = vec!["NhomDao".to_string()];
    for milestone in milestones {
        header.push(format!("{}ky_SoLan", milestone));
        header.push(format!("{}ky_TyLe", milestone));
    }
    header
}

fn milestone_sections(title: &str, top_lists: &[MilestoneTop]) -> Vec<String> {
    let mut lines = vec![title.to_string()];

    for top in top_lists {
        lines.push(String::new());
        lines.push(format!("MOC {} KY", top.milestone));
        lines.push(MILESTONE_HEADER.to_string());

        if top.entries.is_empty() {
            lines.push(NO_ENTRIES_MARKER.to_string());
        }
        for entry in &top.entries {
            lines.push(format!("{},{},{}", entry.key, entry.count, format_percentage(entry.percentage)));
        }
    }

    lines
}

/// Renders the full comma-delimited report: one section per milestone followed by the
/// comparison table of every group that made a top list.
pub fn render_report(
    title: &str,
    milestones: &[usize],
    top_lists: &[MilestoneTop],
    rows: &[SummaryRow],
) -> String {
    let mut lines = milestone_sections(title, top_lists);

    lines.push(String::new());
    lines.push(SUMMARY_TITLE.to_string());
    lines.push(summary_header(milestones).join(","));
    lines.extend(rows.iter().map(|row| row.fields().join(",")));

    lines.join("\n")
}

/// Report used when no milestone produced any group.
pub fn render_no_data_report(title: &str, top_lists: &[MilestoneTop]) -> String {
    let mut lines = milestone_sections(title, top_lists);
    lines.push(String::new());
    lines.push(NO_DATA_MESSAGE.to_string());
    lines.join("\n")
}
