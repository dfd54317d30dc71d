pub mod analyzer;
pub mod export;
pub mod extractor;
pub mod models;
pub mod report;
pub mod scanner;

pub use analyzer::{
    build_frequency_tables,
    build_summary_rows,
    milestone_window,
    rank_milestones,
    union_keys,
};
pub use export::{
    default_file_name,
    export_csv,
    export_xlsx,
};
pub use extractor::TokenExtractor;
pub use models::{
    AnalysisOptions,
    AnalysisOutcome,
    AnalysisResult,
    DocumentWarning,
    FrequencyTable,
    MilestoneTop,
    RunPhase,
    SummaryRow,
    MAX_DOCUMENTS,
    MILESTONES,
    TOP_N,
};
pub use report::{
    render_no_data_report,
    render_report,
    summary_header,
};
pub use scanner::find_documents;
