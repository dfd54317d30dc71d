pub mod core;
pub mod parser;
pub mod persistence;
pub mod tools;

pub use crate::core::{
    pipeline::analyze_folder,
    DaoError,
};
pub use tools::analysis::{
    AnalysisOptions,
    AnalysisOutcome,
    AnalysisResult,
};
