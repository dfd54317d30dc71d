pub mod errors;
pub mod models;
pub mod pipeline;
pub mod tasks;

pub use errors::DaoError;
pub use models::{ canonical_key, FileEntries, SourceDocument, Token };
