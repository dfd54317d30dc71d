use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("Zip error: {0}")]
    Zip(Box<zip::result::ZipError>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Missing document part '{0}'")]
    MissingDocumentPart(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("An analysis is already running")]
    TaskBusy,

    #[error("Analysis cancelled by user")]
    Cancelled,

    #[error("DaoError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for DaoError {
    fn from(error: std::io::Error) -> Self {
        DaoError::Io(Box::new(error))
    }
}

impl From<zip::result::ZipError> for DaoError {
    fn from(error: zip::result::ZipError) -> Self {
        DaoError::Zip(Box::new(error))
    }
}
