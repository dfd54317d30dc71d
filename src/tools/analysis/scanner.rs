use std::path::Path;

use tracing::debug;

use super::models::{
    DOCUMENT_EXTENSION,
    MAX_DOCUMENTS,
};
use crate::core::{
    DaoError,
    SourceDocument,
};

/// Lists the `.docx` files directly inside `dir`, sorted case-insensitively by name and
/// capped to the last [`MAX_DOCUMENTS`] entries.
pub fn find_documents(dir: &Path) -> Result<Vec<SourceDocument>, DaoError> {
    if !dir.is_dir() {
        return Err(DaoError::FolderNotFound(dir.display().to_string()));
    }

    let mut names: Vec<(String, std::path::PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };

        if has_document_extension(&name) {
            names.push((name, path));
        }
    }

    names.sort_by_cached_key(|(name, _)| name.to_lowercase());

    let skip = names.len().saturating_sub(MAX_DOCUMENTS);
    debug!("Found {} documents, keeping {}", names.len(), names.len() - skip);

    Ok(names
        .into_iter()
        .skip(skip)
        .map(|(title, path)| SourceDocument { title, path })
        .collect())
}

fn has_document_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(&format!(".{}", DOCUMENT_EXTENSION))
}
