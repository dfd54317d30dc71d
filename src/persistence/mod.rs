use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use crate::{
    core::DaoError,
    tools::analysis::{
        models::DEFAULT_REPORT_TITLE,
        AnalysisOptions,
    },
};

const APP_NAME: &str = "phantichdao";
const SETTINGS_FILE: &str = "settings.json";

/// User settings. Read at start-up only; nothing is written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub report_title: String,
    pub default_export_dir: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { report_title: DEFAULT_REPORT_TITLE.to_string(), default_export_dir: None, log_filter: None }
    }
}

impl Settings {
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions { report_title: self.report_title.clone() }
    }

    /// Resolves a relative export path against `default_export_dir`, when one is set.
    pub fn resolve_export_path(&self, path: &Path) -> PathBuf {
        match &self.default_export_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

pub fn get_app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

pub fn default_settings_path() -> Option<PathBuf> {
    get_app_config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> Result<T, DaoError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

/// Loads settings from `path`, or from the per-user config directory when no path is given.
/// A missing file yields the defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, DaoError> {
    match path.map(Path::to_path_buf).or_else(default_settings_path) {
        Some(file_path) => load_json(&file_path),
        None => Ok(Settings::default()),
    }
}
