use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Column index {index} out of range (project has {len} columns)")]
    ColumnIndex { index: usize, len: usize },

    #[error("A project needs at least one column")]
    NoColumns,

    #[error("Project index {index} out of range (board has {len} projects)")]
    ProjectIndex { index: usize, len: usize },

    #[error("Failed to load project from {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::SeError),

    /// The change is applied in memory; only persisting it failed.
    #[error("Change applied but auto-save to {} failed: {source}", path.display())]
    AutoSave {
        path: PathBuf,
        source: Box<LanesError>,
    },

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LanesError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LanesError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LanesError>;
