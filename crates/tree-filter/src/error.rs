use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown toggle: {0}")]
    UnknownToggle(String),

    #[error("Hierarchy provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
