use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThresholdError {
    #[error("Source unavailable at {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Malformed thresholds table: {0}")]
    MalformedTable(String),

    #[error("Cache entry '{key}' is corrupt: {reason}")]
    CacheCorrupt { key: String, reason: String },

    #[error("Workbook read failed: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ThresholdError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ThresholdError::MalformedTable(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ThresholdError>;
