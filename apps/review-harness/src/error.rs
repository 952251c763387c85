use std::path::PathBuf;
use thiserror::Error;

/// Failures while setting up a harness session
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid page document {path}: {source}")]
    Document {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid store file {path}: {source}")]
    StoreFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
