use thiserror::Error;

/// A page store read or write failed
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Refusing to overwrite unreadable data under {key}: {reason}")]
    Unreadable { key: String, reason: String },
}

/// The host could not complete a request
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HostError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Host unavailable: {0}")]
    Unavailable(String),
}

/// A permission check could not be evaluated. The guard treats this as a denial.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PermissionError {
    #[error("No owner recorded for this action")]
    MissingOwner,

    #[error("Identity comparison failed: {0}")]
    Strategy(String),
}
