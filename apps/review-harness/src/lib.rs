//! Local harness for the review plugin
//!
//! Runs a review session against a page snapshot on disk and a JSON file
//! standing in for the host's page-scoped plugin data. Panel messages are
//! exchanged as JSON lines on stdin/stdout.

pub mod config;
pub mod document_host;
pub mod error;
pub mod file_store;
pub mod transport;

pub use config::Args;
pub use document_host::SnapshotHost;
pub use error::HarnessError;
pub use file_store::FilePageStore;
