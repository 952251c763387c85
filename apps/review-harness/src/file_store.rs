//! Plugin data persisted as a JSON object of key to blob string

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use review_core::{PageStore, StoreError};

use crate::error::HarnessError;

/// File-backed [`PageStore`]. The whole file is rewritten on every `set`.
#[derive(Debug)]
pub struct FilePageStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FilePageStore {
    /// Open the store file. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HarnessError> {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| HarnessError::StoreFile {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No store at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(source) => return Err(HarnessError::Read { path, source }),
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PageStore for FilePageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()?;
        tracing::debug!("Wrote {} to {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FilePageStore::open(dir.path().join("store.json")).unwrap();
        assert_eq!(store.get("peerReview_1:0").unwrap(), None);
        assert_eq!(store.keys().count(), 0);
    }

    #[test]
    fn test_set_persists_across_opens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FilePageStore::open(&path).unwrap();
        store.set("peerReview_1:0", r#"{"reviewed":true}"#).unwrap();

        let reopened = FilePageStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("peerReview_1:0").unwrap().as_deref(),
            Some(r#"{"reviewed":true}"#)
        );
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[not an object").unwrap();

        assert!(matches!(
            FilePageStore::open(&path),
            Err(HarnessError::StoreFile { .. })
        ));
    }
}
