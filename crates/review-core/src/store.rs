//! Page-scoped key/value persistence
//!
//! The host keeps one string blob per key on each page. Stores in this crate
//! never hold state of their own: every operation reads the blob, works on
//! the decoded record and writes it back.

use std::collections::BTreeMap;

use crate::error::StoreError;

/// Key of the manual checklist blob for a page
pub fn checklist_key(page_id: &str) -> String {
    format!("peerReviewChecks_{}", page_id)
}

/// Key of the peer-review blob for a page
pub fn peer_review_key(page_id: &str) -> String {
    format!("peerReview_{}", page_id)
}

/// Host key/value store
pub trait PageStore {
    /// `None` when nothing was ever written under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, used in tests and as a scratch backend
#[derive(Debug, Clone, Default)]
pub struct MemoryPageStore {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw blob, bypassing the write counter
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PageStore for MemoryPageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Outcome of reading a record. Malformed data is not an error: it degrades
/// to the empty record and carries the reason for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    /// Nothing stored yet
    Empty(T),
    Stored(T),
    Degraded { value: T, reason: String },
}

impl<T> Loaded<T> {
    pub fn value(&self) -> &T {
        match self {
            Loaded::Empty(value) | Loaded::Stored(value) => value,
            Loaded::Degraded { value, .. } => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Loaded::Empty(value) | Loaded::Stored(value) => value,
            Loaded::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Loaded::Degraded { .. })
    }

    /// True only when a readable record exists
    pub fn is_stored(&self) -> bool {
        matches!(self, Loaded::Stored(_))
    }
}

/// Read and decode a blob, falling back to `T::default()` when absent or malformed
pub(crate) fn load_record<S, T, E>(
    store: &S,
    key: &str,
    decode: impl FnOnce(&str) -> Result<T, E>,
) -> Loaded<T>
where
    S: PageStore + ?Sized,
    T: Default,
    E: std::fmt::Display,
{
    read_record(store, key, decode).unwrap_or_else(|e| {
        tracing::warn!("Failed to read {}: {}", key, e);
        Loaded::Degraded {
            value: T::default(),
            reason: e.to_string(),
        }
    })
}

/// Like [`load_record`], but a failed read is returned as an error. Used
/// before a rewrite, which must not replace data that could not be read.
pub(crate) fn read_record<S, T, E>(
    store: &S,
    key: &str,
    decode: impl FnOnce(&str) -> Result<T, E>,
) -> Result<Loaded<T>, StoreError>
where
    S: PageStore + ?Sized,
    T: Default,
    E: std::fmt::Display,
{
    let Some(raw) = store.get(key)? else {
        return Ok(Loaded::Empty(T::default()));
    };

    Ok(match decode(&raw) {
        Ok(value) => Loaded::Stored(value),
        Err(e) => {
            tracing::warn!("Discarding malformed data under {}: {}", key, e);
            Loaded::Degraded {
                value: T::default(),
                reason: e.to_string(),
            }
        }
    })
}

/// Encode a record and write it as one blob
pub(crate) fn write_record<S, T>(store: &mut S, key: &str, record: &T) -> Result<(), StoreError>
where
    S: PageStore + ?Sized,
    T: serde::Serialize,
{
    let blob = serde_json::to_string(record)?;
    store.set(key, &blob)
}

/// Memory store whose reads can be made to fail
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    pub inner: MemoryPageStore,
    pub fail_reads: bool,
}

#[cfg(test)]
impl PageStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Backend("read timed out".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_page_scoped() {
        assert_eq!(checklist_key("12:0"), "peerReviewChecks_12:0");
        assert_eq!(peer_review_key("12:0"), "peerReview_12:0");
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryPageStore::new().with_entry("a", "1");
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.set("b", "2").unwrap();
        assert_eq!(store.writes(), 1);
        assert_eq!(store.raw("b"), Some("2"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    struct BrokenStore;

    impl PageStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Backend("disk on fire".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_read_failure_degrades_to_default() {
        let loaded: Loaded<Vec<u8>> =
            load_record(&BrokenStore, "k", |_| Ok::<_, String>(vec![1]));
        assert!(loaded.is_degraded());
        assert!(loaded.into_inner().is_empty());
    }

    #[test]
    fn test_decode_failure_degrades_to_default() {
        let store = MemoryPageStore::new().with_entry("k", "garbage");
        let loaded: Loaded<Vec<u8>> = load_record(&store, "k", |_| Err("bad"));
        match loaded {
            Loaded::Degraded { value, reason } => {
                assert!(value.is_empty());
                assert_eq!(reason, "bad");
            }
            other => panic!("expected degraded, got {:?}", other),
        }
    }

    #[test]
    fn test_read_record_reports_read_failure() {
        let result: Result<Loaded<Vec<u8>>, _> =
            read_record(&BrokenStore, "k", |_| Ok::<_, String>(vec![1]));
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[test]
    fn test_read_record_distinguishes_empty_and_stored() {
        let store = MemoryPageStore::new().with_entry("k", "x");
        let stored = read_record(&store, "k", |raw| Ok::<_, String>(raw.to_string())).unwrap();
        assert_eq!(stored, Loaded::Stored("x".to_string()));
        let empty = read_record(&store, "other", |raw| Ok::<_, String>(raw.to_string())).unwrap();
        assert_eq!(empty, Loaded::Empty(String::new()));
    }
}
