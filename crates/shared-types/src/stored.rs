//! Decoding of persisted page blobs
//!
//! Blobs are read through one normalization step so that older shapes never
//! reach the stores. The checklist has two generations:
//!
//! - legacy: `{"appropriateFile": true, ...}`
//! - current: `{"appropriateFile": {"checked": true, "timestamp": "...", ...}, ...}`
//!
//! Both may appear in the same blob, per item.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::{CheckItem, ItemKey, ManualChecklist, PeerReview};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected shape: {0}")]
    UnexpectedShape(String),
}

/// A checklist entry as found on disk
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCheckItem {
    Current(CheckItem),
    Legacy(bool),
}

impl From<StoredCheckItem> for CheckItem {
    fn from(stored: StoredCheckItem) -> Self {
        match stored {
            StoredCheckItem::Current(item) => item,
            StoredCheckItem::Legacy(checked) => CheckItem::from_legacy(checked),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredChecklist {
    appropriate_file: Option<StoredCheckItem>,
    annotations: Option<StoredCheckItem>,
    fsg_approval: Option<StoredCheckItem>,
    prototype: Option<StoredCheckItem>,
    radius_components: Option<StoredCheckItem>,
}

impl StoredChecklist {
    fn take(&mut self, key: ItemKey) -> Option<StoredCheckItem> {
        match key {
            ItemKey::AppropriateFile => self.appropriate_file.take(),
            ItemKey::Annotations => self.annotations.take(),
            ItemKey::FsgApproval => self.fsg_approval.take(),
            ItemKey::Prototype => self.prototype.take(),
            ItemKey::RadiusComponents => self.radius_components.take(),
        }
    }
}

fn parse_object(raw: &str) -> Result<Value, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(DecodeError::UnexpectedShape(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a stored checklist blob, migrating legacy boolean entries.
/// Missing or null entries are unchecked.
pub fn decode_checklist(raw: &str) -> Result<ManualChecklist, DecodeError> {
    let mut stored: StoredChecklist = serde_json::from_value(parse_object(raw)?)
        .map_err(|e| DecodeError::UnexpectedShape(e.to_string()))?;

    let mut checklist = ManualChecklist::default();
    for key in ItemKey::ALL {
        if let Some(entry) = stored.take(key) {
            *checklist.get_mut(key) = entry.into();
        }
    }
    Ok(checklist)
}

/// Decode a stored peer-review blob. A missing comment list reads as empty.
pub fn decode_peer_review(raw: &str) -> Result<PeerReview, DecodeError> {
    serde_json::from_value(parse_object(raw)?)
        .map_err(|e| DecodeError::UnexpectedShape(e.to_string()))
}
