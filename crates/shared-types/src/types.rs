//! Review records shared by the stores, the controller and the plugin bridge

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{lenient_bool, null_as_default, opt_string_or_number};

/// Name recorded when the host cannot identify the current user
pub const UNKNOWN_USER: &str = "Unknown User";

/// Format an instant the way the plugin runtime does (`2024-05-01T10:20:30.123Z`)
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The user performing a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Actor {
    pub fn new(name: impl Into<String>, photo_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            photo_url,
        }
    }

    /// Sentinel actor used when the host has no current user
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_USER.to_string(),
            photo_url: None,
        }
    }

    /// Resolve an optional host identity, falling back to the sentinel
    pub fn or_unknown(actor: Option<Actor>) -> Self {
        actor.unwrap_or_else(Self::unknown)
    }
}

/// Who set a flag and when. All three fields are empty while the flag is clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attribution {
    pub timestamp: Option<String>,
    pub user: Option<String>,
    pub user_photo: Option<String>,
}

impl Attribution {
    /// Attribute to `actor` at `now`
    pub fn stamped(actor: &Actor, now: &str) -> Self {
        Self {
            timestamp: Some(now.to_string()),
            user: Some(actor.name.clone()),
            user_photo: actor.photo_url.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none() && self.user.is_none() && self.user_photo.is_none()
    }
}

/// The fixed set of manual checklist items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKey {
    AppropriateFile,
    Annotations,
    FsgApproval,
    Prototype,
    RadiusComponents,
}

impl ItemKey {
    pub const ALL: [ItemKey; 5] = [
        ItemKey::AppropriateFile,
        ItemKey::Annotations,
        ItemKey::FsgApproval,
        ItemKey::Prototype,
        ItemKey::RadiusComponents,
    ];

    /// Key as it appears in the stored blob and in panel messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKey::AppropriateFile => "appropriateFile",
            ItemKey::Annotations => "annotations",
            ItemKey::FsgApproval => "fsgApproval",
            ItemKey::Prototype => "prototype",
            ItemKey::RadiusComponents => "radiusComponents",
        }
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One manual checklist entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckItem {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub checked: bool,
    #[serde(flatten)]
    pub attribution: Attribution,
}

impl CheckItem {
    /// Legacy entries stored a bare boolean and carry no attribution
    pub fn from_legacy(checked: bool) -> Self {
        Self {
            checked,
            attribution: Attribution::default(),
        }
    }
}

/// The five-item manual checklist of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualChecklist {
    #[serde(default)]
    pub appropriate_file: CheckItem,
    #[serde(default)]
    pub annotations: CheckItem,
    #[serde(default)]
    pub fsg_approval: CheckItem,
    #[serde(default)]
    pub prototype: CheckItem,
    #[serde(default)]
    pub radius_components: CheckItem,
}

impl ManualChecklist {
    pub fn get(&self, key: ItemKey) -> &CheckItem {
        match key {
            ItemKey::AppropriateFile => &self.appropriate_file,
            ItemKey::Annotations => &self.annotations,
            ItemKey::FsgApproval => &self.fsg_approval,
            ItemKey::Prototype => &self.prototype,
            ItemKey::RadiusComponents => &self.radius_components,
        }
    }

    pub fn get_mut(&mut self, key: ItemKey) -> &mut CheckItem {
        match key {
            ItemKey::AppropriateFile => &mut self.appropriate_file,
            ItemKey::Annotations => &mut self.annotations,
            ItemKey::FsgApproval => &mut self.fsg_approval,
            ItemKey::Prototype => &mut self.prototype,
            ItemKey::RadiusComponents => &mut self.radius_components,
        }
    }

    /// Items in their canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ItemKey, &CheckItem)> {
        ItemKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    pub fn checked_count(&self) -> usize {
        self.iter().filter(|(_, item)| item.checked).count()
    }
}

/// Checkbox states sent by the panel on save. Absent or null entries are unchecked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecklistToggles {
    #[serde(deserialize_with = "lenient_bool")]
    pub appropriate_file: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub annotations: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub fsg_approval: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub prototype: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub radius_components: bool,
}

impl ChecklistToggles {
    pub fn get(&self, key: ItemKey) -> bool {
        match key {
            ItemKey::AppropriateFile => self.appropriate_file,
            ItemKey::Annotations => self.annotations,
            ItemKey::FsgApproval => self.fsg_approval,
            ItemKey::Prototype => self.prototype,
            ItemKey::RadiusComponents => self.radius_components,
        }
    }

    pub fn set(&mut self, key: ItemKey, checked: bool) {
        match key {
            ItemKey::AppropriateFile => self.appropriate_file = checked,
            ItemKey::Annotations => self.annotations = checked,
            ItemKey::FsgApproval => self.fsg_approval = checked,
            ItemKey::Prototype => self.prototype = checked,
            ItemKey::RadiusComponents => self.radius_components = checked,
        }
    }

    /// Toggles with only `keys` checked
    pub fn with_checked(keys: &[ItemKey]) -> Self {
        let mut toggles = Self::default();
        for key in keys {
            toggles.set(*key, true);
        }
        toggles
    }
}

/// A threaded review comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    /// Missing on comments written before ids were introduced
    #[serde(
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
    pub user_photo: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
}

impl Comment {
    /// Id used to match deletion requests. Id-less comments get
    /// `comment_<timestamp>_<index>`, derived from their position in the thread.
    pub fn match_id(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("comment_{}_{}", self.timestamp, index),
        }
    }
}

/// The peer-review flag and comment thread of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerReview {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub reviewed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
    #[serde(flatten)]
    pub attribution: Attribution,
}

/// Payload of a save-peer-review request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewToggle {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub reviewed: bool,
}
