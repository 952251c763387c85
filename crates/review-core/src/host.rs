//! What the controller needs from the design tool

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Actor, PageNode};

use crate::error::HostError;

/// Identity of the page the user is looking at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Host services, queried afresh on every request so that page switches and
/// identity changes take effect immediately
pub trait DesignHost {
    fn current_page(&self) -> PageInfo;

    /// `None` when the host cannot identify the user
    fn current_user(&self) -> Option<Actor>;

    /// Snapshot of the current page tree
    fn page_tree(&self) -> PageNode;

    fn now(&self) -> DateTime<Utc>;

    /// Select a node and bring it into view
    fn select_node(&mut self, node_id: &str) -> Result<(), HostError>;

    /// Tear down the plugin
    fn close(&mut self);
}
