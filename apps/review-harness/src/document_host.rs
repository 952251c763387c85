//! Design host backed by a page snapshot loaded from disk

use std::path::Path;

use chrono::{DateTime, Utc};
use review_core::{DesignHost, HostError, PageInfo};
use shared_types::{Actor, PageNode};

use crate::error::HarnessError;

/// Serves a fixed page tree. Selection and close requests are recorded
/// so they can be inspected afterwards.
#[derive(Debug, Clone)]
pub struct SnapshotHost {
    page: PageNode,
    user: Option<Actor>,
    selection: Option<String>,
    closed: bool,
}

impl SnapshotHost {
    pub fn new(page: PageNode, user: Option<Actor>) -> Self {
        Self {
            page,
            user,
            selection: None,
            closed: false,
        }
    }

    /// Load a page snapshot written as JSON
    pub fn load(path: &Path, user: Option<Actor>) -> Result<Self, HarnessError> {
        let raw = std::fs::read_to_string(path).map_err(|source| HarnessError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let page: PageNode =
            serde_json::from_str(&raw).map_err(|source| HarnessError::Document {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            "Loaded page {} ({}) with {} top-level nodes",
            page.name,
            page.id,
            page.children.len()
        );
        Ok(Self::new(page, user))
    }

    /// Id of the most recently selected node
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl DesignHost for SnapshotHost {
    fn current_page(&self) -> PageInfo {
        PageInfo {
            id: self.page.id.clone(),
            name: self.page.name.clone(),
        }
    }

    fn current_user(&self) -> Option<Actor> {
        self.user.clone()
    }

    fn page_tree(&self) -> PageNode {
        self.page.clone()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn select_node(&mut self, node_id: &str) -> Result<(), HostError> {
        let node = self
            .page
            .find_node(node_id)
            .ok_or_else(|| HostError::NodeNotFound(node_id.to_string()))?;
        tracing::info!("Selected {} ({})", node.name, node.id);
        self.selection = Some(node_id.to_string());
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
