//! Collection of the top-level frames of a page
//!
//! A frame is top-level when it is a direct child of the page. Frames nested
//! in sections, other frames or groups are never visited.

use shared_types::{PageNode, SceneNode};

/// A top-level frame and whether a section encloses it
#[derive(Debug, Clone, Copy)]
pub struct TopLevelFrame<'a> {
    pub node: &'a SceneNode,
    pub in_section: bool,
}

impl<'a> TopLevelFrame<'a> {
    pub fn id(&self) -> &'a str {
        &self.node.id
    }

    pub fn name(&self) -> &'a str {
        &self.node.name
    }
}

/// Top-level frames in document order
pub fn top_level_frames(page: &PageNode) -> Vec<TopLevelFrame<'_>> {
    page.children
        .iter()
        .filter(|node| node.is_frame())
        .map(|node| TopLevelFrame {
            node,
            in_section: has_section_ancestor(page, &node.id),
        })
        .collect()
}

/// True when some node between the page and `node_id` is a section
pub fn has_section_ancestor(page: &PageNode, node_id: &str) -> bool {
    fn walk(nodes: &[SceneNode], node_id: &str, in_section: bool) -> Option<bool> {
        nodes.iter().find_map(|node| {
            if node.id == node_id {
                Some(in_section)
            } else {
                walk(&node.children, node_id, in_section || node.is_section())
            }
        })
    }

    walk(&page.children, node_id, false).unwrap_or(false)
}

/// Overview boards need both words in their name
pub fn is_overview_board(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("overview") && lower.contains("board")
}
