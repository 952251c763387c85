//! Snapshot of the host document tree for the current page

use serde::{Deserialize, Serialize};

/// Host node type, serialized the way the host names it (`FRAME`, `SECTION`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Frame,
    Section,
    Group,
    Component,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    /// Any node type the validators don't care about
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Frame => "FRAME",
            NodeType::Section => "SECTION",
            NodeType::Group => "GROUP",
            NodeType::Component => "COMPONENT",
            NodeType::Instance => "INSTANCE",
            NodeType::Text => "TEXT",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::Other(name) => name,
        }
    }
}

impl From<String> for NodeType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "FRAME" => NodeType::Frame,
            "SECTION" => NodeType::Section,
            "GROUP" => NodeType::Group,
            "COMPONENT" => NodeType::Component,
            "INSTANCE" => NodeType::Instance,
            "TEXT" => NodeType::Text,
            "RECTANGLE" => NodeType::Rectangle,
            "ELLIPSE" => NodeType::Ellipse,
            _ => NodeType::Other(name),
        }
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// A node on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            children: Vec::new(),
        }
    }

    pub fn frame(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeType::Frame)
    }

    pub fn section(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeType::Section)
    }

    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_frame(&self) -> bool {
        self.node_type == NodeType::Frame
    }

    pub fn is_section(&self) -> bool {
        self.node_type == NodeType::Section
    }

    fn find(&self, id: &str) -> Option<&SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// The current page and everything on it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl PageNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    /// Depth-first lookup of a node anywhere on the page
    pub fn find_node(&self, id: &str) -> Option<&SceneNode> {
        self.children.iter().find_map(|child| child.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_round_trip_keeps_unknown_names() {
        let node: SceneNode =
            serde_json::from_str(r#"{"id": "1:2", "name": "Vector 4", "type": "VECTOR"}"#)
                .unwrap();
        assert_eq!(node.node_type, NodeType::Other("VECTOR".to_string()));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "VECTOR");
    }

    #[test]
    fn test_find_node_searches_nested_children() {
        let page = PageNode::new("0:1", "Checkout").with_children(vec![SceneNode::section(
            "1:1", "Flows",
        )
        .with_children(vec![SceneNode::frame("1:2", "Checkout - Payment step")])]);

        assert_eq!(
            page.find_node("1:2").map(|n| n.name.as_str()),
            Some("Checkout - Payment step")
        );
        assert!(page.find_node("9:9").is_none());
    }
}
