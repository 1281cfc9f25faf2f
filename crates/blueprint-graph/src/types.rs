//! Core types for designer graphs
//!
//! These types are shared by the workflow designer and the dependency
//! inspector: a typed node/edge pair plus the closed set of entity
//! kinds the console knows about.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for an edge
pub type EdgeId = String;

/// The kind of entity a node represents
///
/// Kind drives styling on the canvas and category membership in the
/// dependency inspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Product attribute definition
    Attribute,
    /// Stock keeping unit
    Sku,
    /// Business rule
    Rule,
    /// Workflow definition
    Workflow,
    /// Search index
    Search,
    /// Workflow state (designer canvas only)
    State,
}

impl NodeKind {
    /// Stable string form, used for styling hooks and category matching
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Attribute => "attribute",
            NodeKind::Sku => "sku",
            NodeKind::Rule => "rule",
            NodeKind::Workflow => "workflow",
            NodeKind::Search => "search",
            NodeKind::State => "state",
        }
    }

    /// Check whether this kind matches an inspector category prefix
    ///
    /// The inspector's category picker sends lowercase prefixes such as
    /// "attr" or "work"; the empty prefix matches every kind.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }
}

/// A node in a designer graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Unique identifier; the node's identity
    pub id: NodeId,
    /// Entity kind
    pub kind: NodeKind,
    /// Human-readable label
    pub label: String,
    /// Opaque per-entity payload carried through to the renderer
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl GraphNode {
    /// Create a node with empty metadata
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            metadata: serde_json::Value::Null,
        }
    }

    /// Attach an opaque metadata payload
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A directed edge between two nodes
///
/// Both endpoints must reference nodes present in the same graph
/// instance; the graph model enforces this on insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
    /// Optional edge label (transition name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the renderer should animate this edge
    #[serde(default)]
    pub animated: bool,
}

impl GraphEdge {
    /// Create an edge with an explicit ID
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
            animated: false,
        }
    }

    /// Create a dependency edge with the derived `<source>-<target>` ID
    pub fn dependency(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{}-{}", source, target),
            source,
            target,
            label: None,
            animated: false,
        }
    }

    /// Set the edge label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark this edge as animated
    pub fn animated(mut self) -> Self {
        self.animated = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_prefix_matching() {
        assert!(NodeKind::Attribute.matches_prefix("attr"));
        assert!(NodeKind::Workflow.matches_prefix("work"));
        assert!(NodeKind::Sku.matches_prefix("sku"));
        assert!(!NodeKind::Rule.matches_prefix("sku"));
        // Empty prefix matches everything
        assert!(NodeKind::Search.matches_prefix(""));
    }

    #[test]
    fn test_dependency_edge_id_derivation() {
        let edge = GraphEdge::dependency("color", "sku-42");
        assert_eq!(edge.id, "color-sku-42");
        assert_eq!(edge.source, "color");
        assert_eq!(edge.target, "sku-42");
        assert!(!edge.animated);
    }

    #[test]
    fn test_node_kind_serde_snake_case() {
        let json = serde_json::to_string(&NodeKind::Search).unwrap();
        assert_eq!(json, "\"search\"");
        let kind: NodeKind = serde_json::from_str("\"attribute\"").unwrap();
        assert_eq!(kind, NodeKind::Attribute);
    }

    #[test]
    fn test_edge_builders() {
        let edge = GraphEdge::new("t-1", "draft", "review")
            .with_label("Submit")
            .animated();
        assert_eq!(edge.label.as_deref(), Some("Submit"));
        assert!(edge.animated);
    }
}
