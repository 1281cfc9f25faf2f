//! Canvas adapter contract
//!
//! The designer does not depend on a rendering technology. It hands any
//! renderer a frame of positioned nodes and edges after each layout
//! pass, and receives low-level gestures back.

use blueprint_graph::{GraphEdge, GraphNode, LayoutPosition, NodeId};
use serde::{Deserialize, Serialize};

/// A node paired with its computed position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedNode {
    pub node: GraphNode,
    pub position: LayoutPosition,
}

/// One renderable snapshot of the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasFrame {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<GraphEdge>,
}

/// Low-level gestures reported by the canvas adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureEvent {
    /// A drag-to-connect gesture completed between two nodes
    #[serde(rename_all = "camelCase")]
    ConnectAttempt { source: NodeId, target: NodeId },

    /// A node was dragged to a new spot
    #[serde(rename_all = "camelCase")]
    NodeMoved { node: NodeId, x: f64, y: f64 },

    /// A node was selected
    #[serde(rename_all = "camelCase")]
    NodeSelected { node: NodeId },
}
