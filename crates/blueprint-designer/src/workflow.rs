//! Workflow domain payloads
//!
//! Mirrors the console's REST payloads for workflows, states, and
//! transitions, plus their hydration into canvas nodes and edges.

use blueprint_graph::{DesignGraph, GraphEdge, GraphError, GraphNode, NodeKind};
use serde::{Deserialize, Serialize};

/// A workflow state as returned by the persistence gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub id: String,
    /// Stable machine code (unique within a workflow)
    pub code: String,
    pub name: String,
    pub is_initial: bool,
    pub is_final: bool,
    pub allow_edit: bool,
    pub allow_delete: bool,
}

impl WorkflowState {
    /// Hydrate into a canvas node
    ///
    /// State flags travel in the node metadata so the renderer can
    /// badge initial/final states without a second lookup. More than
    /// one initial flag is rendered as-is; uniqueness is the backend's
    /// rule to enforce.
    pub fn to_node(&self) -> GraphNode {
        GraphNode::new(&self.id, NodeKind::State, &self.name).with_metadata(serde_json::json!({
            "code": self.code,
            "isInitial": self.is_initial,
            "isFinal": self.is_final,
            "allowEdit": self.allow_edit,
            "allowDelete": self.allow_delete,
        }))
    }
}

/// A committed workflow transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTransition {
    pub id: String,
    pub name: String,
    pub from_state: String,
    pub to_state: String,
    pub requires_approval: bool,
    pub approver_role: String,
    /// Opaque condition payload, evaluated by the backend only
    pub condition_expression: serde_json::Value,
    pub display_order: i32,
}

impl WorkflowTransition {
    /// Hydrate into a canvas edge
    ///
    /// Approval-gated transitions render animated so reviewers spot
    /// them at a glance.
    pub fn to_edge(&self) -> GraphEdge {
        let edge = GraphEdge::new(&self.id, &self.from_state, &self.to_state)
            .with_label(&self.name);
        if self.requires_approval {
            edge.animated()
        } else {
            edge
        }
    }
}

/// A complete workflow document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub states: Vec<WorkflowState>,
    pub transitions: Vec<WorkflowTransition>,
}

impl Workflow {
    /// Build the canvas graph for this document
    ///
    /// A transition naming a state absent from the document is a data
    /// error, not something to drop silently.
    pub fn to_graph(&self) -> Result<DesignGraph, GraphError> {
        let mut graph = DesignGraph::new();
        for state in &self.states {
            graph.add_node(state.to_node())?;
        }
        for transition in &self.transitions {
            graph.add_edge(transition.to_edge())?;
        }
        Ok(graph)
    }
}
