//! The shared graph model
//!
//! `DesignGraph` is the single data structure behind both the workflow
//! designer canvas and the dependency inspector. Mutation goes through
//! invariant-checked methods rather than raw collection edits: an edge
//! can never reference a node outside the same instance, and removing a
//! node also removes every edge touching it, so downstream consumers
//! (layout in particular) never observe a dangling endpoint.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::types::{GraphEdge, GraphNode};

/// Typed directed graph of domain nodes and edges
///
/// Nodes and edges are kept in insertion order; that order is the
/// tie-break anchor for the deterministic layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl DesignGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node
    pub fn add_node(&mut self, node: GraphNode) -> Result<(), GraphError> {
        if self.contains_node(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a node and every edge referencing it as source or target
    ///
    /// Returns the cascaded edges so callers can report what was
    /// dropped alongside the node.
    pub fn remove_node(&mut self, id: &str) -> Result<Vec<GraphEdge>, GraphError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        self.nodes.remove(index);

        let mut removed = Vec::new();
        self.edges.retain(|edge| {
            if edge.source == id || edge.target == id {
                removed.push(edge.clone());
                false
            } else {
                true
            }
        });

        debug!("removed node '{}' and {} cascaded edge(s)", id, removed.len());
        Ok(removed)
    }

    /// Add an edge; both endpoints must already be present
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<(), GraphError> {
        if self.edges.iter().any(|e| e.id == edge.id) {
            return Err(GraphError::DuplicateEdge(edge.id));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::DanglingEndpoint {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Remove an edge by ID
    pub fn remove_edge(&mut self, id: &str) -> Result<GraphEdge, GraphError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| GraphError::UnknownEdge(id.to_string()))?;
        Ok(self.edges.remove(index))
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Find a node by ID
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find an edge by ID
    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Check whether a node with this ID exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Edges coming into a node
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Edges going out of a node
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }
}
