//! Deterministic layered layout
//!
//! A small Sugiyama-style pipeline: break cycles, assign ranks by
//! longest path, order nodes within each rank to reduce crossings, then
//! turn rank and order into coordinates. The whole pass is a pure
//! function of the graph and its node extents: identical topology and
//! input order always produce identical positions, so a re-layout after
//! a single edit never scrambles unrelated nodes.
//!
//! Cycles are legal in workflows (a rejection can flow back to draft);
//! edges that close a cycle only lose their ranking constraint, they
//! are still drawn. Every node receives exactly one position.

mod acyclic;
mod order;
mod position;
mod rank;

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::graph::DesignGraph;
use crate::types::NodeId;

/// Nominal bounding box for a node, supplied by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExtent {
    pub width: f64,
    pub height: f64,
}

/// Spacing and fallback configuration for the layout pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Fallback width for nodes without a measured extent
    pub node_width: f64,
    /// Fallback height for nodes without a measured extent
    pub node_height: f64,
    /// Vertical gap between adjacent ranks
    pub rank_sep: f64,
    /// Horizontal gap between neighbors within a rank
    pub node_sep: f64,
    /// Rank assigned to nodes with no edges
    pub default_rank: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 172.0,
            node_height: 48.0,
            rank_sep: 72.0,
            node_sep: 36.0,
            default_rank: 0,
        }
    }
}

/// Computed position for one node (center coordinates)
///
/// Positions are ephemeral: recomputed on every pass and never part of
/// domain state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPosition {
    pub node: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Compute a position for every node in the graph
///
/// Returns one position per node, in node input order. An empty graph
/// yields an empty result.
pub fn layout(
    graph: &DesignGraph,
    extents: &HashMap<NodeId, NodeExtent>,
    config: &LayoutConfig,
) -> Vec<LayoutPosition> {
    if graph.nodes().is_empty() {
        return Vec::new();
    }

    let edges = acyclic::orient(graph);
    let ranks = rank::assign(graph, &edges, config.default_rank);
    let layers = order::arrange(&edges, &ranks);
    let positions = position::place(graph, &layers, extents, config);

    assert_eq!(
        positions.len(),
        graph.nodes().len(),
        "layout must assign every node exactly one position"
    );
    debug!(
        "layout pass: {} node(s), {} edge(s), {} rank(s)",
        graph.nodes().len(),
        graph.edges().len(),
        layers.len()
    );
    positions
}
