//! Coordinate assignment
//!
//! Rank index becomes the vertical axis, in-rank order the horizontal
//! axis. Rows are centered on the widest rank so narrow ranks do not
//! hug the left edge. Coordinates are node centers.

use std::collections::HashMap;

use crate::graph::DesignGraph;
use crate::types::NodeId;

use super::{LayoutConfig, LayoutPosition, NodeExtent};

pub(super) fn place(
    graph: &DesignGraph,
    layers: &[Vec<usize>],
    extents: &HashMap<NodeId, NodeExtent>,
    config: &LayoutConfig,
) -> Vec<LayoutPosition> {
    let nodes = graph.nodes();
    let extent_of = |v: usize| {
        extents.get(&nodes[v].id).copied().unwrap_or(NodeExtent {
            width: config.node_width,
            height: config.node_height,
        })
    };
    let row_width = |layer: &[usize]| -> f64 {
        let widths: f64 = layer.iter().map(|&v| extent_of(v).width).sum();
        widths + config.node_sep * layer.len().saturating_sub(1) as f64
    };

    let canvas_width = layers
        .iter()
        .map(|layer| row_width(layer))
        .fold(0.0, f64::max);

    let mut xs = vec![0.0; nodes.len()];
    let mut ys = vec![0.0; nodes.len()];
    let mut y_cursor = 0.0;
    for layer in layers {
        if layer.is_empty() {
            continue;
        }
        let row_height = layer
            .iter()
            .map(|&v| extent_of(v).height)
            .fold(0.0, f64::max);
        let mut x_cursor = (canvas_width - row_width(layer)) / 2.0;
        for &v in layer {
            let extent = extent_of(v);
            xs[v] = x_cursor + extent.width / 2.0;
            ys[v] = y_cursor + row_height / 2.0;
            x_cursor += extent.width + config.node_sep;
        }
        y_cursor += row_height + config.rank_sep;
    }

    nodes
        .iter()
        .enumerate()
        .map(|(v, node)| LayoutPosition {
            node: node.id.clone(),
            x: xs[v],
            y: ys[v],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GraphNode, NodeKind};

    fn nodes(count: usize) -> DesignGraph {
        let mut graph = DesignGraph::new();
        for i in 0..count {
            graph
                .add_node(GraphNode::new(format!("n{}", i), NodeKind::State, "n"))
                .unwrap();
        }
        graph
    }

    #[test]
    fn test_rows_are_centered_on_the_widest_rank() {
        let graph = nodes(3);
        let config = LayoutConfig::default();
        // Rank 0 holds two nodes, rank 1 holds one
        let layers = vec![vec![0, 1], vec![2]];
        let positions = place(&graph, &layers, &HashMap::new(), &config);

        let row_center = (positions[0].x + positions[1].x) / 2.0;
        assert!((positions[2].x - row_center).abs() < 1e-9);
    }

    #[test]
    fn test_rank_rows_are_spaced_by_rank_sep() {
        let graph = nodes(2);
        let config = LayoutConfig::default();
        let layers = vec![vec![0], vec![1]];
        let positions = place(&graph, &layers, &HashMap::new(), &config);

        let gap = positions[1].y - positions[0].y;
        assert!((gap - (config.node_height + config.rank_sep)).abs() < 1e-9);
    }

    #[test]
    fn test_no_bounding_box_overlap_within_a_rank() {
        let graph = nodes(3);
        let config = LayoutConfig::default();
        let layers = vec![vec![0, 1, 2]];
        let positions = place(&graph, &layers, &HashMap::new(), &config);

        for pair in positions.windows(2) {
            let gap = (pair[1].x - pair[0].x).abs();
            assert!(gap >= config.node_width + config.node_sep);
        }
    }

    #[test]
    fn test_tall_node_stretches_its_row() {
        let graph = nodes(3);
        let config = LayoutConfig::default();
        let mut extents = HashMap::new();
        extents.insert(
            "n0".to_string(),
            NodeExtent {
                width: 172.0,
                height: 200.0,
            },
        );
        let layers = vec![vec![0, 1], vec![2]];
        let positions = place(&graph, &layers, &extents, &config);

        // Row 0 is 200 tall; row 1 starts below it
        assert!((positions[2].y - (200.0 + config.rank_sep + config.node_height / 2.0)).abs() < 1e-9);
        // Short sibling is centered in the tall row
        assert!((positions[1].y - 100.0).abs() < 1e-9);
    }
}
