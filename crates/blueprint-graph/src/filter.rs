//! Subgraph derivation for the dependency inspector
//!
//! Both functions return a new graph; the source graph is never
//! mutated. Edges survive only when both endpoints survive (the
//! induced-subgraph rule), which keeps the layout invariant intact on
//! reduced graphs.

use std::collections::HashSet;

use crate::graph::DesignGraph;
use crate::types::GraphNode;

/// Induced subgraph: exactly the nodes satisfying `predicate`
pub fn induced<P>(graph: &DesignGraph, predicate: P) -> DesignGraph
where
    P: Fn(&GraphNode) -> bool,
{
    let keep: HashSet<&str> = graph
        .nodes()
        .iter()
        .filter(|n| predicate(n))
        .map(|n| n.id.as_str())
        .collect();
    copy_subgraph(graph, &keep)
}

/// Matching nodes plus their dependency neighbors
///
/// This is the inspector's reduction: the operator picks a category,
/// and every node sharing an edge with a matching node is pulled in so
/// the dependency context stays readable.
pub fn focus<P>(graph: &DesignGraph, predicate: P) -> DesignGraph
where
    P: Fn(&GraphNode) -> bool,
{
    let matched: HashSet<&str> = graph
        .nodes()
        .iter()
        .filter(|n| predicate(n))
        .map(|n| n.id.as_str())
        .collect();

    let mut keep = matched.clone();
    for edge in graph.edges() {
        if matched.contains(edge.source.as_str()) {
            keep.insert(edge.target.as_str());
        }
        if matched.contains(edge.target.as_str()) {
            keep.insert(edge.source.as_str());
        }
    }
    copy_subgraph(graph, &keep)
}

/// Copy the kept nodes and exactly the edges with both endpoints kept
fn copy_subgraph(graph: &DesignGraph, keep: &HashSet<&str>) -> DesignGraph {
    let mut out = DesignGraph::new();
    for node in graph.nodes() {
        if keep.contains(node.id.as_str()) {
            out.add_node(node.clone())
                .expect("source graph node ids are unique");
        }
    }
    for edge in graph.edges() {
        if keep.contains(edge.source.as_str()) && keep.contains(edge.target.as_str()) {
            out.add_edge(edge.clone())
                .expect("both endpoints were copied before the edges");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GraphEdge, NodeKind};

    fn dependency_graph() -> DesignGraph {
        let mut graph = DesignGraph::new();
        graph
            .add_node(GraphNode::new("color", NodeKind::Attribute, "Color"))
            .unwrap();
        graph
            .add_node(GraphNode::new("size", NodeKind::Attribute, "Size"))
            .unwrap();
        graph
            .add_node(GraphNode::new("sku-1", NodeKind::Sku, "SKU 1"))
            .unwrap();
        graph
            .add_node(GraphNode::new("rule-1", NodeKind::Rule, "Pricing"))
            .unwrap();
        graph
            .add_edge(GraphEdge::dependency("color", "sku-1"))
            .unwrap();
        graph
            .add_edge(GraphEdge::dependency("size", "sku-1"))
            .unwrap();
        graph
            .add_edge(GraphEdge::dependency("sku-1", "rule-1"))
            .unwrap();
        graph
    }

    #[test]
    fn test_induced_keeps_only_matching_nodes() {
        let graph = dependency_graph();
        let reduced = induced(&graph, |n| n.kind == NodeKind::Attribute);

        let ids: Vec<_> = reduced.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["color", "size"]);
        // Every edge lost an endpoint, so none survive
        assert!(reduced.edges().is_empty());
    }

    #[test]
    fn test_induced_subgraph_law() {
        let graph = dependency_graph();
        let reduced = induced(&graph, |n| n.kind != NodeKind::Rule);

        for edge in reduced.edges() {
            assert!(reduced.contains_node(&edge.source));
            assert!(reduced.contains_node(&edge.target));
        }
        // sku-1 -> rule-1 lost its target and must be gone
        assert!(reduced.edge("sku-1-rule-1").is_none());
        assert_eq!(reduced.edges().len(), 2);
    }

    #[test]
    fn test_focus_pulls_in_dependency_neighbors() {
        // {color(attribute)->sku-1, size(attribute)->sku-1}: focusing on
        // sku keeps both attributes and both edges.
        let mut graph = DesignGraph::new();
        graph
            .add_node(GraphNode::new("color", NodeKind::Attribute, "Color"))
            .unwrap();
        graph
            .add_node(GraphNode::new("size", NodeKind::Attribute, "Size"))
            .unwrap();
        graph
            .add_node(GraphNode::new("sku-1", NodeKind::Sku, "SKU 1"))
            .unwrap();
        graph
            .add_edge(GraphEdge::dependency("color", "sku-1"))
            .unwrap();
        graph
            .add_edge(GraphEdge::dependency("size", "sku-1"))
            .unwrap();

        let reduced = focus(&graph, |n| n.kind == NodeKind::Sku);
        let ids: Vec<_> = reduced.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["color", "size", "sku-1"]);
        assert_eq!(reduced.edges().len(), 2);
    }

    #[test]
    fn test_focus_drops_edges_between_unmatched_nodes() {
        let graph = dependency_graph();
        // Focus on rules: sku-1 comes in as a neighbor, but the
        // attribute edges into sku-1 stay out with the attributes.
        let reduced = focus(&graph, |n| n.kind == NodeKind::Rule);

        let ids: Vec<_> = reduced.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["sku-1", "rule-1"]);
        let edge_ids: Vec<_> = reduced.edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(edge_ids, vec!["sku-1-rule-1"]);
    }

    #[test]
    fn test_filter_does_not_mutate_source() {
        let graph = dependency_graph();
        let before = graph.clone();
        let _ = focus(&graph, |n| n.kind == NodeKind::Sku);
        let _ = induced(&graph, |_| false);
        assert_eq!(graph, before);
    }

    #[test]
    fn test_empty_predicate_yields_empty_graph() {
        let graph = dependency_graph();
        let reduced = induced(&graph, |_| false);
        assert!(reduced.nodes().is_empty());
        assert!(reduced.edges().is_empty());
    }
}
