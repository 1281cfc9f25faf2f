//! Cycle breaking for the ranking pass
//!
//! Depth-first traversal in node input order; any edge whose target is
//! on the active DFS path is flipped for ranking purposes only. The
//! graph itself keeps the edge as authored, so back-transitions still
//! render in their true direction.

use std::collections::HashMap;

use crate::graph::DesignGraph;

enum Step {
    Enter(usize),
    Exit(usize),
}

/// Edge list as node-index pairs, with cycle-closing edges flipped
///
/// Self-loops carry no ranking information and are excluded entirely.
pub(super) fn orient(graph: &DesignGraph) -> Vec<(usize, usize)> {
    let index: HashMap<&str, usize> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let node_count = graph.nodes().len();
    let mut endpoints = Vec::new();
    let mut successors: Vec<Vec<(usize, usize)>> = vec![Vec::new(); node_count];
    for edge in graph.edges() {
        let source = index[edge.source.as_str()];
        let target = index[edge.target.as_str()];
        if source == target {
            continue;
        }
        successors[source].push((endpoints.len(), target));
        endpoints.push((source, target));
    }

    let mut reversed = vec![false; endpoints.len()];
    let mut visited = vec![false; node_count];
    let mut on_path = vec![false; node_count];

    for root in 0..node_count {
        if visited[root] {
            continue;
        }
        let mut stack = vec![Step::Enter(root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Exit(v) => on_path[v] = false,
                Step::Enter(v) => {
                    if visited[v] {
                        continue;
                    }
                    visited[v] = true;
                    on_path[v] = true;
                    stack.push(Step::Exit(v));
                    for &(edge, target) in successors[v].iter().rev() {
                        if on_path[target] {
                            reversed[edge] = true;
                        } else if !visited[target] {
                            stack.push(Step::Enter(target));
                        }
                    }
                }
            }
        }
    }

    endpoints
        .iter()
        .zip(&reversed)
        .map(|(&(source, target), &flip)| if flip { (target, source) } else { (source, target) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GraphEdge, GraphNode, NodeKind};

    fn graph_from(nodes: &[&str], edges: &[(&str, &str)]) -> DesignGraph {
        let mut graph = DesignGraph::new();
        for id in nodes {
            graph
                .add_node(GraphNode::new(*id, NodeKind::State, *id))
                .unwrap();
        }
        for (i, (source, target)) in edges.iter().enumerate() {
            graph
                .add_edge(GraphEdge::new(format!("e-{}", i), *source, *target))
                .unwrap();
        }
        graph
    }

    fn has_cycle(node_count: usize, edges: &[(usize, usize)]) -> bool {
        // Kahn count: fewer processed nodes than present means a cycle
        let mut indegree = vec![0usize; node_count];
        for &(_, target) in edges {
            indegree[target] += 1;
        }
        let mut queue: Vec<usize> = (0..node_count).filter(|&v| indegree[v] == 0).collect();
        let mut processed = 0;
        while let Some(v) = queue.pop() {
            processed += 1;
            for &(source, target) in edges {
                if source == v {
                    indegree[target] -= 1;
                    if indegree[target] == 0 {
                        queue.push(target);
                    }
                }
            }
        }
        processed < node_count
    }

    #[test]
    fn test_acyclic_graph_is_untouched() {
        let graph = graph_from(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let edges = orient(&graph);
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_two_cycle_is_broken() {
        let graph = graph_from(&["a", "b"], &[("a", "b"), ("b", "a")]);
        let edges = orient(&graph);
        assert_eq!(edges.len(), 2);
        assert!(!has_cycle(2, &edges));
    }

    #[test]
    fn test_longer_cycle_is_broken() {
        let graph = graph_from(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")],
        );
        let edges = orient(&graph);
        assert_eq!(edges.len(), 4);
        assert!(!has_cycle(4, &edges));
    }

    #[test]
    fn test_self_loops_are_dropped() {
        let graph = graph_from(&["a", "b"], &[("a", "a"), ("a", "b")]);
        let edges = orient(&graph);
        assert_eq!(edges, vec![(0, 1)]);
    }
}
