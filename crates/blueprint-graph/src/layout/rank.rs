//! Longest-path rank assignment
//!
//! Sources sit at rank 0 and every oriented edge pushes its target at
//! least one rank below its source. Nodes with no edges take the
//! configured default rank. The Kahn walk visits nodes in input order,
//! keeping the result stable across runs.

use std::collections::VecDeque;

use crate::graph::DesignGraph;

/// Rank per node index, for an already-oriented (acyclic) edge list
pub(super) fn assign(graph: &DesignGraph, edges: &[(usize, usize)], default_rank: i32) -> Vec<i32> {
    let node_count = graph.nodes().len();
    let mut indegree = vec![0usize; node_count];
    let mut degree = vec![0usize; node_count];
    for &(source, target) in edges {
        indegree[target] += 1;
        degree[source] += 1;
        degree[target] += 1;
    }

    let mut rank = vec![0i32; node_count];
    let mut remaining = indegree;
    let mut queue: VecDeque<usize> = (0..node_count).filter(|&v| remaining[v] == 0).collect();
    let mut processed = 0;

    while let Some(v) = queue.pop_front() {
        processed += 1;
        for &(source, target) in edges {
            if source == v {
                rank[target] = rank[target].max(rank[v] + 1);
                remaining[target] -= 1;
                if remaining[target] == 0 {
                    queue.push_back(target);
                }
            }
        }
    }
    debug_assert_eq!(processed, node_count, "oriented edge list must be acyclic");

    for v in 0..node_count {
        if degree[v] == 0 {
            rank[v] = default_rank;
        }
    }
    rank
}
