//! Crossing reduction within ranks
//!
//! Barycenter sweeps: each node adopts the mean position of its
//! neighbors on the fixed side, with its previous slot as a stable
//! tie-break. A fixed number of alternating down/up sweeps keeps the
//! pass deterministic; nodes without neighbors hold their slot.

use std::cmp::Ordering;

const SWEEPS: usize = 4;

/// Nodes grouped per rank, ordered to reduce crossings
///
/// The initial in-rank order is node input order; ranks may be empty
/// when the default rank leaves a gap.
pub(super) fn arrange(edges: &[(usize, usize)], ranks: &[i32]) -> Vec<Vec<usize>> {
    if ranks.is_empty() {
        return Vec::new();
    }

    let min_rank = *ranks.iter().min().unwrap_or(&0);
    let max_rank = *ranks.iter().max().unwrap_or(&0);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); (max_rank - min_rank + 1) as usize];
    for (v, &r) in ranks.iter().enumerate() {
        layers[(r - min_rank) as usize].push(v);
    }

    let mut slot = vec![0usize; ranks.len()];
    for layer in &layers {
        for (i, &v) in layer.iter().enumerate() {
            slot[v] = i;
        }
    }

    for sweep in 0..SWEEPS {
        let downward = sweep % 2 == 0;
        let layer_indices: Vec<usize> = if downward {
            (1..layers.len()).collect()
        } else {
            (0..layers.len().saturating_sub(1)).rev().collect()
        };

        for li in layer_indices {
            let mut keyed: Vec<(f64, usize, usize)> = layers[li]
                .iter()
                .enumerate()
                .map(|(position, &v)| {
                    let mut total = 0.0;
                    let mut count = 0u32;
                    for &(source, target) in edges {
                        let neighbor = if downward {
                            (target == v).then_some(source)
                        } else {
                            (source == v).then_some(target)
                        };
                        if let Some(n) = neighbor {
                            total += slot[n] as f64;
                            count += 1;
                        }
                    }
                    let barycenter = if count == 0 {
                        position as f64
                    } else {
                        total / f64::from(count)
                    };
                    (barycenter, position, v)
                })
                .collect();

            keyed.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(Ordering::Equal)
                    .then(a.1.cmp(&b.1))
            });
            layers[li] = keyed.into_iter().map(|(_, _, v)| v).collect();
            for (i, &v) in layers[li].iter().enumerate() {
                slot[v] = i;
            }
        }
    }

    layers
}
