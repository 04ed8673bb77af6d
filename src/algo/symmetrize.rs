use itertools::Itertools;
use tracing::debug;

use super::*;

/// Trait for turning a directed graph into a symmetric one.
pub trait Symmetrize {
    /// Replaces every adjacency list by the sorted, duplicate-free set of vertices adjacent via
    /// an outgoing or incoming edge. All weights and twins are reset to `0` and self-loops are
    /// dropped.
    fn symmetrize(&mut self);
}

impl Symmetrize for Graph {
    fn symmetrize(&mut self) {
        let edges_before = self.number_of_edges();

        let mut neighbors = vec![Vec::new(); self.number_of_nodes() as usize];
        for Edge(u, v) in self.edges().filter(|e| !e.is_loop()) {
            neighbors[u as usize].push(v);
            neighbors[v as usize].push(u);
        }

        for (u, nbs) in neighbors.into_iter().enumerate() {
            let adjacency = nbs
                .into_iter()
                .sorted_unstable()
                .dedup()
                .map(|v| Adj::new(v, 0))
                .collect_vec();
            self.replace_adjacency(u as Node, adjacency);
        }

        debug!(
            edges_before,
            edges_after = self.number_of_edges(),
            "symmetrized graph"
        );
    }
}
