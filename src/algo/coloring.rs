use std::cmp::Reverse;

use itertools::Itertools;
use tracing::{debug, warn};

use super::*;
use crate::utils::ColorSet;

/// Marker for vertices that have not been colored yet
pub const UNCOLORED: u32 = u32::MAX;

/// Colors at or above this value are reported with a warning
pub const COLOR_WARN_THRESHOLD: u32 = 28;

/// Largest-degree-first greedy coloring.
///
/// Vertices are processed by descending degree (ties by ascending id); each vertex receives the
/// smallest color not used by an already colored neighbor. The graph is expected to be
/// symmetric (see [`Symmetrize`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyColoring;

impl GreedyColoring {
    /// Returns one color per vertex.
    ///
    /// # Errors
    /// Returns [`Error::ColorOverflow`] if some vertex sees all [`ColorSet::CAPACITY`] colors
    /// among its neighbors.
    ///
    /// # Examples
    /// ```
    /// use graph_gen::{algo::*, prelude::*};
    ///
    /// let mut graph = Graph::new(3);
    /// graph.push_edge(0, 1, 0);
    /// graph.push_edge(1, 2, 0);
    /// graph.symmetrize();
    ///
    /// assert_eq!(GreedyColoring::run(&graph.to_csr()).unwrap(), vec![1, 0, 1]);
    /// ```
    pub fn run(graph: &CsrGraph) -> Result<Vec<u32>> {
        let order = graph
            .vertices()
            .sorted_by_key(|&u| (Reverse(graph.degree_of(u)), u))
            .collect_vec();

        let mut colors = vec![UNCOLORED; graph.number_of_nodes() as usize];
        let mut high_colors = 0usize;

        for u in order {
            let mut used = ColorSet::new();
            for adj in graph.neighbors_of(u) {
                let color = colors[adj.target as usize];
                if color != UNCOLORED {
                    used.insert(color);
                }
            }

            let color = used.first_free().ok_or(Error::ColorOverflow {
                vertex: u,
                capacity: ColorSet::CAPACITY,
            })?;
            if color >= COLOR_WARN_THRESHOLD {
                high_colors += 1;
                debug!(vertex = u, color, "high color");
            }
            colors[u as usize] = color;
        }

        let max_color = colors.iter().copied().max();
        if high_colors > 0 {
            warn!(
                vertices = high_colors,
                threshold = COLOR_WARN_THRESHOLD,
                "vertices received colors at or above the threshold"
            );
        }
        debug!(colors = max_color.map_or(0, |c| c + 1), "computed greedy coloring");

        Ok(colors)
    }
}
