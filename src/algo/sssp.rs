/*!
# Single-Source Shortest Paths

[`ShortestPaths`] computes the reference distances of the `sssp` app with a lazy-deletion
priority queue. Entries are ordered by `(bucket, distance, vertex)` where
`bucket = distance / step`; with the default step of `1` this is exactly Dijkstra's order.

A popped entry finalises its vertex only if it improves the stored distance; stale entries are
simply dropped (there is no decrease-key). Every neighbor of a finalised vertex is re-inserted
with its extended distance.
*/

use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::debug;

use super::*;

/// Counters collected during a [`ShortestPaths`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SsspStats {
    /// Number of queue entries removed
    pub pops: u64,
    /// Largest number of entries in the queue at once
    pub max_queue_len: usize,
    /// Number of vertices with a finite distance
    pub reached: NumNodes,
}

/// Builder for a shortest-path computation from a single source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortestPaths {
    source: Node,
    step: u32,
}

impl ShortestPaths {
    /// Creates a computation starting at `source` with step `1`
    pub fn new(source: Node) -> Self {
        Self { source, step: 1 }
    }

    /// Updates the bucket width
    pub fn step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    /// Fills the distance array of `graph` and returns the run's statistics.
    /// Unreachable vertices keep [`UNREACHED`].
    ///
    /// # Errors
    /// - [`Error::InvalidParameter`] if the source is not a vertex or the step is `0`
    /// - [`Error::DistanceOverflow`] if the shortest distance of some reachable vertex would
    ///   reach [`UNREACHED`]
    ///
    /// # Examples
    /// ```
    /// use graph_gen::{algo::ShortestPaths, prelude::*};
    ///
    /// let mut graph = Graph::new(3);
    /// graph.push_edge(0, 1, 1);
    /// graph.push_edge(1, 2, 2);
    /// graph.push_edge(0, 2, 4);
    ///
    /// let mut csr = graph.to_csr();
    /// ShortestPaths::new(0).run(&mut csr).unwrap();
    /// assert_eq!(csr.distances(), &[0, 1, 3]);
    /// ```
    pub fn run(&self, graph: &mut CsrGraph) -> Result<SsspStats> {
        if self.source >= graph.number_of_nodes() {
            return Err(Error::InvalidParameter(format!(
                "source {} is not a vertex of a graph with {} vertices",
                self.source,
                graph.number_of_nodes()
            )));
        }
        if self.step == 0 {
            return Err(Error::InvalidParameter("bucket step must be positive".into()));
        }

        let mut distance = vec![UNREACHED; graph.number_of_nodes() as usize];
        let mut stats = SsspStats::default();
        let mut overflowed = Vec::new();

        let mut heap = BinaryHeap::new();
        heap.push(Reverse((0, 0, self.source)));
        stats.max_queue_len = 1;

        while let Some(Reverse((_, dist, u))) = heap.pop() {
            stats.pops += 1;
            if distance[u as usize] <= dist {
                continue;
            }
            distance[u as usize] = dist;
            stats.reached += 1;

            for adj in graph.neighbors_of(u) {
                match dist.checked_add(adj.weight).filter(|&d| d != UNREACHED) {
                    Some(extended) => {
                        heap.push(Reverse((extended / self.step, extended, adj.target)))
                    }
                    // only an error if no shorter path reaches the target
                    None => overflowed.push(adj.target),
                }
            }
            stats.max_queue_len = stats.max_queue_len.max(heap.len());
        }

        if let Some(&vertex) = overflowed
            .iter()
            .find(|&&v| distance[v as usize] == UNREACHED)
        {
            return Err(Error::DistanceOverflow { vertex });
        }

        graph.distances_mut().copy_from_slice(&distance);

        debug!(
            source = self.source,
            pops = stats.pops,
            max_queue_len = stats.max_queue_len,
            reached = stats.reached,
            "computed shortest paths"
        );

        Ok(stats)
    }
}
