/*!
# Compressed Sparse Row (CSR) Graph

[`CsrGraph`] is the frozen form of a [`Graph`] that solvers and memory-image serializers work on.
All adjacency lists are stored in a single flattened array, with offset indices marking the
start of each vertex's neighbor list:

- `offsets`: `n + 1` non-decreasing entries with `offsets[n] == m`,
- `neighbors`: `m` [`Adj`] records copied verbatim (target, weight, twin),
- `distance`: one word per vertex, initialised to [`UNREACHED`].

The structure never changes shape after compilation; only solvers write into `distance`.
*/

use super::*;
use crate::utils::sliced_buffer::SlicedBuffer;

/// Sentinel ("infinity") for vertices without a distance
pub const UNREACHED: u32 = u32::MAX;

/// Directed **CSR graph** with weighted (and possibly twin-linked) edges.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrGraph {
    out_nbs: SlicedBuffer<Adj>,
    distance: Vec<u32>,
}

impl CsrGraph {
    /// Returns the number of vertices
    pub fn number_of_nodes(&self) -> NumNodes {
        self.out_nbs.len() as NumNodes
    }

    /// Returns the number of edges
    pub fn number_of_edges(&self) -> NumEdges {
        self.out_nbs.number_of_entries()
    }

    /// Returns the range of all vertex ids
    pub fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns the `n + 1` edge offsets
    pub fn offsets(&self) -> &[NumEdges] {
        self.out_nbs.raw_offset_slice()
    }

    /// Returns the flattened edge array
    pub fn neighbors(&self) -> &[Adj] {
        self.out_nbs.raw_buffer_slice()
    }

    /// Returns the outgoing edges of `u`.
    /// ** Panics if `u >= n` **
    pub fn neighbors_of(&self, u: Node) -> &[Adj] {
        &self.out_nbs[u]
    }

    /// Returns the out-degree of `u`.
    /// ** Panics if `u >= n` **
    pub fn degree_of(&self, u: Node) -> NumEdges {
        self.out_nbs.size_of(u)
    }

    /// Returns the per-vertex distance words
    pub fn distances(&self) -> &[u32] {
        &self.distance
    }

    /// Returns the per-vertex distance words for a solver to fill in
    pub fn distances_mut(&mut self) -> &mut [u32] {
        &mut self.distance
    }
}

impl From<&Graph> for CsrGraph {
    fn from(graph: &Graph) -> Self {
        let out_nbs =
            SlicedBuffer::from_slices(graph.vertices().map(|u| graph.adjacency(u)));

        Self {
            distance: vec![UNREACHED; out_nbs.len()],
            out_nbs,
        }
    }
}
