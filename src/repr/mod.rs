/*!
# Graph Representations

- [`Graph`] is the mutable adjacency-array representation every loader and generator builds.
  Each [`Vertex`] owns an ordered list of outgoing [`Adj`] records.
- [`CsrGraph`] is the frozen, flattened view compiled from a [`Graph`] that solvers and
  serializers operate on.

## Residual graphs

Flow networks are built through [`Graph::add_residual_edge`], which keeps every forward edge
paired with a reverse edge of capacity `0`. Pairs reference each other by **slot index**
(`Adj::twin`) in the other endpoint's adjacency list; there are no pointers between edges.

```
use graph_gen::prelude::*;

let mut graph = Graph::new(2);
graph.add_residual_edge(0, 1, 7);

let forward = graph.adjacency(0)[0];
let reverse = graph.adjacency(1)[forward.twin as usize];
assert_eq!((reverse.target, reverse.weight), (0, 0));
```
*/

use std::ops::Range;

use crate::{edge::*, node::*};

mod csr;

pub use csr::*;

/// A single vertex: optional coordinates and its outgoing edges in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vertex {
    pub coordinates: Option<Coordinates>,
    adjacency: Vec<Adj>,
}

impl Vertex {
    /// Creates a vertex without edges
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self {
            coordinates,
            adjacency: Vec::new(),
        }
    }

    /// Returns the outgoing edges of this vertex
    pub fn adjacency(&self) -> &[Adj] {
        &self.adjacency
    }

    /// Returns the number of outgoing edges
    pub fn degree(&self) -> NumEdges {
        self.adjacency.len() as NumEdges
    }

    /// Appends an outgoing edge
    pub fn push(&mut self, adj: Adj) {
        self.adjacency.push(adj);
    }
}

/// Directed (optionally residual) graph stored as an array of adjacency lists.
///
/// The graph also remembers the designated `source` and `sink` vertices since some input
/// formats declare them alongside the edges. Both default to `0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    vertices: Vec<Vertex>,
    source: Node,
    sink: Node,
}

impl Graph {
    /// Creates a graph with `n` vertices and no edges
    pub fn new(n: NumNodes) -> Self {
        Self {
            vertices: vec![Vertex::default(); n as usize],
            source: 0,
            sink: 0,
        }
    }

    /// Creates a graph from already populated vertices
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            source: 0,
            sink: 0,
        }
    }

    /// Returns the number of vertices
    pub fn number_of_nodes(&self) -> NumNodes {
        self.vertices.len() as NumNodes
    }

    /// Returns the number of (directed) edges, i.e. the sum of all out-degrees
    pub fn number_of_edges(&self) -> NumEdges {
        self.vertices.iter().map(Vertex::degree).sum()
    }

    /// Returns *true* if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the range of all vertex ids
    pub fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns vertex `u`.
    /// ** Panics if `u >= n` **
    pub fn vertex(&self, u: Node) -> &Vertex {
        &self.vertices[u as usize]
    }

    /// Returns the outgoing edges of `u`.
    /// ** Panics if `u >= n` **
    pub fn adjacency(&self, u: Node) -> &[Adj] {
        &self.vertices[u as usize].adjacency
    }

    /// Returns the out-degree of `u`.
    /// ** Panics if `u >= n` **
    pub fn degree_of(&self, u: Node) -> NumEdges {
        self.vertices[u as usize].degree()
    }

    /// Returns an iterator over all edges (ignoring weights) in vertex order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .flat_map(|(u, v)| v.adjacency.iter().map(move |a| Edge(u as Node, a.target)))
    }

    /// Designated start vertex (sssp source / flow source)
    pub fn source(&self) -> Node {
        self.source
    }

    /// Designated end vertex (flow sink)
    pub fn sink(&self) -> Node {
        self.sink
    }

    pub fn set_source(&mut self, u: Node) {
        self.source = u;
    }

    pub fn set_sink(&mut self, u: Node) {
        self.sink = u;
    }

    /// Sets the coordinates of `u`.
    /// ** Panics if `u >= n` **
    pub fn set_coordinates(&mut self, u: Node, coordinates: Coordinates) {
        self.vertices[u as usize].coordinates = Some(coordinates);
    }

    /// Appends the plain directed edge `from -> to` without any residual pairing.
    /// Parallel edges are kept.
    /// ** Panics if `from >= n` **
    pub fn push_edge(&mut self, from: Node, to: Node, weight: Weight) {
        debug_assert!(to < self.number_of_nodes());
        self.vertices[from as usize]
            .adjacency
            .push(Adj::new(to, weight));
    }

    /// Inserts `from -> to` with capacity `capacity` into a residual graph.
    ///
    /// If `from` already has an edge to `to`, the capacity of that edge and of its twin are
    /// overwritten and nothing else changes. Otherwise a forward edge is appended to `from`
    /// and a reverse edge of capacity `0` to `to`, both pointing at each other's slot.
    /// ** Panics if `from >= n || to >= n` **
    pub fn add_residual_edge(&mut self, from: Node, to: Node, capacity: Weight) {
        assert!(to < self.number_of_nodes());

        if let Some(slot) = self.vertices[from as usize]
            .adjacency
            .iter()
            .position(|a| a.target == to)
        {
            let forward = &mut self.vertices[from as usize].adjacency[slot];
            forward.weight = capacity;
            let twin = forward.twin as usize;
            self.vertices[to as usize].adjacency[twin].weight = capacity;
            return;
        }

        let forward_slot = self.vertices[from as usize].adjacency.len() as u32;
        // a self-loop stores both halves in the same list, the reverse one right behind
        let reverse_slot = if from == to {
            forward_slot + 1
        } else {
            self.vertices[to as usize].adjacency.len() as u32
        };

        self.vertices[from as usize]
            .adjacency
            .push(Adj::with_twin(to, capacity, reverse_slot));
        self.vertices[to as usize]
            .adjacency
            .push(Adj::with_twin(from, 0, forward_slot));
    }

    /// Returns a residual copy of this graph: every edge is re-inserted in adjacency order
    /// through [`Graph::add_residual_edge`], keeping coordinates, source and sink.
    pub fn to_residual(&self) -> Graph {
        let mut residual = Graph::from_vertices(
            self.vertices
                .iter()
                .map(|v| Vertex::new(v.coordinates))
                .collect(),
        );
        residual.source = self.source;
        residual.sink = self.sink;

        for u in self.vertices() {
            for adj in self.adjacency(u) {
                residual.add_residual_edge(u, adj.target, adj.weight);
            }
        }

        residual
    }

    /// Replaces the adjacency list of `u`.
    /// ** Panics if `u >= n` **
    pub(crate) fn replace_adjacency(&mut self, u: Node, adjacency: Vec<Adj>) {
        self.vertices[u as usize].adjacency = adjacency;
    }

    /// Freezes the graph into its CSR form
    pub fn to_csr(&self) -> CsrGraph {
        CsrGraph::from(self)
    }
}
