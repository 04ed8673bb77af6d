use std::fmt::{Debug, Display};

use crate::node::Node;

/// An edge is defined by two nodes/endpoints.
/// Readers and writers that ignore weights work with this type.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1` as edge offsets are stored in 32-bit words.
pub type NumEdges = u32;

/// Edge weight: centimetres for geographic graphs, capacity for flow networks,
/// raw integer weight otherwise.
pub type Weight = u32;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

/// An outgoing edge as stored in a vertex's adjacency list.
///
/// `twin` is the slot of the paired reverse edge in `target`'s adjacency list. It is only
/// meaningful for residual (flow) graphs and `0` everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Adj {
    pub target: Node,
    pub weight: Weight,
    pub twin: u32,
}

impl Adj {
    /// Creates an unpaired edge towards `target`
    pub fn new(target: Node, weight: Weight) -> Self {
        Self {
            target,
            weight,
            twin: 0,
        }
    }

    /// Creates an edge towards `target` whose reverse edge sits in slot `twin`
    pub fn with_twin(target: Node, weight: Weight, twin: u32) -> Self {
        Self {
            target,
            weight,
            twin,
        }
    }
}
