/*!
# Node Representation

We choose `Node = u32` as the accelerator addresses vertices with 32-bit words.
Nodes are dense ids `0..n`; any other value is invalid for a graph with `n` nodes.
*/

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// Geographic position of a vertex, both angles in **radians**.
///
/// Only graphs read from the binary lat/lon format carry coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
