/*!
`graph_gen` prepares graph datasets for a graph-processing accelerator. It reads a graph from
one of several file formats (or generates one), computes a reference result in software and
emits the bit-exact memory image the accelerator loads before a run.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
The accelerator addresses everything with 32-bit words, so neither nodes nor weights exceed `u32`.
Outgoing edges are stored as [`Adj`](crate::edge::Adj) records `(target, weight, twin)`, where
`twin` is the slot of the paired reverse edge in residual (flow) graphs.

- [`Graph`](crate::repr::Graph) is the mutable adjacency array every loader and generator builds,
- [`CsrGraph`](crate::repr::CsrGraph) is its frozen, flattened form the solvers and serializers use.

# Apps

| app | reference result | image |
|---|---|---|
| `sssp` | distances from the start vertex | [`sssp_image`](crate::image::sssp_image) |
| `color` | greedy coloring of the symmetric closure | [`color_image`](crate::image::color_image) |
| `flow` | source excess and relabel masks | [`flow_image`](crate::image::flow_image) |

# Usage

There are *5* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges and both graph representations,
- [`io`] includes readers for the Dimacs-like `gr`, plain edge-list and binary lat/lon formats as well as text exports,
- [`gens`] includes the seeded grid and flow-network generators,
- [`algo`] includes symmetrization and the reference solvers,
- [`image`] includes the memory-image layouts and their digests.

[`pipeline`] wires them together the way the `graph_gen` binary runs them.

In most use-cases, `use graph_gen::{prelude::*, algo::*};` suffices for your needs.

```
use graph_gen::{algo::*, gens::*, image::*, prelude::*};

let graph = GridGraph::new().size(4).seed(1).generate().unwrap();
let mut csr = graph.to_csr();
ShortestPaths::new(graph.source()).run(&mut csr).unwrap();

let image = sssp_image(&csr, graph.source()).unwrap();
assert_eq!(image.magic(), Some(IMAGE_MAGIC));
assert_eq!(image.end(), Some(image.len() as u32));
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod image;
pub mod io;
pub mod node;
pub mod pipeline;
pub mod repr;
pub mod utils;

pub use error::{Error, Result};

/// `graph_gen::prelude` includes definitions for nodes and edges as well as both graph representations.
pub mod prelude {
    pub use super::{edge::*, node::*, repr::*};
}
