/*!
# Graph Algorithms

Reference ("ground truth") computations that accompany every memory image, plus the
graph transformation the coloring app needs beforehand.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use graph_gen::algo::*;
```
and gain access to:
- [`Symmetrize`]: turns a directed graph into a symmetric, duplicate-free one,
- [`ShortestPaths`]: bucketed single-source shortest paths,
- [`GreedyColoring`]: largest-degree-first greedy coloring,
- [`FlowMetadata`]: the parameters of the hardware's push-relabel procedure.
*/

mod coloring;
mod flow;
mod sssp;
mod symmetrize;

use crate::{error::*, prelude::*};

pub use coloring::*;
pub use flow::*;
pub use sssp::*;
pub use symmetrize::*;
