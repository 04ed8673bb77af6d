/*!
# Graph Generators

Builder-style generators for the synthetic inputs of the accelerator apps:
- [`GridGraph`]: square grid with randomly weighted down/right edges (sssp, color),
- [`FlowGrid`]: layered flow network with a super source and a super sink (flow).

The typical usage workflow is:

1. Create a generator instance (e.g., `GridGraph::new()`).
2. Set parameters using builder methods (e.g., `.size(n).seed(s)`).
3. Generate the graph via `generate()` (seeded by the generator) or `generate_with(rng)`.

All randomness is drawn from the given RNG, so equal parameters and equal seeds produce
identical graphs.
*/

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::{error::*, prelude::*};

mod flow_grid;
mod grid;

pub use flow_grid::*;
pub use grid::*;

/// Trait for generators that allow setting the seed used by [`GraphGenerator::generate`].
pub trait SeededGen {
    /// Sets the seed of the internal RNG.
    fn seed(self, seed: u64) -> Self;
}

/// General trait for a configurable graph generator.
pub trait GraphGenerator {
    /// Returns the seed [`GraphGenerator::generate`] uses.
    fn seed_value(&self) -> u64;

    /// Generates a graph drawing all random choices from `rng`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if the configured parameters do not describe a
    /// valid graph.
    fn generate_with<R>(&self, rng: &mut R) -> Result<Graph>
    where
        R: Rng;

    /// Generates a graph with a [`Pcg64Mcg`] seeded by [`GraphGenerator::seed_value`].
    fn generate(&self) -> Result<Graph> {
        self.generate_with(&mut Pcg64Mcg::seed_from_u64(self.seed_value()))
    }
}

/// Returns `a * b` as a vertex count or an [`Error::InvalidParameter`] naming `what`
pub(crate) fn checked_nodes(a: NumNodes, b: NumNodes, what: &str) -> Result<NumNodes> {
    a.checked_mul(b)
        .ok_or_else(|| Error::InvalidParameter(format!("{what} {a}x{b} has too many vertices")))
}
