use rand::{Rng, seq::SliceRandom};
use rand_distr::Uniform;

use crate::gens::*;

/// Layered flow network on an `rows x cols` grid.
///
/// Every vertex of rows `0..rows-1` is connected to `connections` distinct, randomly chosen
/// vertices of the next row. A super source (`rows*cols`) feeds every vertex of the first row
/// and every vertex of the last row drains into a super sink (`rows*cols + 1`). Capacities are
/// drawn uniformly from `[min_capacity, max_capacity)` and all edges are inserted as residual
/// pairs.
#[derive(Debug, Copy, Clone)]
pub struct FlowGrid {
    rows: NumNodes,
    cols: NumNodes,
    connections: NumNodes,
    min_capacity: Weight,
    max_capacity: Weight,
    seed: u64,
}

impl Default for FlowGrid {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            connections: 0,
            min_capacity: 1,
            max_capacity: 10,
            seed: 42,
        }
    }
}

impl FlowGrid {
    /// Creates a new empty flow grid generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the number of rows
    pub fn rows(mut self, rows: NumNodes) -> Self {
        self.rows = rows;
        self
    }

    /// Updates the number of columns
    pub fn cols(mut self, cols: NumNodes) -> Self {
        self.cols = cols;
        self
    }

    /// Updates the number of edges from each vertex into the next row
    pub fn connections(mut self, k: NumNodes) -> Self {
        self.connections = k;
        self
    }

    /// Updates the capacity range `[min, max)`
    pub fn capacities(mut self, min: Weight, max: Weight) -> Self {
        self.min_capacity = min;
        self.max_capacity = max;
        self
    }
}

impl SeededGen for FlowGrid {
    fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl GraphGenerator for FlowGrid {
    fn seed_value(&self) -> u64 {
        self.seed
    }

    fn generate_with<R: Rng>(&self, rng: &mut R) -> Result<Graph> {
        let (r, c, k) = (self.rows, self.cols, self.connections);
        if r == 0 || c == 0 {
            return Err(Error::InvalidParameter(format!(
                "flow grid {r}x{c} must have at least one row and column"
            )));
        }
        if k > c {
            return Err(Error::InvalidParameter(format!(
                "cannot pick {k} distinct columns out of {c}"
            )));
        }
        let capacities = Uniform::new(self.min_capacity, self.max_capacity).map_err(|_| {
            Error::InvalidParameter(format!(
                "capacity range [{}, {}) is empty",
                self.min_capacity, self.max_capacity
            ))
        })?;

        let grid = checked_nodes(r, c, "flow grid")?;
        let n = grid
            .checked_add(2)
            .ok_or_else(|| Error::InvalidParameter("flow grid has too many vertices".into()))?;
        let (source, sink) = (grid, grid + 1);

        let mut graph = Graph::new(n);
        let mut columns = Vec::with_capacity(c as usize);
        for i in 0..r - 1 {
            for j in 0..c {
                columns.clear();
                columns.extend(0..c);
                let (chosen, _) = columns.partial_shuffle(rng, k as usize);

                for &x in chosen.iter() {
                    graph.add_residual_edge(i * c + j, (i + 1) * c + x, rng.sample(&capacities));
                }
            }
        }

        for j in 0..c {
            graph.add_residual_edge(source, j, rng.sample(&capacities));
        }
        for j in 0..c {
            graph.add_residual_edge((r - 1) * c + j, sink, rng.sample(&capacities));
        }

        graph.set_source(source);
        graph.set_sink(sink);

        Ok(graph)
    }
}
