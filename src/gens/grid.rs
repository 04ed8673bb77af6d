use rand::Rng;
use rand_distr::Uniform;

use crate::gens::*;

/// `n x n` grid where vertex `i*n + j` has an edge to its lower neighbor `(i+1)*n + j` followed
/// by an edge to its right neighbor `i*n + j + 1` (if they exist).
///
/// Weights are drawn uniformly from `0..max_weight`. The grid has `2n(n-1)` edges and vertex `0`
/// as its designated start.
#[derive(Debug, Copy, Clone)]
pub struct GridGraph {
    n: NumNodes,
    max_weight: Weight,
    seed: u64,
}

impl Default for GridGraph {
    fn default() -> Self {
        Self {
            n: 0,
            max_weight: 10,
            seed: 0,
        }
    }
}

impl GridGraph {
    /// Creates a new empty grid generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the side length `n`
    pub fn size(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }

    /// Updates the exclusive upper bound of edge weights
    pub fn max_weight(mut self, w: Weight) -> Self {
        self.max_weight = w;
        self
    }
}

impl SeededGen for GridGraph {
    fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl GraphGenerator for GridGraph {
    fn seed_value(&self) -> u64 {
        self.seed
    }

    fn generate_with<R: Rng>(&self, rng: &mut R) -> Result<Graph> {
        let n = self.n;
        if n == 0 {
            return Err(Error::InvalidParameter("grid size must be positive".into()));
        }
        let weights = Uniform::new(0, self.max_weight).map_err(|_| {
            Error::InvalidParameter(format!("max weight {} is empty", self.max_weight))
        })?;

        let mut graph = Graph::new(checked_nodes(n, n, "grid")?);
        for i in 0..n {
            for j in 0..n {
                let vid = i * n + j;
                if i + 1 < n {
                    graph.push_edge(vid, vid + n, rng.sample(&weights));
                }
                if j + 1 < n {
                    graph.push_edge(vid, vid + 1, rng.sample(&weights));
                }
            }
        }
        graph.set_source(0);

        Ok(graph)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn structure() {
        for n in [1, 2, 5, 16] {
            let graph = GridGraph::new().size(n).generate().unwrap();
            assert_eq!(graph.number_of_nodes(), n * n);
            assert_eq!(graph.number_of_edges(), 2 * n * (n - 1));
            assert_eq!(graph.source(), 0);
            assert!(
                graph
                    .vertices()
                    .flat_map(|u| graph.adjacency(u).iter())
                    .all(|a| a.weight < 10)
            );
        }
    }

    #[test]
    fn down_before_right() {
        let graph = GridGraph::new().size(3).generate().unwrap();
        let targets = |u| graph.adjacency(u).iter().map(|a| a.target).collect::<Vec<_>>();

        assert_eq!(targets(0), vec![3, 1]);
        assert_eq!(targets(2), vec![5]);
        assert_eq!(targets(6), vec![7]);
        assert!(targets(8).is_empty());
    }

    #[test]
    fn deterministic_per_seed() {
        let a = GridGraph::new().size(8).seed(5).generate().unwrap();
        let b = GridGraph::new().size(8).seed(5).generate().unwrap();
        assert_eq!(a, b);

        let c = GridGraph::new().size(8).seed(6).generate().unwrap();
        assert_eq!(a.edges().count(), c.edges().count());
        assert_ne!(a, c);
    }

    #[test]
    fn invalid_parameters() {
        assert!(matches!(
            GridGraph::new().generate(),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            GridGraph::new().size(3).max_weight(0).generate(),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            GridGraph::new().size(100_000).generate(),
            Err(Error::InvalidParameter(_))
        ));
    }
}
