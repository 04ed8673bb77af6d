use tracing::debug;

use super::*;

/// Global relabeling runs every `2^8` iterations unless configured otherwise
pub const DEFAULT_LOG_RELABEL_INTERVAL: u32 = 8;

/// Number of low bits of the hardware's iteration counter below the relabel field
const RELABEL_SHIFT: u32 = 8;

/// Configuration of the push-relabel parameters embedded into a flow image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    log_relabel_interval: u32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            log_relabel_interval: DEFAULT_LOG_RELABEL_INTERVAL,
        }
    }
}

impl FlowConfig {
    /// Creates the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the binary logarithm of the global relabel interval
    pub fn log_relabel_interval(mut self, log: u32) -> Self {
        self.log_relabel_interval = log;
        self
    }
}

/// Parameters of a max-flow instance that the flow image carries besides the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowMetadata {
    /// Initial excess of the source: the sum of its outgoing capacities
    pub source_excess: u32,
    pub log_relabel_interval: u32,
    /// `((1 << log) - 1) << 8`
    pub global_relabel_mask: u32,
    /// `!((1 << (log + 8)) - 1)`
    pub iteration_no_mask: u32,
}

impl FlowMetadata {
    /// Computes the metadata of `graph` with respect to its designated source.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if the source is not a vertex, the source's
    /// capacities do not sum up to a 32-bit value, or the masks do not fit into 32 bits.
    ///
    /// # Examples
    /// ```
    /// use graph_gen::{algo::*, prelude::*};
    ///
    /// let mut graph = Graph::new(3);
    /// graph.add_residual_edge(0, 1, 4);
    /// graph.add_residual_edge(0, 2, 5);
    ///
    /// let meta = FlowMetadata::compute(&graph, &FlowConfig::default()).unwrap();
    /// assert_eq!(meta.source_excess, 9);
    /// assert_eq!(meta.global_relabel_mask, 0xff00);
    /// assert_eq!(meta.iteration_no_mask, 0xffff_0000);
    /// ```
    pub fn compute(graph: &Graph, config: &FlowConfig) -> Result<Self> {
        let source = graph.source();
        if source >= graph.number_of_nodes() {
            return Err(Error::InvalidParameter(format!(
                "flow source {source} is not a vertex"
            )));
        }

        let log = config.log_relabel_interval;
        if log.saturating_add(RELABEL_SHIFT) >= u32::BITS {
            return Err(Error::InvalidParameter(format!(
                "log relabel interval {log} exceeds {}",
                u32::BITS - RELABEL_SHIFT - 1
            )));
        }

        let source_excess = graph
            .adjacency(source)
            .iter()
            .try_fold(0u32, |sum, adj| sum.checked_add(adj.weight))
            .ok_or_else(|| {
                Error::InvalidParameter(format!("capacities of source {source} overflow 32 bits"))
            })?;

        let meta = Self {
            source_excess,
            log_relabel_interval: log,
            global_relabel_mask: ((1u32 << log) - 1) << RELABEL_SHIFT,
            iteration_no_mask: !((1u32 << (log + RELABEL_SHIFT)) - 1),
        };

        debug!(
            source,
            excess = meta.source_excess,
            relabel_mask = meta.global_relabel_mask,
            iteration_mask = meta.iteration_no_mask,
            "computed flow metadata"
        );

        Ok(meta)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gens::{FlowGrid, GraphGenerator};

    #[test]
    fn excess_is_sum_of_source_capacities() {
        let graph = FlowGrid::new()
            .rows(3)
            .cols(7)
            .connections(2)
            .generate()
            .unwrap();
        let meta = FlowMetadata::compute(&graph, &FlowConfig::default()).unwrap();

        let expected: u32 = graph.adjacency(graph.source()).iter().map(|a| a.weight).sum();
        assert_eq!(meta.source_excess, expected);
        assert!(meta.source_excess >= 7);
        assert_eq!(meta.log_relabel_interval, DEFAULT_LOG_RELABEL_INTERVAL);
    }

    #[test]
    fn masks() {
        let mut graph = Graph::new(1);
        graph.set_source(0);

        let meta = FlowMetadata::compute(&graph, &FlowConfig::new().log_relabel_interval(4))
            .unwrap();
        assert_eq!(meta.source_excess, 0);
        assert_eq!(meta.global_relabel_mask, 0x0f00);
        assert_eq!(meta.iteration_no_mask, 0xffff_f000);

        let meta = FlowMetadata::compute(&graph, &FlowConfig::new().log_relabel_interval(0))
            .unwrap();
        assert_eq!(meta.global_relabel_mask, 0);
        assert_eq!(meta.iteration_no_mask, 0xffff_ff00);

        assert!(matches!(
            FlowMetadata::compute(&graph, &FlowConfig::new().log_relabel_interval(24)),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn excess_overflow() {
        let mut graph = Graph::new(3);
        graph.add_residual_edge(0, 1, u32::MAX);
        graph.add_residual_edge(0, 2, 1);

        assert!(matches!(
            FlowMetadata::compute(&graph, &FlowConfig::default()),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn missing_source() {
        assert!(matches!(
            FlowMetadata::compute(&Graph::new(0), &FlowConfig::default()),
            Err(Error::InvalidParameter(_))
        ));
    }
}
