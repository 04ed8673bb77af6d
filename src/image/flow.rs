use super::*;
use crate::algo::FlowMetadata;

/// Words of per-vertex state in the distance section
pub const FLOW_VERTEX_WORDS: usize = 16;

/// Header words specific to the flow layout
const END_VERTEX_WORD: usize = 9;
const LOG_RELABEL_WORD: usize = 10;
const RELABEL_MASK_WORD: usize = 11;
const ITERATION_MASK_WORD: usize = 12;
const ORDERED_EDGES_WORD: usize = 13;

/// Positions inside a vertex's distance record
const EXCESS: usize = 0;
const COUNTER: usize = 1;
const HEIGHT: usize = 2;
const OFFSET_BEGIN: usize = 14;
const OFFSET_END: usize = 15;

/// Bits of a packed neighbor word used for the target id
const TARGET_BITS: u32 = 24;

/// Builds the `flow` image of the residual `graph` for the flow from `source` to `sink`.
///
/// Sections: distance (16 words per vertex), edge offsets (`n + 1`), neighbors (two words per
/// edge: `twin << 24 | target` and the capacity), ground truth (`n` sentinel words).
/// Header words 9 to 13 hold the sink, the relabel parameters of `meta` and the
/// ordered-edges flag; words 14 and 15 stay `0`.
///
/// Every distance record carries its edge range in words 14 and 15. The source's record
/// additionally starts with its excess, a zero counter and the height `n`.
///
/// # Errors
/// Returns [`Error::FieldOverflow`] if a twin slot does not fit into 8 bits, a target into
/// 24 bits, or the image exceeds 32-bit word offsets.
pub fn flow_image(
    graph: &CsrGraph,
    source: Node,
    sink: Node,
    meta: &FlowMetadata,
) -> Result<MemoryImage> {
    let n = graph.number_of_nodes() as u64;
    let m = graph.number_of_edges() as u64;

    let mut layout = ImageLayout::new();
    let dist_base = layout.push("distance", FLOW_VERTEX_WORDS as u64 * n)?;
    let offset_base = layout.push("edge offset", n + 1)?;
    let neighbor_base = layout.push("neighbors", 2 * m)?;
    let truth_base = layout.push("ground truth", n)?;

    let mut image = layout.allocate(graph.number_of_nodes(), graph.number_of_edges());
    image.set_header(word::EDGE_OFFSET_BASE, offset_base);
    image.set_header(word::NEIGHBOR_BASE, neighbor_base);
    image.set_header(word::VERTEX_BASE, dist_base);
    image.set_header(word::GROUND_TRUTH_BASE, truth_base);
    image.set_header(word::START, source);
    image.set_header(END_VERTEX_WORD, sink);
    image.set_header(LOG_RELABEL_WORD, meta.log_relabel_interval);
    image.set_header(RELABEL_MASK_WORD, meta.global_relabel_mask);
    image.set_header(ITERATION_MASK_WORD, meta.iteration_no_mask);
    image.set_header(ORDERED_EDGES_WORD, 1);

    let offsets = graph.offsets();
    let records = image.section_mut(dist_base, FLOW_VERTEX_WORDS * n as usize);
    for (u, record) in records.chunks_exact_mut(FLOW_VERTEX_WORDS).enumerate() {
        record[OFFSET_BEGIN] = offsets[u];
        record[OFFSET_END] = offsets[u + 1];
        if u == source as usize {
            record[EXCESS] = meta.source_excess;
            record[COUNTER] = 0;
            record[HEIGHT] = graph.number_of_nodes();
        }
    }

    write_offsets(&mut image, offset_base, graph);

    let neighbors = image.section_mut(neighbor_base, 2 * m as usize);
    for (slot, adj) in neighbors.chunks_exact_mut(2).zip(graph.neighbors()) {
        let twin = check_field("twin slot", adj.twin, u32::BITS - TARGET_BITS)?;
        let target = check_field("edge target", adj.target, TARGET_BITS)?;
        slot[0] = twin << TARGET_BITS | target;
        slot[1] = adj.weight;
    }

    image.section_mut(truth_base, n as usize).fill(UNREACHED);

    Ok(image)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algo::FlowConfig,
        gens::{FlowGrid, GraphGenerator, SeededGen},
        image::digest::ImageDigest,
    };

    fn grid_network(rows: NumNodes, cols: NumNodes, seed: u64) -> (CsrGraph, Graph, FlowMetadata) {
        let graph = FlowGrid::new()
            .rows(rows)
            .cols(cols)
            .connections(cols.min(3))
            .seed(seed)
            .generate()
            .unwrap();
        let meta = FlowMetadata::compute(&graph, &FlowConfig::default()).unwrap();
        (graph.to_csr(), graph, meta)
    }

    fn small_network() -> Graph {
        let mut graph = Graph::new(3);
        graph.add_residual_edge(0, 1, 4);
        graph.add_residual_edge(1, 2, 3);
        graph.add_residual_edge(0, 2, 2);
        graph.set_source(0);
        graph.set_sink(2);
        graph
    }

    #[test]
    fn small_image() {
        let graph = small_network();
        let meta = FlowMetadata::compute(&graph, &FlowConfig::default()).unwrap();
        let csr = graph.to_csr();

        let image = flow_image(&csr, 0, 2, &meta).unwrap();

        // distance 48 -> 48, offsets 4 -> 16, neighbors 12 -> 16, truth 3 -> 16
        assert_eq!(
            image.header(),
            &[
                IMAGE_MAGIC,
                3,
                6,
                64,
                80,
                16,
                96,
                0,
                112,
                2,
                8,
                0xff00,
                0xffff_0000,
                1,
                0,
                0
            ]
        );
        assert_eq!(image.len(), 112);

        let source = image.section(16, 16);
        assert_eq!(&source[..3], &[6, 0, 3]);
        assert_eq!(&source[14..], &[0, 2]);
        let sink = image.section(48, 16);
        assert!(sink[..14].iter().all(|&w| w == 0));
        assert_eq!(&sink[14..], &[4, 6]);

        assert_eq!(image.section(64, 4), &[0, 2, 4, 6]);
        // adjacency: 0 -> [1 (twin 0), 2 (twin 1)], 1 -> [0 (twin 0), 2 (twin 0)],
        // 2 -> [1 (twin 1), 0 (twin 1)]
        assert_eq!(
            image.section(80, 12),
            &[
                1,
                4,
                2 | 1 << 24,
                2,
                0,
                0,
                2,
                3,
                1 | 1 << 24,
                0,
                1 << 24,
                0
            ]
        );
        assert_eq!(image.section(96, 3), &[u32::MAX; 3]);
    }

    #[test]
    fn grid_image_consistent() {
        let graph = FlowGrid::new()
            .rows(4)
            .cols(6)
            .connections(3)
            .generate()
            .unwrap();
        let meta = FlowMetadata::compute(&graph, &FlowConfig::default()).unwrap();
        let csr = graph.to_csr();
        let image = flow_image(&csr, graph.source(), graph.sink(), &meta).unwrap();

        assert_eq!(image.end(), Some(image.len() as u32));
        assert_eq!(image[word::START], 24);
        assert_eq!(image[END_VERTEX_WORD], 25);

        let record = image.section(
            image[word::VERTEX_BASE] + FLOW_VERTEX_WORDS as u32 * graph.source(),
            FLOW_VERTEX_WORDS,
        );
        assert_eq!(record[EXCESS], meta.source_excess);
        assert_eq!(record[HEIGHT], 26);

        let neighbors = image.section(image[word::NEIGHBOR_BASE], 2 * csr.number_of_edges() as usize);
        for (u, adjs) in csr.vertices().map(|u| (u, csr.neighbors_of(u))) {
            let begin = csr.offsets()[u as usize] as usize;
            for (i, adj) in adjs.iter().enumerate() {
                let packed = neighbors[2 * (begin + i)];
                assert_eq!(packed & ((1 << TARGET_BITS) - 1), adj.target);
                assert_eq!(packed >> TARGET_BITS, adj.twin);
                assert_eq!(neighbors[2 * (begin + i) + 1], adj.weight);
            }
        }
    }

    #[test]
    fn grid_layout_is_aligned() {
        for (rows, cols) in [(1, 1), (2, 3), (5, 8)] {
            let (csr, graph, meta) = grid_network(rows, cols, 0);
            let image = flow_image(&csr, graph.source(), graph.sink(), &meta).unwrap();

            assert_eq!(image.end(), Some(image.len() as u32));
            for w in [
                word::EDGE_OFFSET_BASE,
                word::NEIGHBOR_BASE,
                word::VERTEX_BASE,
                word::GROUND_TRUTH_BASE,
            ] {
                assert_eq!(image[w] as usize % CACHE_LINE_WORDS, 0);
            }

            let n = csr.number_of_nodes() as usize;
            let offsets = image.section(image[word::EDGE_OFFSET_BASE], n + 1);
            assert_eq!(offsets, csr.offsets());
            let truth = image.section(image[word::GROUND_TRUTH_BASE], n);
            assert!(truth.iter().all(|&w| w == UNREACHED));
        }
    }

    #[test]
    fn deterministic_digest() {
        let build = |seed| {
            let (csr, graph, meta) = grid_network(6, 6, seed);
            flow_image(&csr, graph.source(), graph.sink(), &meta)
                .unwrap()
                .digest_sha256()
        };

        assert_eq!(build(0), build(0));
        assert_ne!(build(0), build(1));
    }

    #[test]
    fn twin_overflow() {
        // 257 edges into vertex 0 push its reverse slots past 255
        let n = 258;
        let mut graph = Graph::new(n);
        for u in 1..n {
            graph.add_residual_edge(u, 0, 1);
        }
        let meta = FlowMetadata::compute(&graph, &FlowConfig::default()).unwrap();

        assert!(matches!(
            flow_image(&graph.to_csr(), 0, 1, &meta),
            Err(Error::FieldOverflow {
                field: "twin slot",
                value: 256
            })
        ));
    }
}
