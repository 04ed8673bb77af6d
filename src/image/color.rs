use super::*;

/// Task enqueuer size expected by the coloring cores
pub const ENQUEUER_SIZE: u32 = 16;

/// Low half of the first vertex data word marking "no color yet"
const NO_COLOR: u32 = 0xffff;

/// Header word holding [`ENQUEUER_SIZE`]
const ENQUEUER_SIZE_WORD: usize = 9;

/// Builds the `color` image of the (symmetric) `graph` with the reference coloring `colors`.
///
/// Sections: vertex data (4 words per vertex), edge offsets (`n + 1`), neighbors (target per
/// edge), scratch (2 zero words per vertex), ground truth (`n` colors). Header word 5 is the
/// data base, word 7 the scratch base and word 9 the enqueuer size.
///
/// Vertex data of `u` with degree `d` is `[d << 16 | 0xffff, 0, d << 16, offsets[u]]`.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `colors` does not have one entry per vertex
/// - [`Error::FieldOverflow`] if a degree does not fit into 16 bits or the image exceeds
///   32-bit word offsets
pub fn color_image(graph: &CsrGraph, colors: &[u32]) -> Result<MemoryImage> {
    let n = graph.number_of_nodes() as u64;
    let m = graph.number_of_edges() as u64;
    if colors.len() as u64 != n {
        return Err(Error::InvalidParameter(format!(
            "{} colors for {n} vertices",
            colors.len()
        )));
    }

    let mut layout = ImageLayout::new();
    let data_base = layout.push("vertex data", 4 * n)?;
    let offset_base = layout.push("edge offset", n + 1)?;
    let neighbor_base = layout.push("neighbors", m)?;
    let scratch_base = layout.push("scratch", 2 * n)?;
    let truth_base = layout.push("ground truth", n)?;

    let mut image = layout.allocate(graph.number_of_nodes(), graph.number_of_edges());
    image.set_header(word::EDGE_OFFSET_BASE, offset_base);
    image.set_header(word::NEIGHBOR_BASE, neighbor_base);
    image.set_header(word::VERTEX_BASE, data_base);
    image.set_header(word::GROUND_TRUTH_BASE, truth_base);
    image.set_header(word::START, scratch_base);
    image.set_header(ENQUEUER_SIZE_WORD, ENQUEUER_SIZE);

    let data = image.section_mut(data_base, 4 * n as usize);
    for (u, record) in graph.vertices().zip(data.chunks_exact_mut(4)) {
        let degree = check_field("vertex degree", graph.degree_of(u), 16)?;
        record[0] = degree << 16 | NO_COLOR;
        record[1] = 0;
        record[2] = degree << 16;
        record[3] = graph.offsets()[u as usize];
    }

    write_offsets(&mut image, offset_base, graph);

    for (slot, adj) in image
        .section_mut(neighbor_base, m as usize)
        .iter_mut()
        .zip(graph.neighbors())
    {
        *slot = adj.target;
    }

    image
        .section_mut(truth_base, n as usize)
        .copy_from_slice(colors);

    Ok(image)
}
