use super::*;

/// Builds the `sssp` image of `graph` whose distance array holds the reference distances
/// from `start`.
///
/// Sections: distance (`n` words, all ones), edge offsets (`n + 1`), neighbors (target, weight
/// per edge), ground truth (`n` distances). Header word 5 is the distance base and word 7 the
/// start vertex.
///
/// # Errors
/// Returns [`Error::FieldOverflow`] if the image exceeds 32-bit word offsets.
pub fn sssp_image(graph: &CsrGraph, start: Node) -> Result<MemoryImage> {
    let n = graph.number_of_nodes() as u64;
    let m = graph.number_of_edges() as u64;

    let mut layout = ImageLayout::new();
    let dist_base = layout.push("distance", n)?;
    let offset_base = layout.push("edge offset", n + 1)?;
    let neighbor_base = layout.push("neighbors", 2 * m)?;
    let truth_base = layout.push("ground truth", n)?;

    let mut image = layout.allocate(graph.number_of_nodes(), graph.number_of_edges());
    image.set_header(word::EDGE_OFFSET_BASE, offset_base);
    image.set_header(word::NEIGHBOR_BASE, neighbor_base);
    image.set_header(word::VERTEX_BASE, dist_base);
    image.set_header(word::GROUND_TRUTH_BASE, truth_base);
    image.set_header(word::START, start);

    image.section_mut(dist_base, n as usize).fill(UNREACHED);
    write_offsets(&mut image, offset_base, graph);

    let neighbors = image.section_mut(neighbor_base, 2 * m as usize);
    for (slot, adj) in neighbors.chunks_exact_mut(2).zip(graph.neighbors()) {
        slot[0] = adj.target;
        slot[1] = adj.weight;
    }

    image
        .section_mut(truth_base, n as usize)
        .copy_from_slice(graph.distances());

    Ok(image)
}
