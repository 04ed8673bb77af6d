//! # EdgeList
//!
//! The EdgeList-Format consists of an optional header line (e.g. `EdgeArray`) followed by
//! lines `u v` representing a (directed) edge `Edge(u - 1, v - 1)`. The format does not
//! declare a vertex count, so the reader preallocates a configurable number of vertices.
//!
//! Lines that cannot be used (unparseable, id `0`, id above the vertex count) are skipped
//! and only counted.

use std::io::{BufRead, Split, Write};

use tracing::debug;

use super::*;

/// Vertex count of the com-youtube dataset, the default input of the coloring app
pub const DEFAULT_EDGE_LIST_NODES: NumNodes = 1_157_828;

/// Header line written by [`EdgeListWriter`]
pub const EDGE_LIST_HEADER: &str = "EdgeArray";

/// A GraphReader for the EdgeList-Format
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeListReader {
    /// Number of vertices allocated before reading
    number_of_nodes: NumNodes,
    /// Lines starting with `header_marker` are skipped when reading
    header_marker: char,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            number_of_nodes: DEFAULT_EDGE_LIST_NODES,
            header_marker: 'E',
        }
    }
}

impl EdgeListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the number of preallocated vertices
    pub fn number_of_nodes(mut self, n: NumNodes) -> EdgeListReader {
        self.number_of_nodes = n;
        self
    }

    /// Updates the header marker
    pub fn header_marker(mut self, c: char) -> EdgeListReader {
        self.header_marker = c;
        self
    }
}

impl GraphReader for EdgeListReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<Graph> {
        let mut graph = Graph::new(self.number_of_nodes);
        let mut edges = EdgeListEdgesReader::new(reader, self.number_of_nodes, self.header_marker);

        for edge in edges.by_ref() {
            let Edge(u, v) = edge?;
            graph.push_edge(u, v, 0);
        }

        debug!(
            accepted = graph.number_of_edges(),
            skipped = edges.skipped_lines(),
            "read edge list"
        );

        Ok(graph)
    }
}

/// Real EdgeListReader that consumes the reader and yields 0-based edges
pub struct EdgeListEdgesReader<R> {
    /// Raw lines in the reader; they are decoded one at a time
    lines: Split<R>,
    /// Largest accepted (1-based) id
    number_of_nodes: NumNodes,
    /// Header lines start with this character
    header_marker: char,
    /// Number of non-empty, non-header lines that were dropped
    skipped: usize,
}

impl<R: BufRead> EdgeListEdgesReader<R> {
    /// Creates a new EdgeListEdgesReader accepting ids `1..=number_of_nodes`
    pub fn new(reader: R, number_of_nodes: NumNodes, header_marker: char) -> Self {
        Self {
            lines: reader.split(b'\n'),
            number_of_nodes,
            header_marker,
            skipped: 0,
        }
    }

    /// Returns the number of lines skipped so far
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    /// Parses a line into a 1-based pair, `None` if the line is unusable
    fn parse_edge_line(&self, line: &str) -> Option<Edge> {
        let mut parts = line.split_whitespace();
        let from: NumNodes = parts.next()?.parse().ok()?;
        let dest: NumNodes = parts.next()?.parse().ok()?;

        let range = 1..=self.number_of_nodes;
        (range.contains(&from) && range.contains(&dest)).then_some(Edge(from - 1, dest - 1))
    }
}

impl<R: BufRead> Iterator for EdgeListEdgesReader<R> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };

            let line = String::from_utf8_lossy(&line);
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(self.header_marker) {
                continue;
            }

            match self.parse_edge_line(trimmed) {
                Some(edge) => return Some(Ok(edge)),
                None => self.skipped += 1,
            }
        }
    }
}

/// A writer for the EdgeList-Format
#[derive(Debug, Clone, Default)]
pub struct EdgeListWriter;

impl EdgeListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self
    }
}

impl GraphWriter for EdgeListWriter {
    fn try_write_graph<W: Write>(&self, graph: &Graph, mut writer: W) -> Result<()> {
        writeln!(writer, "{EDGE_LIST_HEADER}")?;

        for Edge(u, v) in graph.edges() {
            writeln!(writer, "{} {}", u + 1, v + 1)?;
        }

        Ok(())
    }
}
