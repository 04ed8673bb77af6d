//! # Dimacs
//!
//! Weighted graphs in the DIMACS shortest-path / max-flow text format:
//!
//! ```text
//! c comment
//! p sp 3 2
//! n 1 s
//! n 3 t
//! a 1 2 7
//! a 2 3 4
//! ```
//!
//! Every line is classified once by its leading token into a [`GrLine`]. Ids are 1-based in
//! the file and 0-based in the resulting [`Graph`].

use std::io::{BufRead, Write};

use tracing::debug;

use super::*;

/// Role assigned to a vertex by an `n` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Source,
    Sink,
    /// Any other role letter; carried along but ignored
    Other,
}

/// A single classified line of a Dimacs file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrLine {
    Comment,
    Empty,
    /// `p <kind> <n> <m>`
    Problem { nodes: NumNodes, edges: NumEdges },
    /// `n <id> <role>` with a 1-based id
    NodeRole { node: Node, role: NodeRole },
    /// `a <u> <v> <w>` with 1-based ids
    Arc { from: Node, to: Node, weight: Weight },
    /// Any other leading token
    Unknown,
}

impl GrLine {
    /// Classifies `line` (the `line_no`-th line of the input)
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let mut parts = line.split_whitespace();

        let kind = match parts.next() {
            None => return Ok(GrLine::Empty),
            Some(kind) => kind,
        };

        Ok(match kind {
            "c" => GrLine::Comment,
            "p" => {
                raise_error_unless!(
                    parts.next().is_some(),
                    Error::parse(line_no, "premature end of line when parsing problem kind")
                );
                let nodes = parse_next_value!(parts, line_no, "number of nodes");
                let edges = parse_next_value!(parts, line_no, "number of edges");
                GrLine::Problem { nodes, edges }
            }
            "n" => {
                let node = parse_next_value!(parts, line_no, "node id");
                let role = match parts.next() {
                    Some("s") => NodeRole::Source,
                    Some("t") => NodeRole::Sink,
                    Some(_) => NodeRole::Other,
                    None => {
                        return Err(Error::parse(
                            line_no,
                            "premature end of line when parsing node role",
                        ));
                    }
                };
                GrLine::NodeRole { node, role }
            }
            "a" => {
                let from = parse_next_value!(parts, line_no, "source node");
                let to = parse_next_value!(parts, line_no, "target node");
                let weight = parse_next_value!(parts, line_no, "arc weight");
                GrLine::Arc { from, to, weight }
            }
            _ if kind.starts_with('c') => GrLine::Comment,
            _ => GrLine::Unknown,
        })
    }
}

/// A GraphReader for the Dimacs-Format
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimacsReader {
    /// Insert arcs through [`Graph::add_residual_edge`] instead of [`Graph::push_edge`]
    residual: bool,
}

impl DimacsReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair every arc with a reverse residual edge (flow networks)
    pub fn residual(mut self, residual: bool) -> DimacsReader {
        self.residual = residual;
        self
    }
}

/// Converts the 1-based `id` into a vertex of `graph` or reports `line_no`
fn checked_node(graph: &Graph, id: Node, line_no: usize) -> Result<Node> {
    raise_error_unless!(
        (1..=graph.number_of_nodes()).contains(&id),
        Error::parse(
            line_no,
            format!("node id {id} outside of 1..={}", graph.number_of_nodes())
        )
    );
    Ok(id - 1)
}

impl GraphReader for DimacsReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<Graph> {
        let mut graph: Option<Graph> = None;
        let mut declared_edges = 0;
        let mut ignored = 0usize;
        let mut line_no = 0;

        // lines are split on raw bytes so that non UTF-8 comments stay ignorable
        for line in reader.split(b'\n') {
            let line = line?;
            line_no += 1;

            match GrLine::parse(&String::from_utf8_lossy(&line), line_no)? {
                GrLine::Comment | GrLine::Empty => {}
                GrLine::Unknown => ignored += 1,
                GrLine::Problem { nodes, edges } => {
                    raise_error_unless!(
                        graph.is_none(),
                        Error::parse(line_no, "duplicate problem line")
                    );
                    graph = Some(Graph::new(nodes));
                    declared_edges = edges;
                }
                GrLine::NodeRole { node, role } => {
                    let Some(graph) = graph.as_mut() else {
                        return Err(Error::parse(line_no, "node line before problem line"));
                    };
                    let node = checked_node(graph, node, line_no)?;
                    match role {
                        NodeRole::Source => graph.set_source(node),
                        NodeRole::Sink => graph.set_sink(node),
                        NodeRole::Other => ignored += 1,
                    }
                }
                GrLine::Arc { from, to, weight } => {
                    let Some(graph) = graph.as_mut() else {
                        return Err(Error::parse(line_no, "arc before problem line"));
                    };
                    let from = checked_node(graph, from, line_no)?;
                    let to = checked_node(graph, to, line_no)?;
                    if self.residual {
                        graph.add_residual_edge(from, to, weight);
                    } else {
                        graph.push_edge(from, to, weight);
                    }
                }
            }
        }

        let graph = graph.ok_or_else(|| Error::parse(line_no, "missing problem line"))?;

        debug!(
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            declared_edges,
            ignored,
            "read dimacs graph"
        );

        Ok(graph)
    }
}

/// A writer for the Dimacs-Format (`p sp` header, one `a` line per edge)
#[derive(Debug, Clone, Default)]
pub struct DimacsWriter;

impl DimacsWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self
    }
}

impl GraphWriter for DimacsWriter {
    fn try_write_graph<W: Write>(&self, graph: &Graph, mut writer: W) -> Result<()> {
        writeln!(
            writer,
            "p sp {} {}",
            graph.number_of_nodes(),
            graph.number_of_edges()
        )?;

        for u in graph.vertices() {
            for adj in graph.adjacency(u) {
                writeln!(writer, "a {} {} {}", u + 1, adj.target + 1, adj.weight)?;
            }
        }

        Ok(())
    }
}
