//! # LatLon
//!
//! Binary little-endian format for geographic road networks:
//!
//! | field | type |
//! |---|---|
//! | magic ([`LATLON_MAGIC`]) | `u32` |
//! | number of vertices `n` | `u32` |
//! | per vertex: lat, lon | `f64`, `f64` |
//! | per vertex: out-degree `k` | `u32` |
//! | per vertex: targets | `k x u32` (0-based) |
//! | per vertex: distances | `k x f64` (normalized to the Earth radius) |
//!
//! Distances are scaled by [`EARTH_RADIUS_CM`] and truncated to whole centimetres.

use std::io::{BufRead, Read, Write};

use tracing::debug;

use super::*;

/// Magic number identifying a lat/lon file
pub const LATLON_MAGIC: u32 = 0x150842A7;

/// Earth radius in centimetres
pub const EARTH_RADIUS_CM: f64 = 637_100_000.0;

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f64<R: Read>(reader: &mut R) -> Result<f64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

/// A GraphReader for the LatLon-Format
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonReader {
    /// Factor turning normalized distances into weights
    scale: f64,
}

impl Default for LatLonReader {
    fn default() -> Self {
        Self {
            scale: EARTH_RADIUS_CM,
        }
    }
}

impl LatLonReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the factor applied to every normalized distance
    pub fn scale(mut self, scale: f64) -> LatLonReader {
        self.scale = scale;
        self
    }
}

impl GraphReader for LatLonReader {
    fn try_read_graph<R: BufRead>(&self, mut reader: R) -> Result<Graph> {
        let magic = read_u32(&mut reader)?;
        raise_error_unless!(
            magic == LATLON_MAGIC,
            Error::Magic {
                found: magic,
                expected: LATLON_MAGIC
            }
        );

        let n = read_u32(&mut reader)?;
        // a corrupt count must not trigger a huge up-front allocation
        let mut vertices = Vec::with_capacity(n.min(1 << 20) as usize);
        let mut targets = Vec::new();

        for u in 0..n {
            let lat = read_f64(&mut reader)?;
            let lon = read_f64(&mut reader)?;
            let k = read_u32(&mut reader)?;

            targets.clear();
            for _ in 0..k {
                let v = read_u32(&mut reader)?;
                raise_error_unless!(
                    v < n,
                    Error::parse(u as usize + 1, format!("edge target {v} outside of 0..{n}"))
                );
                targets.push(v);
            }

            let mut vertex = Vertex::new(Some(Coordinates::new(lat, lon)));
            for &v in &targets {
                let distance = read_f64(&mut reader)?;
                vertex.push(Adj::new(v, (distance * self.scale) as Weight));
            }
            vertices.push(vertex);
        }

        let graph = Graph::from_vertices(vertices);
        debug!(
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            "read lat/lon graph"
        );

        Ok(graph)
    }
}

/// A writer for the LatLon-Format.
///
/// Weights are written as the centre of their centimetre (`(w + 0.5) / scale`), so reading
/// the file back with the same scale yields the original weights.
/// Vertices without coordinates are written at `(0, 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonWriter {
    scale: f64,
}

impl Default for LatLonWriter {
    fn default() -> Self {
        Self {
            scale: EARTH_RADIUS_CM,
        }
    }
}

impl LatLonWriter {
    /// Creates a new (default) writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the factor every weight is divided by
    pub fn scale(mut self, scale: f64) -> LatLonWriter {
        self.scale = scale;
        self
    }
}

impl GraphWriter for LatLonWriter {
    fn try_write_graph<W: Write>(&self, graph: &Graph, mut writer: W) -> Result<()> {
        writer.write_all(&LATLON_MAGIC.to_le_bytes())?;
        writer.write_all(&graph.number_of_nodes().to_le_bytes())?;

        for u in graph.vertices() {
            let vertex = graph.vertex(u);
            let coordinates = vertex.coordinates.unwrap_or_default();
            writer.write_all(&coordinates.lat.to_le_bytes())?;
            writer.write_all(&coordinates.lon.to_le_bytes())?;
            writer.write_all(&vertex.degree().to_le_bytes())?;

            for adj in vertex.adjacency() {
                writer.write_all(&adj.target.to_le_bytes())?;
            }
            for adj in vertex.adjacency() {
                let distance = (adj.weight as f64 + 0.5) / self.scale;
                writer.write_all(&distance.to_le_bytes())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, ErrorKind};

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    /// Hand-encodes a lat/lon file
    fn encode(magic: u32, vertices: &[(f64, f64, Vec<(u32, f64)>)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&magic.to_le_bytes());
        bytes.extend_from_slice(&(vertices.len() as u32).to_le_bytes());
        for (lat, lon, edges) in vertices {
            bytes.extend_from_slice(&lat.to_le_bytes());
            bytes.extend_from_slice(&lon.to_le_bytes());
            bytes.extend_from_slice(&(edges.len() as u32).to_le_bytes());
            for (v, _) in edges {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
            for (_, d) in edges {
                bytes.extend_from_slice(&d.to_le_bytes());
            }
        }
        bytes
    }

    #[test]
    fn read_and_scale() {
        let bytes = encode(
            LATLON_MAGIC,
            &[
                (0.5, -1.25, vec![(1, 1.0 / 6_371_000.0), (1, 0.0)]),
                (0.75, 2.0, vec![]),
            ],
        );
        let graph = LatLonReader::new()
            .try_read_graph(Cursor::new(bytes))
            .unwrap();

        assert_eq!(graph.number_of_nodes(), 2);
        assert_eq!(
            graph.vertex(0).coordinates,
            Some(Coordinates::new(0.5, -1.25))
        );
        assert_eq!(graph.adjacency(0).len(), 2);
        assert_eq!(graph.adjacency(0)[0].target, 1);
        // 1/6371000 of the radius is one metre
        assert!((99..=100).contains(&graph.adjacency(0)[0].weight));
        assert_eq!(graph.adjacency(0)[1].weight, 0);
        assert_eq!(graph.degree_of(1), 0);
    }

    #[test]
    fn custom_scale() {
        let bytes = encode(LATLON_MAGIC, &[(0.0, 0.0, vec![(0, 2.75)])]);
        let graph = LatLonReader::new()
            .scale(10.0)
            .try_read_graph(Cursor::new(bytes))
            .unwrap();
        assert_eq!(graph.adjacency(0)[0].weight, 27);
    }

    #[test]
    fn wrong_magic() {
        let bytes = encode(0x12345678, &[]);
        let err = LatLonReader::new()
            .try_read_graph(Cursor::new(bytes))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Magic {
                found: 0x12345678,
                expected: LATLON_MAGIC
            }
        ));
    }

    #[test]
    fn truncated_file() {
        let mut bytes = encode(LATLON_MAGIC, &[(0.0, 0.0, vec![(0, 0.5)])]);
        bytes.truncate(bytes.len() - 3);
        let err = LatLonReader::new()
            .try_read_graph(Cursor::new(bytes))
            .unwrap_err();
        assert!(matches!(err, Error::Io(e) if e.kind() == ErrorKind::UnexpectedEof));
    }

    #[test]
    fn target_out_of_range() {
        let bytes = encode(LATLON_MAGIC, &[(0.0, 0.0, vec![(1, 0.5)])]);
        let err = LatLonReader::new()
            .try_read_graph(Cursor::new(bytes))
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn write_then_read() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let n = 30;

        let mut graph = Graph::new(n);
        for u in 0..n {
            graph.set_coordinates(u, Coordinates::new(rng.random(), rng.random()));
            for _ in 0..rng.random_range(0..5) {
                graph.push_edge(u, rng.random_range(0..n), rng.random_range(0..2_000_000));
            }
        }

        let mut buffer = Vec::new();
        LatLonWriter::new().try_write_graph(&graph, &mut buffer).unwrap();
        let read = LatLonReader::new()
            .try_read_graph(Cursor::new(buffer))
            .unwrap();

        assert_eq!(read, graph);
    }
}
