/*!
# IO

Utilities for reading graphs from and writing graphs to different file formats.

## Input Formats

Currently supported input formats:
- **Dimacs** (`gr`): line-oriented weighted graph with problem, node-role and arc lines.
- **EdgeList** (`color`): `u v` pairs of 1-based ids, one per line, no weights.
- **LatLon** (`latlon`): binary format of geographic graphs with normalized edge distances.

The format is selected once by the caller via [`InputFormat`]; parsers never guess a format
from the file contents.

## Output Formats

For debugging, loaded graphs can be exported as **Dimacs** or **EdgeList** text. The binary
**LatLon** writer exists to produce fixtures for the reader.

## Traits

To generalize over reading/writing:
- [`GraphReader`] and [`GraphWriter`] are implemented by readers and writers for a specific format.
- [`GraphRead`] abstracts over reading using a configured [`InputFormat`].
*/

pub mod dimacs;
pub mod edge_list;
pub mod latlon;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{error::*, prelude::*};

pub use dimacs::*;
pub use edge_list::*;
pub use latlon::*;

/// Input format together with its reader configuration.
///
/// Used in [`GraphRead`] to determine the correct parser.
///
/// Currently supported:
/// - [`InputFormat::Dimacs`]
/// - [`InputFormat::EdgeList`]
/// - [`InputFormat::LatLon`]
#[derive(Debug, Clone, PartialEq)]
pub enum InputFormat {
    /// Weighted Dimacs-style text (`gr`)
    Dimacs(DimacsReader),
    /// Plain edge list (`color`)
    EdgeList(EdgeListReader),
    /// Binary latitude/longitude graph (`latlon`)
    LatLon(LatLonReader),
}

/// Opens `path` for buffered reading, remembering the path on failure
pub(crate) fn open_file(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Creates `path` for buffered writing, remembering the path on failure
pub(crate) fn create_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Trait for types that can read graphs in a specific format.
///
/// This trait provides both a low-level method to read from any
/// [`BufRead`] instance and a convenience wrapper to read directly
/// from files.
pub trait GraphReader {
    /// Reads a graph from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid representation
    /// of a graph in the expected format.
    fn try_read_graph<R>(&self, reader: R) -> Result<Graph>
    where
        R: BufRead;

    /// Reads a graph from a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns [`Error::Open`] if the file cannot be opened, or any error of
    /// [`GraphReader::try_read_graph`].
    fn try_read_graph_file<P>(&self, path: P) -> Result<Graph>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(open_file(path.as_ref())?)
    }
}

/// Trait for types that can write graphs in a specific format.
pub trait GraphWriter {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn try_write_graph<W>(&self, graph: &Graph, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_graph_file<P>(&self, graph: &Graph, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut writer = create_file(path.as_ref())?;
        self.try_write_graph(graph, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Trait for reading graphs with a configured [`InputFormat`].
pub trait GraphRead: Sized {
    /// Reads a graph from the given reader according to the specified [`InputFormat`].
    fn try_from_reader<R>(reader: R, format: &InputFormat) -> Result<Self>
    where
        R: BufRead;

    /// Reads a graph from the given file according to the specified [`InputFormat`].
    fn try_from_file<P>(path: P, format: &InputFormat) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::try_from_reader(open_file(path.as_ref())?, format)
    }
}

impl GraphRead for Graph {
    fn try_from_reader<R>(reader: R, format: &InputFormat) -> Result<Self>
    where
        R: BufRead,
    {
        match format {
            InputFormat::Dimacs(r) => r.try_read_graph(reader),
            InputFormat::EdgeList(r) => r.try_read_graph(reader),
            InputFormat::LatLon(r) => r.try_read_graph(reader),
        }
    }
}

/// Shorthand for returning `Err(..)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $err : expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

/// Tries to parse the next value in an iterator and returns early if it fails
macro_rules! parse_next_value {
    ($iterator : expr, $line : expr, $name : expr) => {{
        match $iterator.next() {
            None => {
                return Err(Error::parse(
                    $line,
                    format!("premature end of line when parsing {}", $name),
                ));
            }
            Some(token) => match token.parse() {
                Ok(value) => value,
                Err(_) => {
                    return Err(Error::parse(
                        $line,
                        format!("invalid value {token:?} for {}", $name),
                    ));
                }
            },
        }
    }};
}

use parse_next_value;
use raise_error_unless;

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn dispatch_by_format() {
        let data = "p sp 2 1\na 1 2 3\n";
        let graph =
            Graph::try_from_reader(Cursor::new(data), &InputFormat::Dimacs(DimacsReader::default()))
                .unwrap();
        assert_eq!(graph.number_of_edges(), 1);

        let data = "EdgeArray\n1 2\n";
        let format = InputFormat::EdgeList(EdgeListReader::new().number_of_nodes(2));
        let graph = Graph::try_from_reader(Cursor::new(data), &format).unwrap();
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn missing_file_is_open_error() {
        let format = InputFormat::Dimacs(DimacsReader::default());
        let err = Graph::try_from_file("/nonexistent/graph.gr", &format).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }
}
