//! # Errors
//!
//! Every fallible operation of the crate returns [`Result`]. Stages never terminate the
//! process themselves; the binary maps any [`Error`] to a non-zero exit status.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while loading, generating, solving or serializing a graph.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("wrong input file format (magic number {found:#x}, expected {expected:#x})")]
    Magic { found: u32, expected: u32 },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("vertex {vertex} needs a color beyond the {capacity} representable colors")]
    ColorOverflow { vertex: u32, capacity: u32 },

    #[error("distance to vertex {vertex} does not fit into a 32-bit word")]
    DistanceOverflow { vertex: u32 },

    #[error("{field} value {value} does not fit into its packed image field")]
    FieldOverflow { field: &'static str, value: u64 },
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an [`Error::Parse`] for the (1-based) line `line`
    pub fn parse<S: Into<String>>(line: usize, reason: S) -> Self {
        Error::Parse {
            line,
            reason: reason.into(),
        }
    }
}
