/// Error types for every stage of a run
///
/// Extraction and reporting recover from most of these locally (log and skip);
/// only `RunError` reaches the process boundary.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A list or detail request that did not produce a usable body
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("GET {url} returned a body that could not be decoded: {message}")]
    Decode { url: String, message: String },
}

/// A listing URL whose identifier segment is missing or not an integer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no identifier segment in '{url}'")]
    MissingSegment { url: String },

    #[error("identifier segment '{segment}' in '{url}' is not an integer")]
    InvalidId { url: String, segment: String },
}

/// Failure of the id -> detail -> row chain for one listing entry
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("detail record {id} has no usable '{field}'")]
    Normalize { id: i64, field: &'static str },
}

/// Failure to write or inspect one artifact in the output directory
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("chart {}: {message}", path.display())]
    Chart { path: PathBuf, message: String },
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReportError::Io { path: path.into(), source }
    }
}

/// Errors that abort a whole run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to fetch the listing: {0}")]
    Listing(#[source] FetchError),

    #[error("failed to reset the output directory: {0}")]
    Reset(#[source] ReportError),
}
