use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{PatternVertexId, VertexId};

/// Errors raised while building inputs or running a vertex program.
///
/// Construction errors (`InvalidPattern`, `InvalidGraph`) are reported before
/// any iteration runs. `Invariant` signals misuse of the candidate table from
/// inside an update and aborts the whole run; there is no per-vertex retry.
#[derive(Debug, Error)]
pub enum SimError {
    /// Pattern input references an out-of-range vertex or is otherwise malformed.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    /// Data graph input is malformed.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
    /// A candidate-table operation was invoked in a state that forbids it.
    #[error("invariant violated at vertex {vertex}: {reason}")]
    Invariant {
        /// Data vertex the operation targeted.
        vertex: VertexId,
        /// What was violated.
        reason: &'static str,
    },
    /// A pattern vertex id outside `[0, n)` reached the candidate table.
    #[error("pattern vertex {pattern} out of range (pattern has {size} vertices)")]
    PatternOutOfRange {
        /// Offending pattern vertex.
        pattern: PatternVertexId,
        /// Number of pattern vertices.
        size: usize,
    },
    /// A record in an input file could not be parsed.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        /// File being read.
        path: PathBuf,
        /// 1-based line (record) number.
        line: u64,
        /// What was wrong with the record.
        reason: String,
    },
    /// Configuration file could not be decoded.
    #[error("config {}: {reason}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },
    /// A command-line or logging argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// CSV reader failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    pub(crate) fn invariant(vertex: VertexId, reason: &'static str) -> Self {
        SimError::Invariant { vertex, reason }
    }

    pub(crate) fn parse(path: impl AsRef<Path>, line: u64, reason: impl Into<String>) -> Self {
        SimError::Parse {
            path: path.as_ref().to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}
