//! Internal error types for the repair engines.
//!
//! The public API never surfaces these: the dispatcher in the crate root is
//! the single totality boundary, converting every internal failure into
//! "return the input unchanged". Engines use them only to abort a scan via
//! `?` when they cannot place a closing delimiter with any confidence.

use thiserror::Error;

/// Represents all failures a repair engine can hit while scanning.
///
/// Each variant carries enough context for a debug message, but none of them
/// escapes [`preprocess_with_details`](crate::preprocess_with_details).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A string value opened with a quote that never closes anywhere in the
    /// remaining input.
    #[error("unterminated string starting at line {line}")]
    UnterminatedString { line: usize },

    /// A format label that is not `yaml`, `json`, or `csv`.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// Generic message for unexpected scan states.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates an unterminated-string error at the given 1-based line.
    pub fn unterminated(line: usize) -> Self {
        Error::UnterminatedString { line }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
