//! Error types for corpus operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, sampling, or exporting corpus data.
///
/// Every variant stems from a static input defect; none is transient, so
/// nothing here is retried.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Input file does not exist
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),

    /// A line in the input is not a valid record
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the input file
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// A negative sample size was requested
    #[error("Invalid sample size: {0} (must be non-negative)")]
    InvalidSampleSize(i64),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error outside of line-delimited records
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
