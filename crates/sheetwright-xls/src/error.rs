//! XLS writer error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for XLS operations
pub type XlsResult<T> = std::result::Result<T, XlsError>;

/// Errors that can occur while assembling or writing an XLS file.
///
/// None of these are retried internally: a container is either laid out
/// completely and correctly or the partially written output must be discarded.
#[derive(Debug, Error)]
pub enum XlsError {
    /// The platform does not encode `f64` as an IEEE 754 double in either byte order
    #[error(
        "required floating point format not supported on this platform \
         (f64 is neither little- nor big-endian IEEE 754)"
    )]
    UnsupportedFloatFormat,

    /// The output file could not be opened
    #[error("can't open '{}': it may be in use or protected: {source}", .path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error while writing to an already-open sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload too large for a container with a single-level sector table
    #[error("maximum container payload size {max} exceeded: {size} bytes")]
    SizeExceeded { size: u64, max: u64 },

    /// Internal contract violation (lifecycle order, declared vs written size, ...)
    #[error("malformed record usage: {0}")]
    MalformedRecordUsage(String),

    /// Parse error while reading a record stream back
    #[error("Parse error: {0}")]
    Parse(String),
}

impl XlsError {
    pub(crate) fn misuse<S: Into<String>>(msg: S) -> Self {
        XlsError::MalformedRecordUsage(msg.into())
    }
}
