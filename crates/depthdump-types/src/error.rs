//! Error types for depthdump.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for depthdump operations.
pub type Result<T> = std::result::Result<T, DepthError>;

/// Errors that can occur while downloading and materializing daily files.
#[derive(Error, Debug)]
pub enum DepthError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The remote side answered with a non-200 status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, echoed for diagnostics.
        body: String,
    },

    /// The API response did not have the expected shape.
    #[error("Malformed response: {0}")]
    Response(String),

    /// Gzip decompression failed.
    #[error("Decompression error: {0}")]
    Decompress(String),

    /// CSV rewriting failed.
    #[error("Format error: {0}")]
    Format(String),

    /// Invalid day range.
    #[error(transparent)]
    DayRange(#[from] DayRangeError),

    /// The destination exists but is not a directory.
    #[error("Destination is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DepthError {
    /// Returns true if this error came from a non-200 response.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

/// Error for invalid day ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DayRangeError {
    /// Start timestamp is after end timestamp.
    #[error("Invalid day range: {start} > {end}")]
    InvalidRange {
        /// The start timestamp.
        start: i64,
        /// The end timestamp.
        end: i64,
    },

    /// Timestamps before the UNIX epoch are not supported.
    #[error("Negative timestamp: {0}")]
    Negative(i64),

    /// Timestamp cannot be turned into a calendar date.
    #[error("Timestamp out of calendar range: {0}")]
    Unrepresentable(i64),
}
