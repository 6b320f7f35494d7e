//! Error types for STL I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing STL files.
///
/// Every variant is fatal for a load: no partially decoded model is ever
/// returned. Malformed ASCII facets are not errors; they are skipped and
/// counted instead.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Binary header or triangle count could not be read in full.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual header size.
        got: usize,
    },

    /// The binary stream ended before the declared number of triangles.
    #[error("truncated binary STL: header declares {declared} triangles, only {decoded} present")]
    TruncatedBinary {
        /// Triangle count declared in the header.
        declared: u32,
        /// Number of complete triangle records decoded.
        decoded: u32,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Map an open/read error for `path`, turning `NotFound` into
    /// [`IoError::FileNotFound`].
    #[must_use]
    pub fn from_open(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path: path.into() }
        } else {
            Self::Io(err)
        }
    }
}
