//! STL encoding detection.
//!
//! ASCII files start with `solid`, but so do the headers written by some
//! binary exporters. A prefix check alone would misread those files, so a
//! `solid` prefix is confirmed against the file size implied by the binary
//! triangle count before the file is treated as text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub(crate) const HEADER_SIZE: usize = 80;

/// Size of the little-endian triangle count that follows the header.
pub(crate) const COUNT_SIZE: usize = 4;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub(crate) const TRIANGLE_SIZE: usize = 50;

/// Keyword that opens an ASCII STL file.
const ASCII_KEYWORD: &[u8] = b"solid";

/// How an STL file is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlEncoding {
    /// Fixed-layout little-endian binary records.
    Binary,
    /// Line-oriented text grammar.
    Ascii,
}

impl StlEncoding {
    /// Whether this is the binary encoding.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Binary)
    }

    /// Human-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Ascii => "ascii",
        }
    }
}

impl std::fmt::Display for StlEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected size of a binary STL file holding `count` triangles.
#[must_use]
pub fn binary_file_size(count: u32) -> u64 {
    (HEADER_SIZE + COUNT_SIZE) as u64 + TRIANGLE_SIZE as u64 * u64::from(count)
}

/// Classify a file from its first bytes and its total length.
///
/// `prefix` should hold the first 84 bytes of the file (fewer if the file
/// is shorter).
///
/// # Example
///
/// ```
/// use mesh_io::{StlEncoding, detect_encoding};
///
/// assert_eq!(detect_encoding(b"solid cube\n facet", 400), StlEncoding::Ascii);
/// assert_eq!(detect_encoding(&[0u8; 84], 84), StlEncoding::Binary);
/// ```
#[must_use]
pub fn detect_encoding(prefix: &[u8], file_len: u64) -> StlEncoding {
    let header = &prefix[..prefix.len().min(HEADER_SIZE)];
    if !header.trim_ascii_start().starts_with(ASCII_KEYWORD) {
        return StlEncoding::Binary;
    }

    let Some(count_bytes) = prefix.get(HEADER_SIZE..HEADER_SIZE + COUNT_SIZE) else {
        return StlEncoding::Ascii;
    };
    let count = u32::from_le_bytes([count_bytes[0], count_bytes[1], count_bytes[2], count_bytes[3]]);

    if binary_file_size(count) == file_len {
        StlEncoding::Binary
    } else {
        StlEncoding::Ascii
    }
}

/// Open `path` and determine its STL encoding.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist and
/// [`IoError::Io`] if it cannot be read.
pub fn sniff_encoding<P: AsRef<Path>>(path: P) -> IoResult<StlEncoding> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(e, path))?;
    let file_len = file.metadata()?.len();

    let mut prefix = Vec::with_capacity(HEADER_SIZE + COUNT_SIZE);
    file.take((HEADER_SIZE + COUNT_SIZE) as u64)
        .read_to_end(&mut prefix)?;

    Ok(detect_encoding(&prefix, file_len))
}
