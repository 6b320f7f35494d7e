//! STL file I/O for volume analysis.
//!
//! This crate loads triangulated surface meshes from STL files in either
//! encoding and writes them back out:
//!
//! - **Format detection** - [`sniff_encoding`] / [`detect_encoding`] tell
//!   binary from ASCII, including binary files whose header starts with
//!   `solid`
//! - **Binary decoding** - [`BinaryTriangles`], a lazy record decoder that
//!   rejects truncated streams
//! - **ASCII decoding** - [`AsciiTriangles`], a lazy line decoder that skips
//!   malformed facets
//! - **Loading** - [`load_stl`] / [`read_stl`] build an [`StlModel`]
//! - **Writing** - [`save_stl`], [`write_stl_binary`], [`write_stl_ascii`]
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::load_stl;
//!
//! let model = load_stl("model.stl").unwrap();
//! println!(
//!     "Loaded {} triangles ({}, {} bytes)",
//!     model.triangle_count(),
//!     model.encoding,
//!     model.file_size
//! );
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod ascii;
mod binary;
mod error;
mod format;
mod write;

pub use ascii::AsciiTriangles;
pub use binary::BinaryTriangles;
pub use error::{IoError, IoResult};
pub use format::{StlEncoding, binary_file_size, detect_encoding, sniff_encoding};
pub use write::{save_stl, write_stl_ascii, write_stl_binary};

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use mesh_types::{Triangle, TriangleMesh};
use tracing::{debug, info, warn};

use crate::format::{COUNT_SIZE, HEADER_SIZE, TRIANGLE_SIZE};

/// A loaded STL file: its triangles plus source metadata.
///
/// Only ever produced whole. A fatal decode error aborts the load instead
/// of returning a partial model.
#[derive(Debug, Clone)]
pub struct StlModel {
    /// Triangles in file order with their bounding box.
    pub mesh: TriangleMesh,
    /// Encoding the file was decoded with.
    pub encoding: StlEncoding,
    /// Size of the source in bytes.
    pub file_size: u64,
    /// ASCII facets discarded as malformed. Always 0 for binary files.
    pub skipped_facets: usize,
}

impl StlModel {
    /// Number of triangles loaded.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Whether the source was binary STL.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        self.encoding.is_binary()
    }
}

/// Triangle decoder for either encoding, selected once before any triangle
/// is read.
#[derive(Debug)]
pub enum TriangleReader<R> {
    /// Binary record decoder.
    Binary(BinaryTriangles<R>),
    /// ASCII line decoder.
    Ascii(AsciiTriangles<R>),
}

impl<R: BufRead> TriangleReader<R> {
    /// Create the decoder for `encoding` over `reader`, positioned at the
    /// start of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if a binary header cannot be read.
    pub fn new(reader: R, encoding: StlEncoding) -> IoResult<Self> {
        Ok(match encoding {
            StlEncoding::Binary => Self::Binary(BinaryTriangles::new(reader)?),
            StlEncoding::Ascii => Self::Ascii(AsciiTriangles::new(reader)),
        })
    }

    /// Encoding handled by this decoder.
    #[must_use]
    pub const fn encoding(&self) -> StlEncoding {
        match self {
            Self::Binary(_) => StlEncoding::Binary,
            Self::Ascii(_) => StlEncoding::Ascii,
        }
    }

    /// ASCII facets skipped so far.
    #[must_use]
    pub const fn skipped_facets(&self) -> usize {
        match self {
            Self::Binary(_) => 0,
            Self::Ascii(reader) => reader.skipped_facets(),
        }
    }
}

impl<R: BufRead> Iterator for TriangleReader<R> {
    type Item = IoResult<Triangle>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Binary(reader) => reader.next(),
            Self::Ascii(reader) => reader.next(),
        }
    }
}

/// Load an STL file, detecting its encoding.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist ([`IoError::FileNotFound`]) or cannot be read
/// - A binary file's header is short or its declared triangle count
///   overruns the file ([`IoError::TruncatedBinary`])
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let model = load_stl("model.stl").unwrap();
/// println!("Loaded {} triangles", model.triangle_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<StlModel> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(e, path))?;
    debug!(path = %path.display(), "Opened STL file");
    read_stl(BufReader::new(file))
}

/// Read an STL model from a seekable source, detecting its encoding.
///
/// The source is read from its start regardless of its current position.
///
/// # Errors
///
/// Same as [`load_stl`], minus the file-open failures.
pub fn read_stl<R: BufRead + Seek>(mut reader: R) -> IoResult<StlModel> {
    let file_size = reader.seek(SeekFrom::End(0))?;
    reader.rewind()?;

    let mut prefix = Vec::with_capacity(HEADER_SIZE + COUNT_SIZE);
    reader
        .by_ref()
        .take((HEADER_SIZE + COUNT_SIZE) as u64)
        .read_to_end(&mut prefix)?;
    let encoding = detect_encoding(&prefix, file_size);
    reader.rewind()?;
    debug!(%encoding, file_size, "Detected STL encoding");

    let mut triangles = TriangleReader::new(reader, encoding)?;
    let mut mesh = TriangleMesh::with_capacity(capacity_hint(&triangles, file_size));
    for triangle in triangles.by_ref() {
        mesh.push(triangle?);
    }

    let skipped_facets = triangles.skipped_facets();
    if skipped_facets > 0 {
        warn!(skipped_facets, "Skipped malformed ASCII facets");
    }

    info!(
        triangles = mesh.triangle_count(),
        %encoding,
        file_size,
        "Loaded STL"
    );

    Ok(StlModel {
        mesh,
        encoding,
        file_size,
        skipped_facets,
    })
}

/// Triangles to pre-allocate for, bounded by what the file can hold so a
/// corrupt header cannot trigger a huge allocation.
fn capacity_hint<R: BufRead>(reader: &TriangleReader<R>, file_size: u64) -> usize {
    match reader {
        TriangleReader::Binary(binary) => {
            let fits = file_size.saturating_sub((HEADER_SIZE + COUNT_SIZE) as u64)
                / TRIANGLE_SIZE as u64;
            usize::try_from(fits.min(u64::from(binary.declared_count()))).unwrap_or(0)
        }
        TriangleReader::Ascii(_) => 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_types::{Point3, cube};
    use std::io::Cursor;

    fn binary_cube() -> Vec<u8> {
        let mut bytes = Vec::new();
        write_stl_binary(cube(10.0, Point3::origin()).triangles(), &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn read_binary_from_cursor() {
        let model = read_stl(Cursor::new(binary_cube())).unwrap();
        assert_eq!(model.triangle_count(), 12);
        assert!(model.is_binary());
        assert_eq!(model.file_size, binary_file_size(12));
        assert_eq!(model.skipped_facets, 0);
    }

    #[test]
    fn read_ascii_from_cursor() {
        let mut bytes = Vec::new();
        write_stl_ascii(cube(10.0, Point3::origin()).triangles(), &mut bytes).unwrap();
        let model = read_stl(Cursor::new(bytes)).unwrap();
        assert_eq!(model.triangle_count(), 12);
        assert_eq!(model.encoding, StlEncoding::Ascii);
    }

    #[test]
    fn read_ignores_initial_position() {
        let mut cursor = Cursor::new(binary_cube());
        cursor.set_position(50);
        let model = read_stl(cursor).unwrap();
        assert_eq!(model.triangle_count(), 12);
    }

    #[test]
    fn truncated_binary_fails_whole_load() {
        let mut bytes = binary_cube();
        bytes.truncate(bytes.len() - 1);
        let err = read_stl(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            IoError::TruncatedBinary {
                declared: 12,
                decoded: 11
            }
        ));
    }

    #[test]
    fn capacity_hint_is_bounded_by_file_size() {
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        let len = bytes.len() as u64;
        let reader = TriangleReader::new(Cursor::new(bytes), StlEncoding::Binary).unwrap();
        assert_eq!(capacity_hint(&reader, len), 0);
    }

    #[test]
    fn reader_reports_encoding() {
        let reader = TriangleReader::new(Cursor::new(Vec::<u8>::new()), StlEncoding::Ascii).unwrap();
        assert_eq!(reader.encoding(), StlEncoding::Ascii);
        assert_eq!(reader.skipped_facets(), 0);
    }
}
