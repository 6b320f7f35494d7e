//! Binary STL decoding.
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (not trusted, discarded)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (discarded)
//! end
//! ```

use std::io::{ErrorKind, Read};

use mesh_types::{Point3, Triangle};

use crate::error::{IoError, IoResult};
use crate::format::{COUNT_SIZE, HEADER_SIZE, TRIANGLE_SIZE};

/// Lazy decoder over the triangle records of a binary STL stream.
///
/// Yields exactly the number of triangles declared in the header. A record
/// that cannot be read in full yields [`IoError::TruncatedBinary`] and the
/// iterator stops; a truncated stream is never silently shortened.
///
/// # Example
///
/// ```
/// use mesh_io::BinaryTriangles;
///
/// let mut bytes = vec![0u8; 80];
/// bytes.extend_from_slice(&1u32.to_le_bytes());
/// bytes.extend_from_slice(&[0u8; 12]); // normal
/// for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
///     for c in v {
///         bytes.extend_from_slice(&c.to_le_bytes());
///     }
/// }
/// bytes.extend_from_slice(&0u16.to_le_bytes());
///
/// let reader = BinaryTriangles::new(&bytes[..]).unwrap();
/// assert_eq!(reader.declared_count(), 1);
/// let triangles: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
/// assert_eq!(triangles[0].v1.x, 1.0);
/// ```
#[derive(Debug)]
pub struct BinaryTriangles<R> {
    reader: R,
    declared: u32,
    decoded: u32,
    failed: bool,
}

impl<R: Read> BinaryTriangles<R> {
    /// Read the header and triangle count from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidHeader`] if fewer than 84 bytes are
    /// available, or [`IoError::Io`] on a read failure.
    pub fn new(mut reader: R) -> IoResult<Self> {
        let mut header = [0u8; HEADER_SIZE + COUNT_SIZE];
        let got = read_full(&mut reader, &mut header)?;
        if got < header.len() {
            return Err(IoError::InvalidHeader {
                expected: header.len(),
                got,
            });
        }

        let declared = u32::from_le_bytes([
            header[HEADER_SIZE],
            header[HEADER_SIZE + 1],
            header[HEADER_SIZE + 2],
            header[HEADER_SIZE + 3],
        ]);

        Ok(Self {
            reader,
            declared,
            decoded: 0,
            failed: false,
        })
    }

    /// Triangle count stored in the header.
    #[must_use]
    pub const fn declared_count(&self) -> u32 {
        self.declared
    }

    fn read_record(&mut self) -> IoResult<Triangle> {
        let mut record = [0u8; TRIANGLE_SIZE];
        match self.reader.read_exact(&mut record) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(IoError::TruncatedBinary {
                    declared: self.declared,
                    decoded: self.decoded,
                });
            }
            Err(e) => return Err(IoError::Io(e)),
        }

        // Skip normal (12 bytes), read 3 vertices (36 bytes total)
        Ok(Triangle::new(
            read_vertex(&record[12..24]),
            read_vertex(&record[24..36]),
            read_vertex(&record[36..48]),
        ))
    }
}

impl<R: Read> Iterator for BinaryTriangles<R> {
    type Item = IoResult<Triangle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.decoded >= self.declared {
            return None;
        }

        let result = self.read_record();
        match result {
            Ok(_) => self.decoded += 1,
            Err(_) => self.failed = true,
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = (self.declared - self.decoded) as usize;
        (0, Some(remaining))
    }
}

/// Read a vertex from 12 bytes (3 little-endian f32s).
fn read_vertex(buf: &[u8]) -> Point3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Fill `buf` as far as the stream allows, returning the number of bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> IoResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(IoError::Io(e)),
        }
    }
    Ok(filled)
}
