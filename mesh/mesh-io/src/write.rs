//! STL encoding.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::{Triangle, TriangleMesh, Vector3};

use crate::error::{IoError, IoResult};
use crate::format::{HEADER_SIZE, StlEncoding};

/// Text written at the start of the binary header.
///
/// Deliberately does not begin with `solid`.
const BINARY_HEADER_TEXT: &[u8] = b"Binary STL generated by mesh-io";

/// Save a mesh to an STL file.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `encoding` - Binary or ASCII output
///
/// # Errors
///
/// Returns an error if the file cannot be written, or if a binary file
/// would hold more than `u32::MAX` triangles.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{StlEncoding, save_stl};
/// use mesh_types::{Point3, cube};
///
/// save_stl(&cube(10.0, Point3::origin()), "cube.stl", StlEncoding::Binary).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(
    mesh: &TriangleMesh,
    path: P,
    encoding: StlEncoding,
) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match encoding {
        StlEncoding::Binary => write_stl_binary(mesh.triangles(), &mut writer)?,
        StlEncoding::Ascii => write_stl_ascii(mesh.triangles(), &mut writer)?,
    }

    writer.flush()?;
    Ok(())
}

/// Encode triangles as binary STL.
///
/// Normals are recomputed from the winding order; degenerate triangles get
/// a zero normal. The attribute byte count is always zero.
///
/// # Errors
///
/// Returns an error if writing fails or there are more than `u32::MAX`
/// triangles.
pub fn write_stl_binary<W: Write>(triangles: &[Triangle], mut writer: W) -> IoResult<()> {
    // Write 80-byte header (padded with spaces)
    let mut header = [b' '; HEADER_SIZE];
    header[..BINARY_HEADER_TEXT.len()].copy_from_slice(BINARY_HEADER_TEXT);
    writer.write_all(&header)?;

    let count = u32::try_from(triangles.len()).map_err(|_| {
        IoError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "binary STL holds at most u32::MAX triangles",
        ))
    })?;
    writer.write_all(&count.to_le_bytes())?;

    for triangle in triangles {
        let normal = triangle.normal().unwrap_or_else(Vector3::zeros);
        write_f32_triple(&mut writer, normal.x, normal.y, normal.z)?;
        for v in &triangle.vertices() {
            write_f32_triple(&mut writer, v.x, v.y, v.z)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Write three values as little-endian f32s.
fn write_f32_triple<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional for STL format
    {
        writer.write_all(&(x as f32).to_le_bytes())?;
        writer.write_all(&(y as f32).to_le_bytes())?;
        writer.write_all(&(z as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Encode triangles as ASCII STL.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_stl_ascii<W: Write>(triangles: &[Triangle], mut writer: W) -> IoResult<()> {
    writeln!(writer, "solid mesh")?;

    for triangle in triangles {
        let n = triangle.normal().unwrap_or_else(Vector3::zeros);
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in &triangle.vertices() {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid mesh")?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::format::{binary_file_size, detect_encoding};
    use crate::{AsciiTriangles, BinaryTriangles};
    use approx::assert_relative_eq;
    use mesh_types::{Point3, cube};

    #[test]
    fn binary_layout() {
        let mesh = cube(10.0, Point3::origin());
        let mut bytes = Vec::new();
        write_stl_binary(mesh.triangles(), &mut bytes).unwrap();

        assert_eq!(bytes.len() as u64, binary_file_size(12));
        assert_eq!(&bytes[80..84], &12u32.to_le_bytes());
        assert_eq!(detect_encoding(&bytes[..84], bytes.len() as u64), StlEncoding::Binary);
    }

    #[test]
    fn ascii_output_decodes() {
        let mesh = cube(2.5, Point3::new(-1.0, 3.0, 7.0));
        let mut bytes = Vec::new();
        write_stl_ascii(mesh.triangles(), &mut bytes).unwrap();

        assert!(bytes.starts_with(b"solid mesh"));
        let decoded: Vec<_> = AsciiTriangles::new(&bytes[..])
            .collect::<IoResult<_>>()
            .unwrap();
        assert_eq!(decoded.len(), 12);
        for (a, b) in decoded.iter().zip(mesh.triangles()) {
            assert_relative_eq!(a.v0, b.v0, epsilon = 1e-5);
            assert_relative_eq!(a.v2, b.v2, epsilon = 1e-5);
        }
    }

    #[test]
    fn binary_output_decodes() {
        let mesh = cube(3.0, Point3::new(1.0, 2.0, 3.0));
        let mut bytes = Vec::new();
        write_stl_binary(mesh.triangles(), &mut bytes).unwrap();

        let decoded: Vec<_> = BinaryTriangles::new(&bytes[..])
            .unwrap()
            .collect::<IoResult<_>>()
            .unwrap();
        assert_eq!(decoded, mesh.triangles());
    }

    #[test]
    fn degenerate_triangle_gets_zero_normal() {
        let tri = Triangle::from_arrays([0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let mut bytes = Vec::new();
        write_stl_binary(&[tri], &mut bytes).unwrap();
        assert!(bytes[84..96].iter().all(|&b| b == 0));
    }
}
