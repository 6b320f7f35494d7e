//! End-to-end loading tests against STL files written to disk.
//!
//! Covers encoding detection on real files, both decoders, and the failure
//! modes that must abort a load.
//!
//! To run: cargo test -p mesh-io --test stl_loading

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::io::Write;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use mesh_io::{
    IoError, StlEncoding, binary_file_size, load_stl, save_stl, sniff_encoding, write_stl_binary,
};
use mesh_types::{Point3, cube};
use tempfile::{TempDir, tempdir};

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture");
    file.write_all(bytes).expect("write fixture");
    path
}

fn file_len(path: &Path) -> u64 {
    std::fs::metadata(path).expect("metadata").len()
}

const MALFORMED_ASCII: &str = "solid broken
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 10 0 0
      vertex 0 10 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 10 0 0
    endloop
  endfacet
  facet normal 0 0 -1
    outer loop
      vertex 0 0 5
      vertex 0 10 5
      vertex 10 0 5
    endloop
  endfacet
endsolid broken
";

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn test_binary_roundtrip() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("cube.stl");
    let mesh = cube(20.0, Point3::new(5.0, -5.0, 0.0));

    save_stl(&mesh, &path, StlEncoding::Binary).expect("save");
    assert_eq!(file_len(&path), binary_file_size(12));
    assert_eq!(sniff_encoding(&path).unwrap(), StlEncoding::Binary);

    let model = load_stl(&path).expect("load");
    assert_eq!(model.encoding, StlEncoding::Binary);
    assert_eq!(model.file_size, binary_file_size(12));
    assert_eq!(model.mesh.triangles(), mesh.triangles());
    assert_eq!(model.mesh.bounds(), mesh.bounds());
}

#[test]
fn test_ascii_roundtrip() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("cube_ascii.stl");
    let mesh = cube(12.5, Point3::new(-3.0, 4.0, 1.5));

    save_stl(&mesh, &path, StlEncoding::Ascii).expect("save");
    assert_eq!(sniff_encoding(&path).unwrap(), StlEncoding::Ascii);

    let model = load_stl(&path).expect("load");
    assert_eq!(model.encoding, StlEncoding::Ascii);
    assert_eq!(model.triangle_count(), 12);
    assert_eq!(model.skipped_facets, 0);
    assert_eq!(model.file_size, file_len(&path));

    let size = model.mesh.bounds().size();
    assert_relative_eq!(size.x, 12.5, epsilon = 1e-5);
    assert_relative_eq!(size.y, 12.5, epsilon = 1e-5);
    assert_relative_eq!(size.z, 12.5, epsilon = 1e-5);
}

// =============================================================================
// Encoding Detection
// =============================================================================

#[test]
fn test_binary_with_solid_header_is_decoded_as_binary() {
    let mut bytes = Vec::new();
    write_stl_binary(cube(10.0, Point3::origin()).triangles(), &mut bytes).unwrap();
    let banner = b"solid model exported by a binary writer";
    bytes[..banner.len()].copy_from_slice(banner);

    let dir = tempdir().expect("failed to create temp dir");
    let path = write_file(&dir, "solid_header.stl", &bytes);

    assert_eq!(sniff_encoding(&path).unwrap(), StlEncoding::Binary);
    let model = load_stl(&path).expect("load");
    assert!(model.is_binary());
    assert_eq!(model.triangle_count(), 12);
}

#[test]
fn test_ascii_with_leading_whitespace() {
    let dir = tempdir().expect("failed to create temp dir");
    let text = format!("\n   {MALFORMED_ASCII}");
    let path = write_file(&dir, "indented.stl", text.as_bytes());

    assert_eq!(sniff_encoding(&path).unwrap(), StlEncoding::Ascii);
}

// =============================================================================
// Malformed Input
// =============================================================================

#[test]
fn test_ascii_missing_vertex_skips_one_facet() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = write_file(&dir, "broken.stl", MALFORMED_ASCII.as_bytes());

    let model = load_stl(&path).expect("malformed facets are not fatal");
    assert_eq!(model.triangle_count(), 2);
    assert_eq!(model.skipped_facets, 1);
    assert_eq!(model.mesh.triangles()[1].v0.z, 5.0);
}

#[test]
fn test_truncated_binary_is_fatal() {
    let mut bytes = Vec::new();
    write_stl_binary(cube(10.0, Point3::origin()).triangles(), &mut bytes).unwrap();
    // Declare one more triangle than is present, keeping a non-solid header
    bytes[80..84].copy_from_slice(&13u32.to_le_bytes());

    let dir = tempdir().expect("failed to create temp dir");
    let path = write_file(&dir, "truncated.stl", &bytes);

    let err = load_stl(&path).unwrap_err();
    assert!(
        matches!(
            err,
            IoError::TruncatedBinary {
                declared: 13,
                decoded: 12
            }
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn test_zero_triangle_binary() {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&0u32.to_le_bytes());

    let dir = tempdir().expect("failed to create temp dir");
    let path = write_file(&dir, "empty.stl", &bytes);

    let model = load_stl(&path).expect("load");
    assert!(model.mesh.is_empty());
    assert!(model.is_binary());
}

#[test]
fn test_short_binary_header_is_fatal() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = write_file(&dir, "short.stl", &[1u8; 30]);

    let err = load_stl(&path).unwrap_err();
    assert!(matches!(err, IoError::InvalidHeader { got: 30, .. }));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("does_not_exist.stl");

    let err = load_stl(&path).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
    assert!(err.to_string().contains("does_not_exist.stl"));

    assert!(matches!(
        sniff_encoding(&path).unwrap_err(),
        IoError::FileNotFound { .. }
    ));
}
