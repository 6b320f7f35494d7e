//! Triangle-soup mesh, the in-memory form of an STL model.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, BoundingBox, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered collection of triangles with an incrementally maintained
/// bounding box.
///
/// STL has no shared vertex table: every facet carries its own three
/// vertices, so this is a plain triangle soup. Insertion order is file
/// order and is kept stable so results are reproducible.
///
/// The bounding box is accumulated as triangles are pushed, so it is always
/// in sync with the triangle set without a second pass.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, TriangleMesh, cube};
///
/// let mesh = cube(10.0, Point3::origin());
/// assert_eq!(mesh.triangle_count(), 12);
///
/// let bbox = mesh.bounding_box();
/// assert!((bbox.width - 1.0).abs() < 1e-12);
///
/// let empty = TriangleMesh::new();
/// assert_eq!(empty.origin(), Point3::origin());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    bounds: Aabb,
}

impl TriangleMesh {
    /// Create a new empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `capacity` triangles.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
            bounds: Aabb::empty(),
        }
    }

    /// Append a triangle, folding its vertices into the bounding box.
    pub fn push(&mut self, triangle: Triangle) {
        for vertex in &triangle.vertices() {
            self.bounds.expand_to_include(vertex);
        }
        self.triangles.push(triangle);
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles in insertion (file) order.
    #[inline]
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Raw bounding box in millimeters. Empty when the mesh is empty.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Minimum corner of the bounding box, used as the translation origin
    /// for numerically stable volume integration.
    ///
    /// The coordinate origin for an empty mesh.
    #[must_use]
    pub fn origin(&self) -> Point3<f64> {
        if self.bounds.is_empty() {
            Point3::origin()
        } else {
            self.bounds.min
        }
    }

    /// Bounding box extents in centimeters, all zeros for an empty mesh.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds.to_bounding_box()
    }

    /// Return a copy with every triangle's winding reversed.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            triangles: self.triangles.iter().map(Triangle::reversed).collect(),
            bounds: self.bounds,
        }
    }

    /// Return a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        self.triangles.iter().map(|t| t.translated(offset)).collect()
    }
}

impl FromIterator<Triangle> for TriangleMesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        let mut mesh = Self::new();
        mesh.extend(iter);
        mesh
    }
}

impl Extend<Triangle> for TriangleMesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        for triangle in iter {
            self.push(triangle);
        }
    }
}

/// Create an axis-aligned cube with edge length `edge` whose minimum corner
/// is `corner`.
///
/// 12 triangles, closed, CCW winding when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, cube};
///
/// let mesh = cube(10.0, Point3::new(5.0, 5.0, 5.0));
/// assert_eq!(mesh.triangle_count(), 12);
/// assert_eq!(mesh.origin(), Point3::new(5.0, 5.0, 5.0));
/// ```
#[must_use]
pub fn cube(edge: f64, corner: Point3<f64>) -> TriangleMesh {
    const FACES: [[usize; 3]; 12] = [
        // Bottom face (z=0) - normal points -Z
        [0, 2, 1],
        [0, 3, 2],
        // Top face (z=1) - normal points +Z
        [4, 5, 6],
        [4, 6, 7],
        // Front face (y=0) - normal points -Y
        [0, 1, 5],
        [0, 5, 4],
        // Back face (y=1) - normal points +Y
        [3, 7, 6],
        [3, 6, 2],
        // Left face (x=0) - normal points -X
        [0, 4, 7],
        [0, 7, 3],
        // Right face (x=1) - normal points +X
        [1, 2, 6],
        [1, 6, 5],
    ];

    let p = |x: f64, y: f64, z: f64| corner + Vector3::new(x, y, z) * edge;

    // 8 corners of the cube
    let v = [
        p(0.0, 0.0, 0.0), // 0
        p(1.0, 0.0, 0.0), // 1
        p(1.0, 1.0, 0.0), // 2
        p(0.0, 1.0, 0.0), // 3
        p(0.0, 0.0, 1.0), // 4
        p(1.0, 0.0, 1.0), // 5
        p(1.0, 1.0, 1.0), // 6
        p(0.0, 1.0, 1.0), // 7
    ];

    FACES
        .iter()
        .map(|&[a, b, c]| Triangle::new(v[a], v[b], v[c]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_mesh_has_zero_box_and_origin() {
        let mesh = TriangleMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.bounds().is_empty());
        assert_eq!(mesh.origin(), Point3::origin());
        assert_eq!(mesh.bounding_box(), BoundingBox::default());
    }

    #[test]
    fn push_accumulates_bounds() {
        let mut mesh = TriangleMesh::new();
        mesh.push(Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [10.0, 5.0, 3.0],
            [-2.0, 8.0, 1.0],
        ));
        mesh.push(Triangle::from_arrays(
            [0.0, 0.0, -4.0],
            [1.0, 1.0, 1.0],
            [2.0, 2.0, 2.0],
        ));

        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.origin(), Point3::new(-2.0, 0.0, -4.0));
        assert_eq!(mesh.bounds().max, Point3::new(10.0, 8.0, 3.0));

        let bbox = mesh.bounding_box();
        assert_relative_eq!(bbox.width, 1.2, epsilon = 1e-12);
        assert_relative_eq!(bbox.depth, 0.8, epsilon = 1e-12);
        assert_relative_eq!(bbox.height, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let a = Triangle::from_arrays([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = Triangle::from_arrays([5.0; 3], [6.0, 5.0, 5.0], [5.0, 6.0, 5.0]);
        let mesh: TriangleMesh = [b, a].into_iter().collect();
        assert_eq!(mesh.triangles(), &[b, a]);
    }

    #[test]
    fn cube_geometry() {
        let mesh = cube(10.0, Point3::origin());
        assert_eq!(mesh.triangle_count(), 12);
        let area: f64 = mesh.triangles().iter().map(Triangle::area).sum();
        assert_relative_eq!(area, 600.0, epsilon = 1e-9);
        let volume: f64 = mesh.triangles().iter().map(Triangle::signed_volume).sum();
        assert_relative_eq!(volume, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn flipped_keeps_bounds_and_negates_volume() {
        let mesh = cube(2.0, Point3::origin()).flipped();
        assert_eq!(mesh.origin(), Point3::origin());
        let volume: f64 = mesh.triangles().iter().map(Triangle::signed_volume).sum();
        assert_relative_eq!(volume, -8.0, epsilon = 1e-9);
    }

    #[test]
    fn translated_moves_origin() {
        let mesh = cube(1.0, Point3::origin()).translated(&Vector3::new(3.0, -1.0, 2.0));
        assert_eq!(mesh.origin(), Point3::new(3.0, -1.0, 2.0));
        assert_relative_eq!(mesh.bounding_box().width, 0.1, epsilon = 1e-12);
    }
}
