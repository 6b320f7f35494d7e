//! Edge-sharing check for closed surfaces.
//!
//! STL has no shared vertex indices, so edges are matched by coordinates.
//! Each vertex is quantized with an [`EdgePrecision`] and an edge is keyed
//! by its two quantized endpoints in sorted order.

use hashbrown::HashMap;
use mesh_types::{EdgePrecision, TriangleMesh};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

type QuantizedPoint = [i64; 3];

/// Undirected edge between two quantized vertices. The smaller endpoint
/// comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey(QuantizedPoint, QuantizedPoint);

impl EdgeKey {
    fn new(a: QuantizedPoint, b: QuantizedPoint) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

/// Result of [`check_watertight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatertightReport {
    /// Distinct undirected edges.
    pub edge_count: usize,
    /// Edges used by exactly one triangle.
    pub boundary_edge_count: usize,
    /// Edges used by more than two triangles.
    pub non_manifold_edge_count: usize,
    /// Whether every edge is used by exactly two triangles.
    pub is_watertight: bool,
}

/// Check that every edge of the mesh is shared by exactly two triangles.
///
/// An empty mesh is vacuously watertight. Degenerate triangles whose
/// endpoints collapse under `precision` still contribute their (zero-length)
/// edges.
///
/// # Example
///
/// ```
/// use mesh_measure::check_watertight;
/// use mesh_types::{EdgePrecision, Point3, cube};
///
/// let report = check_watertight(&cube(10.0, Point3::origin()), EdgePrecision::default());
/// assert!(report.is_watertight);
/// assert_eq!(report.edge_count, 18);
/// ```
#[must_use]
pub fn check_watertight(mesh: &TriangleMesh, precision: EdgePrecision) -> WatertightReport {
    let mut edge_uses: HashMap<EdgeKey, u32> = HashMap::with_capacity(mesh.triangle_count() * 3 / 2);

    for triangle in mesh.triangles() {
        let [a, b, c] = triangle.vertices().map(|v| precision.quantize(&v));
        for edge in [EdgeKey::new(a, b), EdgeKey::new(b, c), EdgeKey::new(c, a)] {
            *edge_uses.entry(edge).or_insert(0) += 1;
        }
    }

    let boundary_edge_count = edge_uses.values().filter(|&&n| n == 1).count();
    let non_manifold_edge_count = edge_uses.values().filter(|&&n| n > 2).count();

    debug!(
        edges = edge_uses.len(),
        boundary_edge_count,
        non_manifold_edge_count,
        decimals = precision.decimals(),
        "Checked edge sharing"
    );

    WatertightReport {
        edge_count: edge_uses.len(),
        boundary_edge_count,
        non_manifold_edge_count,
        is_watertight: edge_uses.values().all(|&n| n == 2),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_types::{Point3, Triangle, cube};

    fn closed_cube() -> TriangleMesh {
        cube(10.0, Point3::origin())
    }

    #[test]
    fn cube_is_watertight() {
        let report = check_watertight(&closed_cube(), EdgePrecision::default());
        assert!(report.is_watertight);
        assert_eq!(report.edge_count, 18);
        assert_eq!(report.boundary_edge_count, 0);
        assert_eq!(report.non_manifold_edge_count, 0);
    }

    #[test]
    fn removed_triangle_leaves_three_boundary_edges() {
        let mesh: TriangleMesh = closed_cube().triangles()[1..].iter().copied().collect();
        let report = check_watertight(&mesh, EdgePrecision::default());
        assert!(!report.is_watertight);
        assert_eq!(report.boundary_edge_count, 3);
    }

    #[test]
    fn winding_does_not_matter() {
        let report = check_watertight(&closed_cube().flipped(), EdgePrecision::default());
        assert!(report.is_watertight);
    }

    #[test]
    fn empty_mesh_is_vacuously_watertight() {
        let report = check_watertight(&TriangleMesh::new(), EdgePrecision::default());
        assert!(report.is_watertight);
        assert_eq!(report.edge_count, 0);
    }

    #[test]
    fn duplicated_triangle_is_non_manifold() {
        let mut mesh = closed_cube();
        let first = mesh.triangles()[0];
        mesh.push(first);
        let report = check_watertight(&mesh, EdgePrecision::default());
        assert!(!report.is_watertight);
        assert_eq!(report.non_manifold_edge_count, 3);
        assert_eq!(report.boundary_edge_count, 0);
    }

    #[test]
    fn single_triangle() {
        let mesh: TriangleMesh = std::iter::once(Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ))
        .collect();
        let report = check_watertight(&mesh, EdgePrecision::default());
        assert_eq!(report.edge_count, 3);
        assert_eq!(report.boundary_edge_count, 3);
    }

    #[test]
    fn precision_absorbs_small_noise() {
        // Nudge one vertex of one triangle below the 6th decimal
        let mut triangles = closed_cube().triangles().to_vec();
        triangles[0].v0.x += 1e-8;
        let mesh: TriangleMesh = triangles.into_iter().collect();

        assert!(check_watertight(&mesh, EdgePrecision::new(6)).is_watertight);
        assert!(!check_watertight(&mesh, EdgePrecision::new(9)).is_watertight);
    }
}
