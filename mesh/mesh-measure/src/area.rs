//! Surface area.

use mesh_types::TriangleMesh;
use mesh_types::units::MM2_PER_CM2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Total surface area of a mesh in cm².
///
/// Sums `0.5 * |(v1 - v0) x (v2 - v0)|` over all triangles. Independent of
/// winding and position; degenerate triangles contribute zero.
///
/// # Example
///
/// ```
/// use mesh_measure::surface_area_cm2;
/// use mesh_types::{Point3, cube};
///
/// let area = surface_area_cm2(&cube(10.0, Point3::origin()));
/// assert!((area - 6.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn surface_area_cm2(mesh: &TriangleMesh) -> f64 {
    #[cfg(feature = "parallel")]
    let area_mm2: f64 = mesh.triangles().par_iter().map(|t| t.area()).sum();

    #[cfg(not(feature = "parallel"))]
    let area_mm2: f64 = mesh.triangles().iter().map(|t| t.area()).sum();

    area_mm2 / MM2_PER_CM2
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{Point3, Triangle, cube};

    #[test]
    fn ten_mm_cube_is_six_cm2() {
        assert_relative_eq!(
            surface_area_cm2(&cube(10.0, Point3::origin())),
            6.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn winding_and_position_do_not_matter() {
        let mesh = cube(7.0, Point3::new(-300.0, 12.0, 9.5));
        assert_relative_eq!(
            surface_area_cm2(&mesh.flipped()),
            surface_area_cm2(&mesh),
            epsilon = 1e-12
        );
        assert_relative_eq!(surface_area_cm2(&mesh), 6.0 * 0.49, epsilon = 1e-12);
    }

    #[test]
    fn right_triangle() {
        let mesh: TriangleMesh = std::iter::once(Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [20.0, 0.0, 0.0],
            [0.0, 10.0, 0.0],
        ))
        .collect();
        assert_relative_eq!(surface_area_cm2(&mesh), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_mesh_has_zero_area() {
        assert_eq!(surface_area_cm2(&TriangleMesh::new()), 0.0);
    }
}
