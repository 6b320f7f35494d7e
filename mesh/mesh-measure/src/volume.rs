//! Enclosed volume by signed-tetrahedron summation.
//!
//! Each triangle forms a tetrahedron with the origin; the signed volumes
//! sum to the enclosed volume for a closed, consistently wound surface.
//! Vertices are first shifted by the mesh's minimum corner so that
//! coordinates far from the origin do not lose precision in the products.

use mesh_types::TriangleMesh;
use mesh_types::units::{MM3_PER_CM3, cm3_to_inch3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Volume of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeMeasurement {
    /// Raw signed sum in mm³. Negative when the winding points inward.
    pub signed_mm3: f64,
    /// Magnitude of the volume in cm³.
    pub volume_cm3: f64,
}

impl VolumeMeasurement {
    /// Build from a raw signed sum in mm³.
    #[must_use]
    pub fn from_signed_mm3(signed_mm3: f64) -> Self {
        Self {
            signed_mm3,
            volume_cm3: signed_mm3.abs() / MM3_PER_CM3,
        }
    }

    /// Whether the triangles are wound inward (the signed sum is negative).
    #[must_use]
    pub fn is_inside_out(&self) -> bool {
        self.signed_mm3 < 0.0
    }

    /// Volume in cubic inches.
    #[must_use]
    pub fn volume_inch3(&self) -> f64 {
        cm3_to_inch3(self.volume_cm3)
    }
}

/// Compute the enclosed volume of a mesh.
///
/// The result is meaningful only for a closed surface; on an open mesh a
/// number is still returned. An inward-wound mesh yields the same
/// magnitude with [`VolumeMeasurement::is_inside_out`] set.
///
/// # Example
///
/// ```
/// use mesh_measure::measure_volume;
/// use mesh_types::{Point3, cube};
///
/// let volume = measure_volume(&cube(10.0, Point3::origin()));
/// assert!((volume.volume_cm3 - 1.0).abs() < 1e-12);
/// assert!(!volume.is_inside_out());
/// ```
#[must_use]
pub fn measure_volume(mesh: &TriangleMesh) -> VolumeMeasurement {
    let shift = -mesh.origin().coords;

    #[cfg(feature = "parallel")]
    let signed_mm3: f64 = mesh
        .triangles()
        .par_iter()
        .map(|t| t.translated(&shift).signed_volume())
        .sum();

    #[cfg(not(feature = "parallel"))]
    let signed_mm3: f64 = mesh
        .triangles()
        .iter()
        .map(|t| t.translated(&shift).signed_volume())
        .sum();

    VolumeMeasurement::from_signed_mm3(signed_mm3)
}
