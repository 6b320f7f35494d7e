//! Full property report for a loaded mesh.

use std::fmt;

use mesh_types::{BoundingBox, EdgePrecision, TriangleMesh};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::area::surface_area_cm2;
use crate::volume::{VolumeMeasurement, measure_volume};
use crate::watertight::{WatertightReport, check_watertight};

/// Options for [`measure_mesh`].
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasureOptions {
    /// Rounding applied to vertices when matching shared edges.
    pub edge_precision: EdgePrecision,
}

impl MeasureOptions {
    /// Set the edge-matching precision.
    #[must_use]
    pub const fn with_edge_precision(mut self, edge_precision: EdgePrecision) -> Self {
        self.edge_precision = edge_precision;
        self
    }
}

/// A problem with the mesh that does not stop measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum MeasureWarning {
    /// Triangles are wound inward; the reported volume is the magnitude.
    InsideOut,
    /// Some edges are not shared by exactly two triangles, so the volume
    /// may be meaningless.
    NotWatertight {
        /// Edges used by a single triangle.
        boundary_edges: usize,
        /// Edges used by more than two triangles.
        non_manifold_edges: usize,
    },
}

impl fmt::Display for MeasureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsideOut => write!(
                f,
                "mesh appears inside-out (inward winding); volume reported as magnitude"
            ),
            Self::NotWatertight {
                boundary_edges,
                non_manifold_edges,
            } => write!(
                f,
                "mesh is not watertight ({boundary_edges} boundary edges, \
                 {non_manifold_edges} non-manifold edges); volume may be inaccurate"
            ),
        }
    }
}

/// Everything measured about a mesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshProperties {
    /// Number of triangles.
    pub triangle_count: usize,
    /// Axis extents in cm.
    pub bounding_box: BoundingBox,
    /// Surface area in cm².
    pub surface_area_cm2: f64,
    /// Enclosed volume.
    pub volume: VolumeMeasurement,
    /// Edge-sharing check.
    pub watertight: WatertightReport,
    /// Non-fatal problems found.
    pub warnings: Vec<MeasureWarning>,
}

impl MeshProperties {
    /// Whether any warnings were raised.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Measure a mesh: edge sharing, volume and surface area.
///
/// Never fails. Problems are collected in [`MeshProperties::warnings`] and
/// logged at `warn` level.
///
/// # Example
///
/// ```
/// use mesh_measure::{MeasureOptions, measure_mesh};
/// use mesh_types::{Point3, cube};
///
/// let props = measure_mesh(&cube(10.0, Point3::origin()), &MeasureOptions::default());
/// assert_eq!(props.triangle_count, 12);
/// assert!(props.watertight.is_watertight);
/// assert!(props.warnings.is_empty());
/// ```
#[must_use]
pub fn measure_mesh(mesh: &TriangleMesh, options: &MeasureOptions) -> MeshProperties {
    let watertight = check_watertight(mesh, options.edge_precision);
    let volume = measure_volume(mesh);
    let surface_area_cm2 = surface_area_cm2(mesh);

    let mut warnings = Vec::new();
    if !watertight.is_watertight {
        warnings.push(MeasureWarning::NotWatertight {
            boundary_edges: watertight.boundary_edge_count,
            non_manifold_edges: watertight.non_manifold_edge_count,
        });
    }
    if volume.is_inside_out() {
        warnings.push(MeasureWarning::InsideOut);
    }
    for warning in &warnings {
        warn!("{warning}");
    }

    debug!(
        triangles = mesh.triangle_count(),
        volume_cm3 = volume.volume_cm3,
        surface_area_cm2,
        "Measured mesh"
    );

    MeshProperties {
        triangle_count: mesh.triangle_count(),
        bounding_box: mesh.bounding_box(),
        surface_area_cm2,
        volume,
        watertight,
        warnings,
    }
}
