//! Axis-aligned bounding boxes.

use nalgebra::{Point3, Vector3};

use crate::units::MM_PER_CM;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB) in millimeters.
///
/// Represents a 3D box aligned with the coordinate axes, defined by
/// minimum and maximum corner points.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let mut aabb = Aabb::empty();
/// assert!(aabb.is_empty());
///
/// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
/// aabb.expand_to_include(&Point3::new(-1.0, 4.0, 3.0));
/// assert!(!aabb.is_empty());
/// assert_eq!(aabb.min, Point3::new(-1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from minimum and maximum corners.
    ///
    /// The corners are automatically corrected if min > max for any axis.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create an empty (invalid) AABB.
    ///
    /// An empty AABB has min > max, which is useful as a starting point
    /// for expanding to include points.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Check if the AABB is empty (contains no point).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand the AABB to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Get the size (extent per axis).
    ///
    /// Returns a zero vector for an empty AABB.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Extents converted to centimeters.
    #[must_use]
    pub fn to_bounding_box(&self) -> BoundingBox {
        let size = self.size() / MM_PER_CM;
        BoundingBox {
            width: size.x,
            depth: size.y,
            height: size.z,
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// Bounding box extents of a model in centimeters.
///
/// All zeros for an empty model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// Width (X extent).
    pub width: f64,
    /// Depth (Y extent).
    pub depth: f64,
    /// Height (Z extent).
    pub height: f64,
}
