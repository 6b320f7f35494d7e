//! Vertex quantization used when matching shared edges.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of decimal places kept when comparing vertices.
pub const DEFAULT_EDGE_DECIMALS: u32 = 6;

/// Largest supported precision. Beyond this, scaled millimeter coordinates
/// stop fitting comfortably in an `i64`.
const MAX_EDGE_DECIMALS: u32 = 9;

/// Rounding precision applied to vertex coordinates before two vertices are
/// compared for equality.
///
/// STL stores every facet with its own copy of each vertex, so shared edges
/// are only recognised by coordinate equality. Rounding absorbs noise from
/// lossy re-encoding. Too coarse a precision merges distinct vertices; too
/// fine a precision fails to match near-duplicates written by a lossy
/// exporter.
///
/// # Example
///
/// ```
/// use mesh_types::{EdgePrecision, Point3};
///
/// let precision = EdgePrecision::new(3);
/// let a = precision.quantize(&Point3::new(1.0001, 2.0, 3.0));
/// let b = precision.quantize(&Point3::new(1.0004, 2.0, 3.0));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgePrecision {
    decimals: u32,
}

impl EdgePrecision {
    /// Create a precision with the given number of decimal places.
    ///
    /// Values above 9 are clamped to 9.
    #[must_use]
    pub fn new(decimals: u32) -> Self {
        Self {
            decimals: decimals.min(MAX_EDGE_DECIMALS),
        }
    }

    /// Number of decimal places kept.
    #[must_use]
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Round a point to this precision and return the scaled integer
    /// coordinates.
    ///
    /// The result is exact and hashable. Negative zero maps to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    // Truncation: the value is already rounded and millimeter coordinates
    // scaled by at most 1e9 stay well inside i64. `decimals` is at most 9.
    pub fn quantize(&self, point: &Point3<f64>) -> [i64; 3] {
        let scale = 10f64.powi(self.decimals as i32);
        [
            (point.x * scale).round() as i64,
            (point.y * scale).round() as i64,
            (point.z * scale).round() as i64,
        ]
    }
}

impl Default for EdgePrecision {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_DECIMALS)
    }
}
