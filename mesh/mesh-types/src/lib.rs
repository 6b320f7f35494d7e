//! Core geometry types for STL volume analysis.
//!
//! This crate provides the foundational types shared by the loader and the
//! measurement crates:
//!
//! - [`Triangle`] - A facet with concrete vertex positions
//! - [`TriangleMesh`] - An ordered triangle soup with an incrementally
//!   accumulated bounding box
//! - [`Aabb`] - Axis-aligned bounding box in millimeters
//! - [`BoundingBox`] - Bounding box extents in centimeters
//! - [`EdgePrecision`] - Vertex rounding used when comparing shared edges
//!
//! # Units
//!
//! Coordinates are `f64` millimeters, the STL convention. Reported
//! quantities are converted with the constants in [`units`].
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Point3, Triangle, TriangleMesh};
//!
//! let mut mesh = TriangleMesh::new();
//! mesh.push(Triangle::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//!     Point3::new(0.0, 20.0, 5.0),
//! ));
//!
//! assert_eq!(mesh.triangle_count(), 1);
//! let bbox = mesh.bounding_box();
//! assert!((bbox.width - 1.0).abs() < 1e-12);
//! assert!((bbox.depth - 2.0).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod bounds;
mod mesh;
mod precision;
mod triangle;
pub mod units;

pub use bounds::{Aabb, BoundingBox};
pub use mesh::{TriangleMesh, cube};
pub use precision::{DEFAULT_EDGE_DECIMALS, EdgePrecision};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
