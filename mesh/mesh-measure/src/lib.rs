//! Volume, surface area and printability measurements for triangle meshes.
//!
//! # Features
//!
//! - **Watertightness**: every edge shared by exactly two triangles, with
//!   vertices matched at a configurable [`EdgePrecision`](mesh_types::EdgePrecision)
//! - **Volume**: signed-tetrahedron sum with a shift to the mesh's minimum
//!   corner, reported in cm³ or inch³
//! - **Surface area**: cross-product sum, reported in cm²
//! - **Mass**: volume × density × infill
//!
//! All inputs are in millimeters, the STL convention.
//!
//! # Cargo Features
//!
//! - `serde`: serialization of every report type
//! - `parallel`: rayon map-reduce for the volume and area passes
//!
//! # Example
//!
//! ```
//! use mesh_measure::{InfillFraction, MassEstimate, MeasureOptions, measure_mesh};
//! use mesh_types::{Point3, cube};
//!
//! let mesh = cube(10.0, Point3::origin());
//! let props = measure_mesh(&mesh, &MeasureOptions::default());
//!
//! assert!(props.watertight.is_watertight);
//! assert!((props.volume.volume_cm3 - 1.0).abs() < 1e-12);
//! assert!((props.surface_area_cm2 - 6.0).abs() < 1e-12);
//!
//! // PLA at 20% infill
//! let infill = InfillFraction::from_percent(20.0).unwrap();
//! let mass = MassEstimate::new(props.volume.volume_cm3, 1.25, infill);
//! assert!((mass.at_infill_g - 0.25).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod area;
mod error;
mod mass;
mod properties;
mod volume;
mod watertight;

pub use area::surface_area_cm2;
pub use error::{MeasureError, MeasureResult};
pub use mass::{InfillFraction, MassEstimate, mass_grams};
pub use properties::{MeasureOptions, MeasureWarning, MeshProperties, measure_mesh};
pub use volume::{VolumeMeasurement, measure_volume};
pub use watertight::{WatertightReport, check_watertight};
