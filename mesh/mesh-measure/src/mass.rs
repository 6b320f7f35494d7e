//! Printed mass from volume, material density and infill.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, MeasureResult};

/// Fraction of the enclosed volume that is actually filled, in `[0, 1]`.
///
/// # Example
///
/// ```
/// use mesh_measure::InfillFraction;
///
/// let infill = InfillFraction::from_percent(20.0).unwrap();
/// assert!((infill.get() - 0.2).abs() < 1e-12);
/// assert!(InfillFraction::from_percent(120.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InfillFraction(f64);

impl InfillFraction {
    /// Fully solid.
    pub const SOLID: Self = Self(1.0);

    /// Convert a percentage in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidInfill`] for values outside the range
    /// or NaN.
    pub fn from_percent(percent: f64) -> MeasureResult<Self> {
        if (0.0..=100.0).contains(&percent) {
            Ok(Self(percent / 100.0))
        } else {
            Err(MeasureError::invalid_infill(percent))
        }
    }

    /// The fraction as a number in `[0, 1]`.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// The fraction as a percentage.
    #[must_use]
    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for InfillFraction {
    fn default() -> Self {
        Self::SOLID
    }
}

/// Mass in grams of `volume_cm3` of material at `density_g_cm3`, filled to
/// `infill_fraction`.
///
/// No validation: non-finite inputs give a non-finite mass.
///
/// ```
/// use mesh_measure::mass_grams;
///
/// assert!((mass_grams(10.0, 1.25, 0.2) - 2.5).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn mass_grams(volume_cm3: f64, density_g_cm3: f64, infill_fraction: f64) -> f64 {
    volume_cm3 * density_g_cm3 * infill_fraction
}

/// Mass of one part in one material, both at the requested infill and
/// fully solid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassEstimate {
    /// Density used, in g/cm³.
    pub density_g_cm3: f64,
    /// Infill the first figure was computed at.
    pub infill: InfillFraction,
    /// Mass at `infill`, in grams.
    pub at_infill_g: f64,
    /// Mass at 100% infill, in grams.
    pub solid_g: f64,
}

impl MassEstimate {
    /// Estimate the mass of `volume_cm3` of material.
    #[must_use]
    pub fn new(volume_cm3: f64, density_g_cm3: f64, infill: InfillFraction) -> Self {
        Self {
            density_g_cm3,
            infill,
            at_infill_g: mass_grams(volume_cm3, density_g_cm3, infill.get()),
            solid_g: mass_grams(volume_cm3, density_g_cm3, InfillFraction::SOLID.get()),
        }
    }
}
