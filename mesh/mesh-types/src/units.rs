//! Unit conversions between STL millimeters and reported quantities.

/// Millimeters per centimeter.
pub const MM_PER_CM: f64 = 10.0;

/// Square millimeters per square centimeter.
pub const MM2_PER_CM2: f64 = 100.0;

/// Cubic millimeters per cubic centimeter.
pub const MM3_PER_CM3: f64 = 1000.0;

/// Cubic inches per cubic centimeter.
pub const CM3_TO_INCH3: f64 = 0.061_023_744_1;

/// Convert a volume from cubic centimeters to cubic inches.
///
/// ```
/// use mesh_types::units::cm3_to_inch3;
///
/// assert!((cm3_to_inch3(1000.0) - 61.023_744_1).abs() < 1e-9);
/// ```
#[inline]
#[must_use]
pub fn cm3_to_inch3(volume_cm3: f64) -> f64 {
    volume_cm3 * CM3_TO_INCH3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inch_conversion_uses_exact_factor() {
        assert!((cm3_to_inch3(1.0) - 0.061_023_744_1).abs() < f64::EPSILON);
        assert!(cm3_to_inch3(0.0).abs() < f64::EPSILON);
    }
}
