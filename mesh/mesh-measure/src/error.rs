//! Error types for measurement operations.

use thiserror::Error;

/// Result type alias for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Errors that can occur during measurement operations.
///
/// Geometry problems (holes, inverted winding) are never errors; they are
/// reported as [`MeasureWarning`](crate::MeasureWarning)s alongside the
/// measurements.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Infill percentage outside `[0, 100]` or not a number.
    #[error("invalid infill: {percent}% (expected 0 to 100)")]
    InvalidInfill {
        /// Rejected percentage.
        percent: f64,
    },
}

impl MeasureError {
    /// Create an invalid infill error.
    #[must_use]
    pub const fn invalid_infill(percent: f64) -> Self {
        Self::InvalidInfill { percent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeasureError::invalid_infill(150.0);
        let msg = format!("{err}");
        assert!(msg.contains("150"));
        assert!(msg.contains("0 to 100"));
    }
}
