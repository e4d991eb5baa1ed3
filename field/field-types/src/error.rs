//! Error types for geometric primitives.

use thiserror::Error;

/// Result type for geometric operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors raised by the geometry kernel.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// The triangle has zero area in the plane used for barycentric projection.
    #[error("degenerate triangle: barycentric denominator is {denominator:e}")]
    DegenerateTriangle {
        /// The vanishing determinant.
        denominator: f64,
    },

    /// A vector is too short to define a direction.
    #[error("zero vector: length {length:e} is below {epsilon:e}")]
    ZeroVector {
        /// Length of the offending vector.
        length: f64,
        /// Threshold below which vectors are rejected.
        epsilon: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::DegenerateTriangle { denominator: 0.0 };
        assert!(format!("{err}").contains("degenerate"));

        let err = GeometryError::ZeroVector {
            length: 1e-20,
            epsilon: 1e-12,
        };
        assert!(format!("{err}").contains("zero vector"));
    }
}
