//! Undirected unit directions.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeometryResult;
use crate::vector::{align_vector, aligned_distance, normalize};

/// Coordinates with magnitude below this are skipped when picking a sign.
const CANONICAL_EPSILON: f64 = 1e-12;

/// An undirected unit direction: `v` and `-v` are the same line.
///
/// The stored direction is unit length with a canonical sign (its first
/// coordinate with non-negligible magnitude is positive), so two lines built
/// from opposite vectors compare equal.
///
/// # Example
///
/// ```
/// use field_types::{Line, Vector3};
///
/// let a = Line::new(&Vector3::new(2.0, 0.0, 0.0))?;
/// let b = Line::new(&Vector3::new(-5.0, 0.0, 0.0))?;
/// assert_eq!(a, b);
/// assert!(a.distance(&b) < 1e-12);
/// # Ok::<(), field_types::GeometryError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Line {
    direction: Vector3<f64>,
}

impl Line {
    /// Build a line from any non-zero vector.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeometryError::ZeroVector`] for vectors too short to
    /// carry a direction.
    pub fn new(v: &Vector3<f64>) -> GeometryResult<Self> {
        let unit = normalize(v)?;
        let sign = unit
            .iter()
            .find(|c| c.abs() > CANONICAL_EPSILON)
            .map_or(1.0, |c| c.signum());
        Ok(Self {
            direction: unit * sign,
        })
    }

    /// The canonical unit direction.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Vector3<f64> {
        self.direction
    }

    /// The direction oriented along `reference`.
    #[inline]
    #[must_use]
    pub fn oriented_along(&self, reference: &Vector3<f64>) -> Vector3<f64> {
        align_vector(&self.direction, reference)
    }

    /// Aligned distance `|align(self, other) - other|`, in `[0, sqrt(2)]`.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        aligned_distance(&self.direction, &other.direction)
    }

    /// Unsigned angle between the two lines, in `[0, pi/2]`.
    #[must_use]
    pub fn angle(&self, other: &Self) -> f64 {
        self.direction.dot(&other.direction).abs().min(1.0).acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn canonical_sign_uses_first_significant_coordinate() {
        let line = Line::new(&Vector3::new(0.0, -3.0, 4.0)).unwrap();
        assert!(line.direction().y > 0.0);
        assert_relative_eq!(line.direction().norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_vector_is_rejected() {
        assert!(Line::new(&Vector3::zeros()).is_err());
    }

    #[test]
    fn angle_is_folded() {
        let a = Line::new(&Vector3::x()).unwrap();
        let b = Line::new(&Vector3::new(-1.0, 1.0, 0.0)).unwrap();
        assert_relative_eq!(a.angle(&b), std::f64::consts::FRAC_PI_4, epsilon = 1e-12);

        let c = Line::new(&Vector3::y()).unwrap();
        assert_relative_eq!(a.angle(&c), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn oriented_along_reference() {
        let line = Line::new(&Vector3::x()).unwrap();
        let v = line.oriented_along(&Vector3::new(-1.0, 0.2, 0.0));
        assert_relative_eq!(v, -Vector3::x());
    }
}
