//! Vector arithmetic for undirected fields.
//!
//! Principal directions have no canonical sign, so any comparison between two
//! field vectors goes through [`align_vector`] first.

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, GeometryResult};

/// Vectors shorter than this are treated as having no direction.
pub const ZERO_EPSILON: f64 = 1e-12;

/// Return `v` or `-v`, whichever points along `reference`.
///
/// Ties (`v` orthogonal to `reference`) return `v` unchanged.
///
/// # Example
///
/// ```
/// use field_types::{align_vector, Vector3};
///
/// let v = Vector3::new(-1.0, 0.0, 0.0);
/// let aligned = align_vector(&v, &Vector3::x());
/// assert!((aligned.x - 1.0).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn align_vector(v: &Vector3<f64>, reference: &Vector3<f64>) -> Vector3<f64> {
    if v.dot(reference) < 0.0 { -v } else { *v }
}

/// Normalize a vector, failing when it is too short to define a direction.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] when `|v| < ZERO_EPSILON`.
///
/// # Example
///
/// ```
/// use field_types::{normalize, Vector3};
///
/// let n = normalize(&Vector3::new(3.0, 4.0, 0.0)).unwrap();
/// assert!((n.norm() - 1.0).abs() < 1e-12);
/// assert!(normalize(&Vector3::zeros()).is_err());
/// ```
pub fn normalize(v: &Vector3<f64>) -> GeometryResult<Vector3<f64>> {
    let length = v.norm();
    if length < ZERO_EPSILON || !length.is_finite() {
        return Err(GeometryError::ZeroVector {
            length,
            epsilon: ZERO_EPSILON,
        });
    }
    Ok(v / length)
}

/// Squared length of `align(v, reference) - reference`.
///
/// This is the per-face error used by the clusterer; both inputs are expected
/// to be unit vectors.
#[inline]
#[must_use]
pub fn aligned_distance_squared(v: &Vector3<f64>, reference: &Vector3<f64>) -> f64 {
    (align_vector(v, reference) - reference).norm_squared()
}

/// Length of `align(v, reference) - reference`.
#[inline]
#[must_use]
pub fn aligned_distance(v: &Vector3<f64>, reference: &Vector3<f64>) -> f64 {
    aligned_distance_squared(v, reference).sqrt()
}

/// Orthogonal projection of `point` onto the plane through `origin` with `normal`.
///
/// `normal` does not need to be unit length. A zero normal returns `point`.
#[must_use]
pub fn closest_point_on_plane(
    point: &Point3<f64>,
    origin: &Point3<f64>,
    normal: &Vector3<f64>,
) -> Point3<f64> {
    let len_sq = normal.norm_squared();
    if len_sq < ZERO_EPSILON * ZERO_EPSILON {
        return *point;
    }
    let offset = (point - origin).dot(normal) / len_sq;
    point - normal * offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn align_flips_opposite_vector() {
        let v = Vector3::new(-1.0, -1.0, 0.0);
        let r = Vector3::new(1.0, 0.0, 0.0);
        let a = align_vector(&v, &r);
        assert_relative_eq!(a, Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn align_orthogonal_keeps_vector() {
        let v = Vector3::new(0.0, -1.0, 0.0);
        let a = align_vector(&v, &Vector3::x());
        assert_relative_eq!(a, v);
    }

    #[test]
    fn normalize_rejects_tiny_vector() {
        let err = normalize(&Vector3::new(1e-14, 0.0, 0.0));
        assert!(matches!(err, Err(GeometryError::ZeroVector { .. })));
    }

    #[test]
    fn normalize_rejects_nan() {
        assert!(normalize(&Vector3::new(f64::NAN, 0.0, 0.0)).is_err());
    }

    #[test]
    fn aligned_distance_ignores_sign() {
        let a = Vector3::x();
        let b = -Vector3::x();
        assert!(aligned_distance(&a, &b) < 1e-12);
        assert_relative_eq!(
            aligned_distance(&Vector3::y(), &Vector3::x()),
            2.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn plane_projection() {
        let p = closest_point_on_plane(
            &Point3::new(0.5, 0.5, 5.0),
            &Point3::origin(),
            &Vector3::new(0.0, 0.0, 2.0),
        );
        assert_relative_eq!(p, Point3::new(0.5, 0.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn plane_projection_zero_normal() {
        let q = Point3::new(1.0, 2.0, 3.0);
        let p = closest_point_on_plane(&q, &Point3::origin(), &Vector3::zeros());
        assert_relative_eq!(p, q);
    }
}
