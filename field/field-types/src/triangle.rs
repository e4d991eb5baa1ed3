//! Triangle type and planar barycentric queries.
//!
//! Barycentric coordinates are solved in the XY plane: the z coordinate of
//! both the query point and the triangle is ignored. Meshes traced by this
//! workspace are planar slabs, so the projection loses nothing there.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};

/// Determinants with magnitude below this value mark a degenerate triangle.
pub const DEGENERATE_EPSILON: f64 = 1e-14;

/// Tolerance used by containment checks.
pub const CONTAINMENT_TOLERANCE: f64 = 1e-9;

/// A triangle with concrete vertex positions.
///
/// # Example
///
/// ```
/// use field_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// assert!((tri.area() - 0.5).abs() < 1e-12);
/// assert!(tri.contains(&Point3::new(0.25, 0.25, 0.0)).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Fan-triangulate a polygon around its first vertex.
    ///
    /// Yields `(p0, p[i], p[i + 1])` for `i` in `1..n - 1`. Polygons with
    /// fewer than three points yield nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use field_types::{Triangle, Point3};
    ///
    /// let square = [
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(1.0, 1.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ];
    /// assert_eq!(Triangle::fan(&square).count(), 2);
    /// ```
    pub fn fan(polygon: &[Point3<f64>]) -> impl Iterator<Item = Self> + '_ {
        let n = polygon.len();
        (1..n.saturating_sub(1)).map(move |i| Self::new(polygon[0], polygon[i], polygon[i + 1]))
    }

    /// Unnormalized normal; its length is twice the area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Area in 3D.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Centroid of the three vertices.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Shared denominator of the planar barycentric system.
    ///
    /// Equals twice the signed XY area.
    #[inline]
    #[must_use]
    pub fn barycentric_denominator(&self) -> f64 {
        let (a, b, c) = (&self.v0, &self.v1, &self.v2);
        (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y)
    }

    /// Barycentric coordinates of `point` with respect to this triangle.
    ///
    /// See [`barycentric_coordinates`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateTriangle`] when the XY area vanishes.
    #[inline]
    pub fn barycentric(&self, point: &Point3<f64>, clamp: bool) -> GeometryResult<[f64; 3]> {
        barycentric_coordinates(point, self, clamp)
    }

    /// Point-in-triangle test in the XY plane.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateTriangle`] when the XY area vanishes.
    #[inline]
    pub fn contains(&self, point: &Point3<f64>) -> GeometryResult<bool> {
        is_point_in_triangle(point, self)
    }

    /// Vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }
}

/// Solve the planar barycentric system for `point`.
///
/// The z coordinate is ignored. When `clamp` is set, the first two
/// coordinates are clamped to `[0, 1]` before the third is derived as
/// `1 - b1 - b2`, so a clamped result does not necessarily sum to one and may
/// carry a negative third weight. Closest-point queries rely on exactly this
/// behaviour; callers that need strict containment must use
/// [`is_point_in_triangle`].
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateTriangle`] when the triangle has zero
/// area in the XY plane.
///
/// # Example
///
/// ```
/// use field_types::{barycentric_coordinates, Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let [b1, b2, b3] = barycentric_coordinates(&Point3::new(0.25, 0.25, 0.0), &tri, false)?;
/// assert!((b1 + b2 + b3 - 1.0).abs() < 1e-12);
/// # Ok::<(), field_types::GeometryError>(())
/// ```
pub fn barycentric_coordinates(
    point: &Point3<f64>,
    triangle: &Triangle,
    clamp: bool,
) -> GeometryResult<[f64; 3]> {
    let denominator = triangle.barycentric_denominator();
    if denominator.abs() < DEGENERATE_EPSILON || !denominator.is_finite() {
        return Err(GeometryError::DegenerateTriangle { denominator });
    }

    let (a, b, c) = (&triangle.v0, &triangle.v1, &triangle.v2);
    let px = point.x - c.x;
    let py = point.y - c.y;

    let mut b1 = ((b.y - c.y) * px + (c.x - b.x) * py) / denominator;
    let mut b2 = ((c.y - a.y) * px + (a.x - c.x) * py) / denominator;
    if clamp {
        b1 = b1.clamp(0.0, 1.0);
        b2 = b2.clamp(0.0, 1.0);
    }
    let b3 = 1.0 - b1 - b2;

    Ok([b1, b2, b3])
}

/// Weighted sum of the triangle vertices in XY; z is always zero.
#[must_use]
pub fn barycentric_to_cartesian(barycentric: &[f64; 3], triangle: &Triangle) -> Point3<f64> {
    let [b1, b2, b3] = *barycentric;
    let (a, b, c) = (&triangle.v0, &triangle.v1, &triangle.v2);
    Point3::new(
        a.x * b1 + b.x * b2 + c.x * b3,
        a.y * b1 + b.y * b2 + c.y * b3,
        0.0,
    )
}

/// Whether `point` lies inside `triangle` (XY plane, boundary inclusive).
///
/// All three unclamped coordinates must lie in `[0, 1]` and sum to one, both
/// within [`CONTAINMENT_TOLERANCE`].
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateTriangle`] for zero-area triangles.
pub fn is_point_in_triangle(point: &Point3<f64>, triangle: &Triangle) -> GeometryResult<bool> {
    let bars = barycentric_coordinates(point, triangle, false)?;
    let in_range = bars
        .iter()
        .all(|b| (-CONTAINMENT_TOLERANCE..=1.0 + CONTAINMENT_TOLERANCE).contains(b));
    let sum = bars.iter().sum::<f64>();
    Ok(in_range && (sum - 1.0).abs() <= CONTAINMENT_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_right() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn vertices_have_unit_weights() {
        let tri = unit_right();
        let bars = barycentric_coordinates(&tri.v0, &tri, false).unwrap();
        assert_relative_eq!(bars[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(bars[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(bars[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn round_trip_inside() {
        let tri = unit_right();
        let p = Point3::new(0.2, 0.3, 0.0);
        let bars = barycentric_coordinates(&p, &tri, false).unwrap();
        assert_relative_eq!(bars.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        let back = barycentric_to_cartesian(&bars, &tri);
        assert_relative_eq!(back, p, epsilon = 1e-12);
    }

    #[test]
    fn z_is_ignored() {
        let tri = unit_right();
        let flat = barycentric_coordinates(&Point3::new(0.2, 0.3, 0.0), &tri, false).unwrap();
        let lifted = barycentric_coordinates(&Point3::new(0.2, 0.3, 7.0), &tri, false).unwrap();
        assert_eq!(flat, lifted);
    }

    #[test]
    fn clamp_applies_before_third_coordinate() {
        let tri = unit_right();
        // Unclamped: b1 = -1.0, b2 = 2.0, b3 = 0.0
        let p = Point3::new(2.0, 0.0, 0.0);
        let raw = barycentric_coordinates(&p, &tri, false).unwrap();
        assert_relative_eq!(raw[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(raw[1], 2.0, epsilon = 1e-12);

        let clamped = barycentric_coordinates(&p, &tri, true).unwrap();
        assert_relative_eq!(clamped[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(clamped[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(clamped[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn clamped_weights_can_leave_the_triangle() {
        let tri = unit_right();
        // b1 = 1.0 and b2 = 0.5 survive clamping, so b3 = -0.5.
        let p = Point3::new(0.5, -0.5, 0.0);
        let clamped = barycentric_coordinates(&p, &tri, true).unwrap();
        assert_relative_eq!(clamped[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(clamped[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(clamped[2], -0.5, epsilon = 1e-12);

        let back = barycentric_to_cartesian(&clamped, &tri);
        assert!(!tri.contains(&back).unwrap());
    }

    #[test]
    fn clamped_far_point_snaps_to_vertex() {
        let tri = unit_right();
        let far = Point3::new(-1.0, 3.0, 0.0);
        let clamped = barycentric_coordinates(&far, &tri, true).unwrap();
        assert_relative_eq!(clamped[2], 1.0, epsilon = 1e-12);
        let back = barycentric_to_cartesian(&clamped, &tri);
        assert_relative_eq!(back, tri.v2, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_triangle_is_an_error() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        let err = barycentric_coordinates(&Point3::origin(), &tri, false);
        assert!(matches!(err, Err(GeometryError::DegenerateTriangle { .. })));
    }

    #[test]
    fn vertical_triangle_is_degenerate_in_xy() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        );
        assert!(tri.contains(&Point3::origin()).is_err());
        assert!(tri.area() > 0.0);
    }

    #[test]
    fn containment() {
        let tri = unit_right();
        assert!(tri.contains(&Point3::new(0.1, 0.1, 0.0)).unwrap());
        assert!(tri.contains(&Point3::new(0.5, 0.5, 0.0)).unwrap());
        assert!(tri.contains(&Point3::new(1.0, 0.0, 0.0)).unwrap());
        assert!(!tri.contains(&Point3::new(0.6, 0.6, 0.0)).unwrap());
        assert!(!tri.contains(&Point3::new(-0.1, 0.5, 0.0)).unwrap());
    }

    #[test]
    fn clockwise_winding_still_contains() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        );
        assert!(tri.contains(&Point3::new(0.2, 0.2, 0.0)).unwrap());
    }

    #[test]
    fn fan_of_triangle_and_degenerate_polygons() {
        let tri = [Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        assert_eq!(Triangle::fan(&tri).count(), 1);
        assert_eq!(Triangle::fan(&tri[..2]).count(), 0);
        assert_eq!(Triangle::fan(&[]).count(), 0);
    }

    #[test]
    fn centroid_and_area() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        );
        assert_relative_eq!(tri.centroid(), Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(tri.area(), 4.5, epsilon = 1e-12);
    }
}
