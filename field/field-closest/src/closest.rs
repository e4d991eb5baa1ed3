//! Brute-force closest-point and containment scans.

use field_mesh::FaceMesh;
use field_types::{
    GeometryError, Point3, barycentric_coordinates, barycentric_to_cartesian,
    closest_point_on_plane,
};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ClosestError, ClosestResult};

/// Closest point on a mesh to a query point.
///
/// # Example
///
/// ```
/// use field_closest::closest_point;
/// use field_mesh::planar_grid;
/// use field_types::Point3;
///
/// let mesh = planar_grid(1, 1, 1.0, 1.0);
/// let hit = closest_point(&mesh, &Point3::new(0.5, 0.5, 5.0))?.unwrap();
///
/// assert_eq!(hit.face, 0);
/// assert!((hit.distance - 5.0).abs() < 1e-12);
/// assert!(hit.point.z.abs() < 1e-12);
/// # Ok::<(), field_closest::ClosestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClosestPoint {
    /// Closest point found on the mesh.
    pub point: Point3<f64>,
    /// Face the point lies on.
    pub face: usize,
    /// Euclidean distance from the query to `point`.
    pub distance: f64,
}

/// Approximate closest point on one face.
///
/// The query is projected onto the face plane, then each fan triangle of the
/// face turns the projection into clamped barycentric coordinates and back
/// into a point; the candidate nearest to the query wins. Clamped
/// coordinates are not renormalized, so outside the face this yields a point
/// on the extended patch rather than the exact closest boundary point.
/// Reconstructed points lie in the `z = 0` plane.
///
/// # Errors
///
/// Returns an error if `face` is out of bounds, has no normal, or all its
/// fan triangles are degenerate in the XY plane.
pub fn closest_point_on_face<M: FaceMesh>(
    mesh: &M,
    face: usize,
    point: &Point3<f64>,
) -> ClosestResult<Point3<f64>> {
    let normal = mesh.face_normal(face)?;
    let centroid = mesh.face_centroid(face)?;
    let projected = closest_point_on_plane(point, &centroid, &normal);

    let mut best: Option<(Point3<f64>, f64)> = None;
    let mut failure = None;

    for triangle in mesh.face_triangles(face)? {
        match barycentric_coordinates(&projected, &triangle, true) {
            Ok(bars) => {
                let candidate = barycentric_to_cartesian(&bars, &triangle);
                let dist = (candidate - point).norm();
                if best.is_none_or(|(_, d)| dist < d) {
                    best = Some((candidate, dist));
                }
            }
            Err(err) => failure = Some(err),
        }
    }

    best.map(|(p, _)| p).ok_or_else(|| {
        ClosestError::Geometry(
            failure.unwrap_or(GeometryError::DegenerateTriangle { denominator: 0.0 }),
        )
    })
}

/// Find the closest point on the mesh to `point`.
///
/// Scans every face in mesh order; ties keep the first face encountered.
/// Degenerate faces are skipped. Returns `Ok(None)` when no face could be
/// evaluated, including the empty mesh.
///
/// # Errors
///
/// Returns an error for mesh lookup failures other than degenerate faces.
pub fn closest_point<M: FaceMesh>(
    mesh: &M,
    point: &Point3<f64>,
) -> ClosestResult<Option<ClosestPoint>> {
    let mut closest: Option<ClosestPoint> = None;
    let mut skipped = 0usize;

    for face in mesh.faces() {
        let candidate = match closest_point_on_face(mesh, face, point) {
            Ok(candidate) => candidate,
            Err(err) if err.is_degenerate_face() => {
                skipped += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        let distance = (candidate - point).norm();
        if closest.is_none_or(|c| distance < c.distance) {
            closest = Some(ClosestPoint {
                point: candidate,
                face,
                distance,
            });
        }
    }

    if skipped > 0 {
        debug!(skipped, faces = mesh.face_count(), "Skipped degenerate faces");
    }

    Ok(closest)
}

/// Whether `point` lies inside `face` (XY plane, boundary inclusive).
///
/// Degenerate fan triangles never contain anything.
///
/// # Errors
///
/// Returns an error if `face` is out of bounds.
pub fn face_contains<M: FaceMesh>(mesh: &M, face: usize, point: &Point3<f64>) -> ClosestResult<bool> {
    Ok(mesh
        .face_triangles(face)?
        .iter()
        .any(|triangle| triangle.contains(point).unwrap_or(false)))
}

/// First face, in mesh order, that contains `point`.
///
/// # Errors
///
/// Returns an error for mesh lookup failures.
pub fn containing_face<M: FaceMesh>(mesh: &M, point: &Point3<f64>) -> ClosestResult<Option<usize>> {
    for face in mesh.faces() {
        if face_contains(mesh, face, point)? {
            return Ok(Some(face));
        }
    }
    Ok(None)
}
