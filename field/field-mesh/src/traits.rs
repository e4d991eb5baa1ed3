//! Read-only query surface over a polygon mesh.

use field_types::{Point3, Triangle, Vector3};

use crate::error::MeshResult;

/// Trait for meshes that can back a per-face field.
///
/// Faces are identified by `0..face_count()`; [`FaceMesh::faces`] iterates
/// them in the order every query in this workspace uses to break ties.
/// Implementations must keep face winding consistent so normals agree.
pub trait FaceMesh {
    /// Number of faces.
    fn face_count(&self) -> usize;

    /// Vertex positions of a face, in winding order.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of bounds.
    fn face_vertices(&self, face: usize) -> MeshResult<Vec<Point3<f64>>>;

    /// Centroid of a face (mean of its vertices).
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of bounds.
    fn face_centroid(&self, face: usize) -> MeshResult<Point3<f64>>;

    /// Unit normal of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of bounds or degenerate.
    fn face_normal(&self, face: usize) -> MeshResult<Vector3<f64>>;

    /// Vector attribute stored on a face under `tag`.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of bounds.
    fn face_attribute(&self, face: usize, tag: &str) -> MeshResult<Option<Vector3<f64>>>;

    /// Iterate over face ids in mesh order.
    fn faces(&self) -> impl Iterator<Item = usize> {
        0..self.face_count()
    }

    /// Check if the mesh has no faces.
    fn is_empty(&self) -> bool {
        self.face_count() == 0
    }

    /// Fan triangulation of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of bounds.
    fn face_triangles(&self, face: usize) -> MeshResult<Vec<Triangle>> {
        let vertices = self.face_vertices(face)?;
        Ok(Triangle::fan(&vertices).collect())
    }

    /// Area of a face (sum of its fan triangles).
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of bounds.
    fn face_area(&self, face: usize) -> MeshResult<f64> {
        Ok(self.face_triangles(face)?.iter().map(Triangle::area).sum())
    }
}
