//! Polygon mesh with tagged per-face vectors.

use field_types::{Point3, Vector3, normalize};
use hashbrown::HashMap;

use crate::error::{MeshError, MeshResult};
use crate::traits::FaceMesh;

/// A polygon mesh whose faces carry string-tagged vector attributes.
///
/// Faces reference vertices by index and may have any arity of at least
/// three. Attributes mirror the data a structural analysis attaches to each
/// face (`"n_1"`, `"m_1"`, `"ps_1_top"`, ...).
///
/// # Example
///
/// ```
/// use field_mesh::{FaceMesh, PolyMesh};
/// use field_types::{Point3, Vector3};
///
/// let mut mesh = PolyMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 1.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// let face = mesh.add_face(&[0, 1, 2, 3])?;
/// mesh.set_face_attribute(face, "ps_1_top", Vector3::x())?;
///
/// assert_eq!(mesh.face_count(), 1);
/// assert!((mesh.face_area(face)? - 1.0).abs() < 1e-12);
/// # Ok::<(), field_mesh::MeshError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolyMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    faces: Vec<Vec<u32>>,
    attributes: Vec<HashMap<String, Vector3<f64>>>,
}

impl PolyMesh {
    /// Create a new empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and polygon faces.
    ///
    /// # Errors
    ///
    /// Returns an error if a face has fewer than three vertices or references
    /// a missing vertex.
    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<Vec<u32>>) -> MeshResult<Self> {
        let mut mesh = Self {
            vertices,
            faces: Vec::with_capacity(faces.len()),
            attributes: Vec::with_capacity(faces.len()),
        };
        for face in &faces {
            mesh.add_face(face)?;
        }
        Ok(mesh)
    }

    /// Append a face and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the face has fewer than three vertices or
    /// references a missing vertex.
    pub fn add_face(&mut self, indices: &[u32]) -> MeshResult<usize> {
        let face = self.faces.len();
        if indices.len() < 3 {
            return Err(MeshError::InvalidFace {
                face,
                arity: indices.len(),
            });
        }
        if let Some(&vertex) = indices
            .iter()
            .find(|&&v| v as usize >= self.vertices.len())
        {
            return Err(MeshError::VertexOutOfBounds {
                vertex,
                vertex_count: self.vertices.len(),
            });
        }
        self.faces.push(indices.to_vec());
        self.attributes.push(HashMap::new());
        Ok(face)
    }

    /// Vertex indices of a face.
    #[must_use]
    pub fn face_indices(&self, face: usize) -> Option<&[u32]> {
        self.faces.get(face).map(Vec::as_slice)
    }

    /// Iterate over all faces as vertex index lists.
    pub fn face_index_lists(&self) -> impl Iterator<Item = &[u32]> {
        self.faces.iter().map(Vec::as_slice)
    }

    /// Store a vector attribute on a face.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of bounds.
    pub fn set_face_attribute(
        &mut self,
        face: usize,
        tag: &str,
        vector: Vector3<f64>,
    ) -> MeshResult<()> {
        let face_count = self.faces.len();
        let bag = self
            .attributes
            .get_mut(face)
            .ok_or(MeshError::FaceOutOfBounds { face, face_count })?;
        bag.insert(tag.to_string(), vector);
        Ok(())
    }

    /// Store one vector per face under `tag`.
    ///
    /// # Errors
    ///
    /// Returns an error if `vectors` does not have one entry per face.
    pub fn set_face_attributes(&mut self, tag: &str, vectors: &[Vector3<f64>]) -> MeshResult<()> {
        if vectors.len() != self.faces.len() {
            return Err(MeshError::SizeMismatch {
                expected: self.faces.len(),
                actual: vectors.len(),
            });
        }
        for (bag, vector) in self.attributes.iter_mut().zip(vectors) {
            bag.insert(tag.to_string(), *vector);
        }
        Ok(())
    }

    /// Tags present on a face, sorted.
    #[must_use]
    pub fn face_tags(&self, face: usize) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .attributes
            .get(face)
            .map(|bag| bag.keys().map(String::as_str).collect())
            .unwrap_or_default();
        tags.sort_unstable();
        tags
    }

    fn indices(&self, face: usize) -> MeshResult<&[u32]> {
        self.face_indices(face).ok_or(MeshError::FaceOutOfBounds {
            face,
            face_count: self.faces.len(),
        })
    }
}

impl FaceMesh for PolyMesh {
    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face_vertices(&self, face: usize) -> MeshResult<Vec<Point3<f64>>> {
        Ok(self
            .indices(face)?
            .iter()
            .map(|&i| self.vertices[i as usize])
            .collect())
    }

    #[allow(clippy::cast_precision_loss)]
    fn face_centroid(&self, face: usize) -> MeshResult<Point3<f64>> {
        let indices = self.indices(face)?;
        let sum = indices
            .iter()
            .fold(Vector3::zeros(), |acc, &i| acc + self.vertices[i as usize].coords);
        Ok(Point3::from(sum / indices.len() as f64))
    }

    /// Newell's method, so non-planar polygons still get an averaged normal.
    fn face_normal(&self, face: usize) -> MeshResult<Vector3<f64>> {
        let indices = self.indices(face)?;
        let mut normal = Vector3::zeros();
        for (k, &i) in indices.iter().enumerate() {
            let a = self.vertices[i as usize];
            let b = self.vertices[indices[(k + 1) % indices.len()] as usize];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        normalize(&normal).map_err(|_| MeshError::DegenerateFace { face })
    }

    fn face_attribute(&self, face: usize, tag: &str) -> MeshResult<Option<Vector3<f64>>> {
        self.indices(face)?;
        Ok(self.attributes[face].get(tag).copied())
    }
}

/// Create a flat rectangular grid of quads in the XY plane.
///
/// The grid spans `[0, nx * dx] x [0, ny * dy]` at `z = 0`. Faces are
/// numbered row by row starting at the origin, with counter-clockwise
/// winding (normals along +Z).
///
/// # Example
///
/// ```
/// use field_mesh::{planar_grid, FaceMesh};
///
/// let mesh = planar_grid(3, 2, 1.0, 1.0);
/// assert_eq!(mesh.face_count(), 6);
/// assert_eq!(mesh.vertices.len(), 12);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn planar_grid(nx: usize, ny: usize, dx: f64, dy: f64) -> PolyMesh {
    let mut mesh = PolyMesh::new();
    for j in 0..=ny {
        for i in 0..=nx {
            mesh.vertices
                .push(Point3::new(i as f64 * dx, j as f64 * dy, 0.0));
        }
    }

    let stride = (nx + 1) as u32;
    for j in 0..ny as u32 {
        for i in 0..nx as u32 {
            let v0 = j * stride + i;
            mesh.faces.push(vec![v0, v0 + 1, v0 + stride + 1, v0 + stride]);
            mesh.attributes.push(HashMap::new());
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> PolyMesh {
        planar_grid(1, 1, 1.0, 1.0)
    }

    #[test]
    fn add_face_validates_arity() {
        let mut mesh = PolyMesh::new();
        mesh.vertices.push(Point3::origin());
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        let err = mesh.add_face(&[0, 1]);
        assert!(matches!(err, Err(MeshError::InvalidFace { arity: 2, .. })));
    }

    #[test]
    fn add_face_validates_indices() {
        let mut mesh = PolyMesh::new();
        mesh.vertices.push(Point3::origin());
        let err = mesh.add_face(&[0, 1, 2]);
        assert!(matches!(err, Err(MeshError::VertexOutOfBounds { vertex: 1, .. })));
    }

    #[test]
    fn square_queries() {
        let mesh = unit_square();
        assert_eq!(mesh.face_count(), 1);
        assert_relative_eq!(
            mesh.face_centroid(0).unwrap(),
            Point3::new(0.5, 0.5, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(mesh.face_normal(0).unwrap(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(mesh.face_area(0).unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(mesh.face_triangles(0).unwrap().len(), 2);
    }

    #[test]
    fn degenerate_face_has_no_normal() {
        let vertices = vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let mesh = PolyMesh::from_parts(vertices, vec![vec![0, 1, 2]]).unwrap();
        assert!(matches!(
            mesh.face_normal(0),
            Err(MeshError::DegenerateFace { face: 0 })
        ));
    }

    #[test]
    fn attributes_round_trip() {
        let mut mesh = planar_grid(2, 1, 1.0, 1.0);
        mesh.set_face_attributes("m_1", &[Vector3::x(), Vector3::y()])
            .unwrap();
        mesh.set_face_attribute(1, "n_1", Vector3::z()).unwrap();

        assert_eq!(mesh.face_attribute(0, "m_1").unwrap(), Some(Vector3::x()));
        assert_eq!(mesh.face_attribute(0, "n_1").unwrap(), None);
        assert_eq!(mesh.face_tags(1), vec!["m_1", "n_1"]);
    }

    #[test]
    fn attributes_size_mismatch() {
        let mut mesh = planar_grid(2, 1, 1.0, 1.0);
        let err = mesh.set_face_attributes("m_1", &[Vector3::x()]);
        assert!(matches!(
            err,
            Err(MeshError::SizeMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn out_of_bounds_queries() {
        let mesh = unit_square();
        assert!(mesh.face_vertices(5).is_err());
        assert!(mesh.face_attribute(5, "m_1").is_err());
    }

    #[test]
    fn grid_layout() {
        let mesh = planar_grid(3, 2, 0.5, 2.0);
        assert_eq!(mesh.face_count(), 6);
        // Face 4 is the second face of the second row.
        assert_relative_eq!(
            mesh.face_centroid(4).unwrap(),
            Point3::new(0.75, 3.0, 0.0),
            epsilon = 1e-12
        );
        for face in mesh.faces() {
            assert_relative_eq!(mesh.face_normal(face).unwrap(), Vector3::z(), epsilon = 1e-12);
        }
    }
}
