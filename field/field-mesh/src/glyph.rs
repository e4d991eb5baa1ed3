//! Short line segments that visualize a field face by face.

use field_types::{Point3, normalize};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::field::Field;
use crate::traits::FaceMesh;

/// A segment centred on a face centroid, parallel to the face vector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldGlyph {
    /// Face the glyph belongs to.
    pub face: usize,
    /// Segment start.
    pub start: Point3<f64>,
    /// Segment end.
    pub end: Point3<f64>,
}

/// Build one glyph per face.
///
/// Each glyph extends `half_length` on either side of the centroid, where
/// `half_length` is `factor` when `uniform` is set and `|v| * factor`
/// otherwise.
///
/// # Errors
///
/// Returns an error if the field and mesh disagree on the face count or a
/// face vector has no direction.
///
/// # Example
///
/// ```
/// use field_mesh::{planar_grid, vector_lines_on_faces, Field};
/// use field_types::Vector3;
///
/// let mesh = planar_grid(1, 1, 1.0, 1.0);
/// let field = Field::from_vectors("ps_1_top", vec![Vector3::x()]);
/// let glyphs = vector_lines_on_faces(&mesh, &field, true, 0.05)?;
/// assert!(((glyphs[0].end - glyphs[0].start).norm() - 0.1).abs() < 1e-12);
/// # Ok::<(), field_mesh::MeshError>(())
/// ```
pub fn vector_lines_on_faces<M: FaceMesh>(
    mesh: &M,
    field: &Field,
    uniform: bool,
    factor: f64,
) -> MeshResult<Vec<FieldGlyph>> {
    if field.len() != mesh.face_count() {
        return Err(MeshError::SizeMismatch {
            expected: mesh.face_count(),
            actual: field.len(),
        });
    }

    mesh.faces()
        .zip(field.vectors())
        .map(|(face, vector)| {
            let direction = normalize(vector).map_err(|source| MeshError::ZeroFieldVector {
                face,
                tag: field.tag().to_string(),
                source,
            })?;
            let half_length = if uniform { factor } else { vector.norm() * factor };
            let centroid = mesh.face_centroid(face)?;
            Ok(FieldGlyph {
                face,
                start: centroid - direction * half_length,
                end: centroid + direction * half_length,
            })
        })
        .collect()
}
