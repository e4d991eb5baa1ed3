//! Per-face vector fields.

use field_types::{Vector3, normalize};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::traits::FaceMesh;

/// Options for building a [`Field`] from mesh attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldOptions {
    /// Normalize every vector at construction.
    pub normalize: bool,
    /// Weight faces by their area instead of uniformly.
    pub area_weights: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            area_weights: false,
        }
    }
}

impl FieldOptions {
    /// Keep raw magnitudes.
    #[must_use]
    pub const fn raw() -> Self {
        Self {
            normalize: false,
            area_weights: false,
        }
    }

    /// Set whether vectors are normalized.
    #[must_use]
    pub const fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set whether faces are weighted by area.
    #[must_use]
    pub const fn with_area_weights(mut self, area_weights: bool) -> Self {
        self.area_weights = area_weights;
        self
    }
}

/// An immutable per-face vector field for one attribute tag.
///
/// Entry `i` belongs to face `i` of the mesh it was built from. Fields are
/// validated when built: a face without the tag fails construction instead
/// of surfacing later during tracing or clustering.
///
/// # Example
///
/// ```
/// use field_mesh::{planar_grid, Field, FieldOptions};
/// use field_types::Vector3;
///
/// let mut mesh = planar_grid(2, 1, 1.0, 1.0);
/// mesh.set_face_attributes("ps_1_top", &[Vector3::new(2.0, 0.0, 0.0), Vector3::y()])?;
///
/// let field = Field::from_mesh(&mesh, "ps_1_top", FieldOptions::default())?;
/// assert_eq!(field.len(), 2);
/// assert!((field.vector(0).unwrap().norm() - 1.0).abs() < 1e-12);
///
/// assert!(Field::from_mesh(&mesh, "m_1", FieldOptions::default()).is_err());
/// # Ok::<(), field_mesh::MeshError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    tag: String,
    vectors: Vec<Vector3<f64>>,
    weights: Vec<f64>,
}

impl Field {
    /// Build a field from the `tag` attribute of every face.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MissingFieldAttribute`] for the first face
    /// lacking the tag, and [`MeshError::ZeroFieldVector`] when normalization
    /// is requested for a vector without direction.
    pub fn from_mesh<M: FaceMesh>(mesh: &M, tag: &str, options: FieldOptions) -> MeshResult<Self> {
        let mut vectors = Vec::with_capacity(mesh.face_count());
        let mut weights = Vec::with_capacity(mesh.face_count());

        for face in mesh.faces() {
            let vector = mesh
                .face_attribute(face, tag)?
                .ok_or_else(|| MeshError::MissingFieldAttribute {
                    face,
                    tag: tag.to_string(),
                })?;

            let vector = if options.normalize {
                normalize(&vector).map_err(|source| MeshError::ZeroFieldVector {
                    face,
                    tag: tag.to_string(),
                    source,
                })?
            } else {
                vector
            };
            vectors.push(vector);

            weights.push(if options.area_weights {
                mesh.face_area(face)?
            } else {
                1.0
            });
        }

        debug!(
            tag,
            faces = vectors.len(),
            normalized = options.normalize,
            "Built face field"
        );

        Ok(Self {
            tag: tag.to_string(),
            vectors,
            weights,
        })
    }

    /// Build a uniformly weighted field from raw vectors.
    #[must_use]
    pub fn from_vectors(tag: impl Into<String>, vectors: Vec<Vector3<f64>>) -> Self {
        let weights = vec![1.0; vectors.len()];
        Self {
            tag: tag.into(),
            vectors,
            weights,
        }
    }

    /// Replace the per-face weights.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::SizeMismatch`] unless there is one weight per face.
    pub fn with_weights(mut self, weights: Vec<f64>) -> MeshResult<Self> {
        if weights.len() != self.vectors.len() {
            return Err(MeshError::SizeMismatch {
                expected: self.vectors.len(),
                actual: weights.len(),
            });
        }
        self.weights = weights;
        Ok(self)
    }

    /// Attribute tag this field was built from.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Number of faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the field covers no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector on a face.
    #[must_use]
    pub fn vector(&self, face: usize) -> Option<Vector3<f64>> {
        self.vectors.get(face).copied()
    }

    /// Weight of a face (1.0 unless area weighting was requested).
    #[must_use]
    pub fn weight(&self, face: usize) -> f64 {
        self.weights.get(face).copied().unwrap_or(0.0)
    }

    /// All vectors in face order.
    #[must_use]
    pub fn vectors(&self) -> &[Vector3<f64>] {
        &self.vectors
    }

    /// All weights in face order.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{PolyMesh, planar_grid};
    use approx::assert_relative_eq;
    use field_types::Point3;

    fn tagged_grid() -> PolyMesh {
        let mut mesh = planar_grid(2, 1, 2.0, 1.0);
        mesh.set_face_attributes("ps_1_top", &[Vector3::new(0.0, 3.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)])
            .unwrap();
        mesh
    }

    #[test]
    fn normalized_field() {
        let field = Field::from_mesh(&tagged_grid(), "ps_1_top", FieldOptions::default()).unwrap();
        assert_eq!(field.tag(), "ps_1_top");
        assert_relative_eq!(field.vector(0).unwrap(), Vector3::y());
        assert_relative_eq!(field.vector(1).unwrap(), -Vector3::x());
        assert_relative_eq!(field.weight(0), 1.0);
    }

    #[test]
    fn raw_field_keeps_magnitude() {
        let field = Field::from_mesh(&tagged_grid(), "ps_1_top", FieldOptions::raw()).unwrap();
        assert_relative_eq!(field.vector(0).unwrap().norm(), 3.0);
    }

    #[test]
    fn area_weights() {
        let options = FieldOptions::default().with_area_weights(true);
        let field = Field::from_mesh(&tagged_grid(), "ps_1_top", options).unwrap();
        assert_relative_eq!(field.weight(0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(field.weight(1), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_attribute_fails_fast() {
        let mut mesh = planar_grid(2, 1, 1.0, 1.0);
        mesh.set_face_attribute(0, "n_1", Vector3::x()).unwrap();
        let err = Field::from_mesh(&mesh, "n_1", FieldOptions::default());
        assert!(matches!(
            err,
            Err(MeshError::MissingFieldAttribute { face: 1, .. })
        ));
    }

    #[test]
    fn zero_vector_rejected_when_normalizing() {
        let vertices = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        let mut mesh = PolyMesh::from_parts(vertices, vec![vec![0, 1, 2]]).unwrap();
        mesh.set_face_attribute(0, "m_2", Vector3::zeros()).unwrap();

        assert!(matches!(
            Field::from_mesh(&mesh, "m_2", FieldOptions::default()),
            Err(MeshError::ZeroFieldVector { face: 0, .. })
        ));
        assert!(Field::from_mesh(&mesh, "m_2", FieldOptions::raw()).is_ok());
    }

    #[test]
    fn explicit_weights() {
        let field = Field::from_vectors("custom_1", vec![Vector3::x(), Vector3::y()]);
        assert!(field.clone().with_weights(vec![1.0]).is_err());
        let field = field.with_weights(vec![0.5, 2.0]).unwrap();
        assert_relative_eq!(field.weights()[1], 2.0);
        assert_relative_eq!(field.weight(7), 0.0);
    }
}
