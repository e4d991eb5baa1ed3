//! Error types for streamline tracing.

use field_closest::ClosestError;
use field_mesh::MeshError;
use field_types::{GeometryError, Point3};
use thiserror::Error;

/// Result type for tracing operations.
pub type TraceResult<T> = Result<T, TraceError>;

/// Errors that can occur while tracing streamlines.
#[derive(Debug, Error)]
pub enum TraceError {
    /// No face contains the seed and none lies within the seed tolerance.
    #[error("no face contains or lies near seed {seed}")]
    NoContainingFace {
        /// The unresolved seed.
        seed: Point3<f64>,
    },

    /// Step length must be positive and finite.
    #[error("invalid step length: {0} (must be positive and finite)")]
    InvalidStepLength(f64),

    /// A tracing parameter is out of range.
    #[error("invalid parameter {name}: {value}")]
    InvalidParams {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Field, adjacency and mesh disagree on the number of faces.
    #[error("field has {vectors} vectors but the mesh has {faces} faces")]
    FieldSizeMismatch {
        /// Faces in the mesh.
        faces: usize,
        /// Vectors in the field or entries in the adjacency.
        vectors: usize,
    },

    /// Closest-point or containment query failed.
    #[error(transparent)]
    Closest(#[from] ClosestError),

    /// Mesh lookup failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Invalid geometric input, such as a non-finite initial direction.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TraceError::InvalidStepLength(-0.5);
        assert!(format!("{err}").contains("-0.5"));

        let err = TraceError::InvalidParams {
            name: "min_length",
            value: -1.0,
        };
        assert!(format!("{err}").contains("min_length"));

        let err = TraceError::NoContainingFace {
            seed: Point3::new(5.0, 5.0, 0.0),
        };
        assert!(format!("{err}").contains("seed"));
    }

    #[test]
    fn test_from_mesh_error() {
        let err: TraceError = MeshError::EmptyMesh.into();
        assert!(matches!(err, TraceError::Mesh(MeshError::EmptyMesh)));
    }
}
