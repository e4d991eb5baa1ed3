//! Error types for closest-point queries.

use field_mesh::MeshError;
use field_types::GeometryError;
use thiserror::Error;

/// Result type for closest-point queries.
pub type ClosestResult<T> = Result<T, ClosestError>;

/// Errors that can occur during closest-point and containment queries.
#[derive(Debug, Error)]
pub enum ClosestError {
    /// Mesh lookup failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Geometric primitive failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ClosestError {
    /// Whether the error only concerns one degenerate face.
    ///
    /// Scans over the whole mesh skip such faces instead of failing.
    #[must_use]
    pub const fn is_degenerate_face(&self) -> bool {
        matches!(
            self,
            Self::Geometry(GeometryError::DegenerateTriangle { .. })
                | Self::Mesh(MeshError::DegenerateFace { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_classification() {
        let err = ClosestError::from(GeometryError::DegenerateTriangle { denominator: 0.0 });
        assert!(err.is_degenerate_face());

        let err = ClosestError::from(MeshError::DegenerateFace { face: 2 });
        assert!(err.is_degenerate_face());
        assert!(format!("{err}").contains("face 2"));

        let err = ClosestError::from(MeshError::FaceOutOfBounds {
            face: 9,
            face_count: 1,
        });
        assert!(!err.is_degenerate_face());
    }
}
