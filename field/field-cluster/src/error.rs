//! Error types for face clustering.

use field_types::GeometryError;
use thiserror::Error;

/// Result type for clustering operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors that can occur during clustering.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Field has no faces.
    #[error("field has no faces")]
    EmptyField,

    /// Cluster count must be at least one.
    #[error("invalid cluster count: {0} (must be >= 1)")]
    InvalidClusterCount(usize),

    /// More clusters than faces were requested.
    #[error("cannot build {k} clusters from {faces} faces")]
    TooManyClusters {
        /// Requested cluster count.
        k: usize,
        /// Faces available.
        faces: usize,
    },

    /// Iteration budget must be at least one.
    #[error("invalid iteration count: {0} (must be >= 1)")]
    InvalidIterations(u32),

    /// Seeding face is out of bounds.
    #[error("start face {face} out of bounds (field has {face_count} faces)")]
    FaceOutOfBounds {
        /// The invalid face index.
        face: usize,
        /// Number of faces in the field.
        face_count: usize,
    },

    /// A face vector or proxy has no direction.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
