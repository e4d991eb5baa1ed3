//! Error types for mesh and field construction.

use field_types::GeometryError;
use thiserror::Error;

/// Result type for mesh and field operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building or querying a mesh or a field.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Mesh has no faces.
    #[error("mesh is empty")]
    EmptyMesh,

    /// Face index is out of bounds.
    #[error("face index {face} out of bounds (mesh has {face_count} faces)")]
    FaceOutOfBounds {
        /// The invalid face index.
        face: usize,
        /// Total number of faces in the mesh.
        face_count: usize,
    },

    /// Vertex index is out of bounds.
    #[error("vertex index {vertex} out of bounds (mesh has {vertex_count} vertices)")]
    VertexOutOfBounds {
        /// The invalid vertex index.
        vertex: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Face has fewer than three vertices.
    #[error("face {face} has {arity} vertices (need at least 3)")]
    InvalidFace {
        /// The offending face.
        face: usize,
        /// Number of vertices it references.
        arity: usize,
    },

    /// Face has no well-defined normal.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// The offending face.
        face: usize,
    },

    /// A face lacks the requested vector attribute.
    #[error("vector '{tag}' not defined on face {face}")]
    MissingFieldAttribute {
        /// First face found without the attribute.
        face: usize,
        /// Requested attribute tag.
        tag: String,
    },

    /// A field vector cannot be normalized.
    #[error("vector '{tag}' on face {face} has no direction: {source}")]
    ZeroFieldVector {
        /// The offending face.
        face: usize,
        /// Attribute tag.
        tag: String,
        /// Underlying geometric failure.
        source: GeometryError,
    },

    /// Per-face data does not match the face count.
    #[error("expected {expected} per-face values, got {actual}")]
    SizeMismatch {
        /// Number of faces.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
}
