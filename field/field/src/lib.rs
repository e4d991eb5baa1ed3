//! Streamlines and face clustering for directional fields on surface meshes.
//!
//! This umbrella crate re-exports the field-* crates. A line field assigns
//! every mesh face an undirected direction, such as a principal stress or
//! curvature direction. The toolkit traces evenly spaced streamlines through
//! such a field and partitions faces into clusters of similar direction.
//!
//! # Quick Start
//!
//! ```
//! use field::prelude::*;
//!
//! let mut mesh = planar_grid(4, 4, 1.0, 1.0);
//! let vectors: Vec<Vector3<f64>> = (0..16)
//!     .map(|i| if i % 4 < 2 { Vector3::x() } else { Vector3::y() })
//!     .collect();
//! mesh.set_face_attributes("ps_1_top", &vectors)?;
//!
//! // Cluster the field into two directions
//! let field = Field::from_mesh(&mesh, "ps_1_top", FieldOptions::default())?;
//! let clusters = cluster(&field, &ClusterParams::with_clusters(2))?;
//! assert_eq!(clusters.k(), 2);
//!
//! // Trace a streamline through it
//! let mut system = StreamSystem::from_poly_mesh(&mesh, "ps_1_top", TraceParams::with_step_length(0.1))?;
//! let line = system.trace_seed(&Point3::new(0.5, 0.5, 0.0))?;
//! assert!(line.length > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Lines, vectors, planar triangles and barycentric coordinates
//! - [`mesh`] - The `FaceMesh` trait, `PolyMesh`, adjacency, fields, glyphs
//! - [`closest`] - Closest-point and containment queries
//! - [`cluster`] - K-means clustering of faces and error curves
//! - [`trace`] - Streamline tracing and sessions
//!
//! # Feature Flags
//!
//! - `serde` - Serialize output types and parameters

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Lines, vectors, planar triangles and barycentric coordinates.
pub use field_types as types;

/// The `FaceMesh` trait, `PolyMesh`, adjacency, fields and glyphs.
pub use field_mesh as mesh;

/// Closest-point and containment queries.
pub use field_closest as closest;

/// K-means clustering of faces by line direction.
pub use field_cluster as cluster;

/// Streamline tracing and sessions.
pub use field_trace as trace;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for line-field processing.
///
/// # Usage
///
/// ```
/// use field::prelude::*;
/// ```
pub mod prelude {
    // Geometry
    pub use field_types::{Line, Point3, Vector3, align_vector, normalize};

    // Meshes and fields
    pub use field_mesh::{
        FaceAdjacency, FaceMesh, Field, FieldOptions, PolyMesh, planar_grid, umbilic_faces,
        vector_lines_on_faces,
    };

    // Queries
    pub use field_closest::{ClosestPoint, closest_point};

    // Clustering
    pub use field_cluster::{ClusterParams, cluster, error_curve, furthest_init};

    // Tracing
    pub use field_trace::{StopReason, StreamSystem, Streamline, TraceParams, trace};
}

// =============================================================================
// Tests
// =============================================================================
