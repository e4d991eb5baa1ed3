//! Polygon meshes and per-face vector fields.
//!
//! This crate is the boundary between a structural mesh and the algorithms
//! that consume its directional data:
//!
//! - [`FaceMesh`] - Read-only query surface any mesh can implement
//! - [`PolyMesh`] - A polygon mesh with string-tagged face vectors
//! - [`FaceAdjacency`] - Shared-edge face neighbours
//! - [`Field`] - One tag's vectors, validated eagerly and immutable
//!
//! It also ships two field utilities: [`vector_lines_on_faces`] for
//! glyph-style visualization and [`umbilic_faces`] for picking streamline
//! seeds.
//!
//! # Example
//!
//! ```
//! use field_mesh::{planar_grid, Field, FieldOptions, FaceAdjacency, FaceMesh};
//! use field_types::Vector3;
//!
//! let mut mesh = planar_grid(4, 2, 0.5, 0.5);
//! let vectors = vec![Vector3::new(1.0, 0.2, 0.0); mesh.face_count()];
//! mesh.set_face_attributes("ps_1_top", &vectors)?;
//!
//! let field = Field::from_mesh(&mesh, "ps_1_top", FieldOptions::default())?;
//! let adjacency = FaceAdjacency::from_mesh(&mesh);
//! assert_eq!(field.len(), 8);
//! assert_eq!(adjacency.neighbors(0), &[1, 4]);
//! # Ok::<(), field_mesh::MeshError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod adjacency;
mod error;
mod field;
mod glyph;
mod mesh;
mod traits;
mod umbilic;

pub use adjacency::FaceAdjacency;
pub use error::{MeshError, MeshResult};
pub use field::{Field, FieldOptions};
pub use glyph::{FieldGlyph, vector_lines_on_faces};
pub use mesh::{PolyMesh, planar_grid};
pub use traits::FaceMesh;
pub use umbilic::{FaceLabel, label_faces, umbilic_faces};
