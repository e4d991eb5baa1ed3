//! Closest-point and containment queries on polygon meshes.
//!
//! Every query here is a brute-force scan over the faces of a
//! [`field_mesh::FaceMesh`], in mesh order. That order is part of the
//! contract: when several faces are equally close, the first one wins.
//!
//! # Example
//!
//! ```
//! use field_closest::{closest_point, containing_face};
//! use field_mesh::planar_grid;
//! use field_types::Point3;
//!
//! let mesh = planar_grid(3, 3, 1.0, 1.0);
//!
//! let hit = closest_point(&mesh, &Point3::new(3.0, 2.5, 0.5))?.unwrap();
//! assert_eq!(hit.face, 8);
//!
//! assert_eq!(containing_face(&mesh, &Point3::new(0.5, 0.5, 0.0))?, Some(0));
//! # Ok::<(), field_closest::ClosestError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod closest;
mod error;

pub use closest::{ClosestPoint, closest_point, closest_point_on_face, containing_face, face_contains};
pub use error::{ClosestError, ClosestResult};
