//! Geometric primitives for line fields on surface meshes.
//!
//! This crate provides the numerical kernel shared by the closest-point,
//! clustering and tracing crates:
//!
//! - [`Triangle`] - A concrete triangle with planar barycentric queries
//! - [`Line`] - An undirected unit direction (`v` and `-v` are equal)
//! - [`align_vector`] / [`normalize`] - Sign-insensitive vector arithmetic
//!
//! # Line fields
//!
//! Principal stress directions have no canonical orientation. Every distance
//! or mean computed over such a field aligns its operands first, either
//! explicitly with [`align_vector`] or implicitly through [`Line`].
//!
//! # Planar queries
//!
//! Barycentric coordinates are solved in the XY plane. Reconstructed points
//! from [`barycentric_to_cartesian`] have `z = 0`.
//!
//! # Example
//!
//! ```
//! use field_types::{align_vector, barycentric_coordinates, Point3, Triangle, Vector3};
//!
//! let tri = Triangle::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! );
//! let bars = barycentric_coordinates(&Point3::new(0.2, 0.2, 0.0), &tri, false)?;
//! assert!((bars.iter().sum::<f64>() - 1.0).abs() < 1e-12);
//!
//! let v = align_vector(&Vector3::new(0.0, -1.0, 0.0), &Vector3::y());
//! assert!(v.y > 0.0);
//! # Ok::<(), field_types::GeometryError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod line;
mod triangle;
mod vector;

pub use error::{GeometryError, GeometryResult};
pub use line::Line;
pub use triangle::{
    CONTAINMENT_TOLERANCE, DEGENERATE_EPSILON, Triangle, barycentric_coordinates,
    barycentric_to_cartesian, is_point_in_triangle,
};
pub use vector::{
    ZERO_EPSILON, align_vector, aligned_distance, aligned_distance_squared,
    closest_point_on_plane, normalize,
};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
