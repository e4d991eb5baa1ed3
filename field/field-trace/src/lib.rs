//! Streamline tracing through line fields on polygon meshes.
//!
//! A line field assigns each face an undirected direction. A streamline
//! follows it with fixed-length steps, keeping its orientation consistent
//! from step to step since `v` and `-v` describe the same line.
//!
//! - [`trace`] traces a single line against a read-only
//!   [`ProximityRegistry`]
//! - [`StreamSystem`] is a session: it traces seeds in order and registers
//!   every accepted line, so later lines keep their distance from earlier
//!   ones
//!
//! Lines stop at the mesh boundary, when the step budget runs out, or when a
//! heuristic fires; see [`StopReason`] and [`StopCause`].
//!
//! # Example
//!
//! ```
//! use field_mesh::planar_grid;
//! use field_trace::{StopReason, StreamSystem, TraceParams};
//! use field_types::{Point3, Vector3};
//!
//! let mut mesh = planar_grid(3, 1, 1.0, 1.0);
//! mesh.set_face_attributes("dir", &[Vector3::x(), -Vector3::x(), Vector3::x()])?;
//!
//! let mut system = StreamSystem::from_poly_mesh(&mesh, "dir", TraceParams::with_step_length(0.1))?;
//! let line = system.trace_seed(&Point3::new(0.5, 0.5, 0.0))?;
//!
//! assert_eq!(line.faces, vec![0, 1, 2]);
//! assert_eq!(line.stop_reason, StopReason::ReachedBoundary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod params;
mod registry;
mod streamline;
mod system;
mod tracer;

pub use error::{TraceError, TraceResult};
pub use params::TraceParams;
pub use registry::ProximityRegistry;
pub use streamline::{StopCause, StopReason, Streamline};
pub use system::{SeedSummary, StreamSystem};
pub use tracer::trace;
