//! K-means clustering of mesh faces by line-field direction.
//!
//! Faces are grouped so that the line carried by each face stays close to
//! the proxy line of its cluster. Lines are undirected: `v` and `-v` belong
//! together, so every distance here is the aligned distance
//! `|align(v, p) - p|` between unit vectors.
//!
//! # Algorithm
//!
//! 1. **Seeding** - furthest-point sampling from a start face
//! 2. **Assignment** - every face joins its nearest proxy
//! 3. **Update** - every proxy becomes the aligned mean of its members
//! 4. **Repair** (optional) - close proxies merge, and the freed slot splits
//!    a poorly fitting cluster, keeping K constant
//!
//! Steps 2-4 repeat until no assignment changes or the iteration budget is
//! spent. The result is a local optimum.
//!
//! # Example
//!
//! ```
//! use field_cluster::{ClusterParams, cluster};
//! use field_mesh::Field;
//! use nalgebra::Vector3;
//!
//! let field = Field::from_vectors(
//!     "dir",
//!     vec![
//!         Vector3::new(1.0, 0.05, 0.0),
//!         Vector3::new(-1.0, 0.0, 0.0),
//!         Vector3::new(0.0, 1.0, 0.0),
//!         Vector3::new(0.05, -1.0, 0.0),
//!     ],
//! );
//!
//! let result = cluster(&field, &ClusterParams::with_clusters(2))?;
//! assert_eq!(result.k(), 2);
//! assert_eq!(result.assignment(), vec![1, 1, 2, 2]);
//! # Ok::<(), field_cluster::ClusterError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod curve;
mod error;
mod kmeans;
mod params;
mod result;
mod seed;

pub use curve::error_curve;
pub use error::{ClusterError, ClusterResult};
pub use kmeans::cluster;
pub use params::ClusterParams;
pub use result::{Cluster, ClusterResult as ClusterOutput};
pub use seed::furthest_init;
