//! Quantization error as a function of cluster count.

use field_mesh::Field;
use rayon::prelude::*;
use tracing::info;

use crate::error::ClusterResult;
use crate::kmeans::cluster;
use crate::params::ClusterParams;

/// Cluster `field` once per value of `ks` and report the final error of each.
///
/// Every run uses `params` with only `k` replaced, so all runs share the same
/// seeding face. Runs execute in parallel; the output follows the order of
/// `ks`.
///
/// # Errors
///
/// Returns the first error raised by any run, e.g. a `k` larger than the
/// face count.
///
/// # Examples
///
/// ```
/// use field_cluster::{ClusterParams, error_curve};
/// use field_mesh::Field;
/// use nalgebra::Vector3;
///
/// let field = Field::from_vectors(
///     "dir",
///     vec![Vector3::x(), Vector3::y(), Vector3::z()],
/// );
/// let curve = error_curve(&field, 1..=3, &ClusterParams::default())?;
///
/// assert_eq!(curve.len(), 3);
/// assert_eq!(curve[0].0, 1);
/// assert!(curve[2].1 < 1e-12);
/// # Ok::<(), field_cluster::ClusterError>(())
/// ```
pub fn error_curve<I>(field: &Field, ks: I, params: &ClusterParams) -> ClusterResult<Vec<(usize, f64)>>
where
    I: IntoIterator<Item = usize>,
{
    let ks: Vec<usize> = ks.into_iter().collect();

    info!(faces = field.len(), runs = ks.len(), "Computing error curve");

    ks.par_iter()
        .map(|&k| {
            let run = params.clone().with_k(k);
            cluster(field, &run).map(|result| (k, result.error))
        })
        .collect()
}
