//! Furthest-point seeding.

use field_mesh::Field;
use field_types::{Vector3, aligned_distance, normalize};
use tracing::debug;

use crate::error::{ClusterError, ClusterResult};

/// Normalize every face vector of a field.
///
/// # Errors
///
/// Returns [`ClusterError::Geometry`] if a face vector has zero length.
pub(crate) fn unit_vectors(field: &Field) -> ClusterResult<Vec<Vector3<f64>>> {
    field
        .vectors()
        .iter()
        .enumerate()
        .map(|(face, v)| {
            normalize(v).map_err(|err| {
                debug!(face, "face vector has no direction");
                ClusterError::from(err)
            })
        })
        .collect()
}

/// Check that `k` clusters can be seeded from `face_count` faces.
pub(crate) fn validate(face_count: usize, k: usize, start_face: usize) -> ClusterResult<()> {
    if face_count == 0 {
        return Err(ClusterError::EmptyField);
    }
    if k == 0 {
        return Err(ClusterError::InvalidClusterCount(k));
    }
    if k > face_count {
        return Err(ClusterError::TooManyClusters {
            k,
            faces: face_count,
        });
    }
    if start_face >= face_count {
        return Err(ClusterError::FaceOutOfBounds {
            face: start_face,
            face_count,
        });
    }
    Ok(())
}

/// Pick `k` seed faces by furthest-point sampling over line directions.
///
/// The first seed is `start_face`. Each following seed is the face whose
/// minimum aligned distance to the seeds chosen so far is largest; ties go
/// to the lowest face id. A face is never chosen twice.
///
/// # Errors
///
/// Returns an error if the field is empty, `k` is zero or exceeds the face
/// count, `start_face` is out of bounds, or a face vector has zero length.
///
/// # Examples
///
/// ```
/// use field_cluster::furthest_init;
/// use field_mesh::Field;
/// use nalgebra::Vector3;
///
/// let field = Field::from_vectors(
///     "dir",
///     vec![Vector3::x(), Vector3::new(1.0, 0.1, 0.0), Vector3::y()],
/// );
/// let seeds = furthest_init(&field, 2, 0)?;
/// assert_eq!(seeds, vec![0, 2]);
/// # Ok::<(), field_cluster::ClusterError>(())
/// ```
pub fn furthest_init(field: &Field, k: usize, start_face: usize) -> ClusterResult<Vec<usize>> {
    validate(field.len(), k, start_face)?;
    let units = unit_vectors(field)?;
    Ok(furthest_seeds(&units, k, start_face))
}

/// Seeding over pre-normalized directions. Inputs must already be validated.
pub(crate) fn furthest_seeds(units: &[Vector3<f64>], k: usize, start_face: usize) -> Vec<usize> {
    let mut chosen = vec![false; units.len()];
    let mut seeds = Vec::with_capacity(k);

    chosen[start_face] = true;
    seeds.push(start_face);

    let first = units[start_face];
    let mut nearest: Vec<f64> = units.iter().map(|u| aligned_distance(u, &first)).collect();

    while seeds.len() < k {
        let mut best: Option<(usize, f64)> = None;
        for (face, &dist) in nearest.iter().enumerate() {
            if chosen[face] {
                continue;
            }
            if best.is_none_or(|(_, best_dist)| dist > best_dist) {
                best = Some((face, dist));
            }
        }

        // k <= face count, so an unchosen face always remains
        let Some((face, dist)) = best else {
            break;
        };

        debug!(seed = seeds.len() + 1, face, distance = dist, "seed chosen");
        chosen[face] = true;
        seeds.push(face);

        let proxy = units[face];
        for (slot, u) in nearest.iter_mut().zip(units) {
            *slot = slot.min(aligned_distance(u, &proxy));
        }
    }

    seeds
}
