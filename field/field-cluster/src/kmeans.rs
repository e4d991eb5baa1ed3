//! K-means clustering of faces by line direction.

// Cluster ids and counts stay far below u32::MAX
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use field_mesh::Field;
use field_types::{Vector3, align_vector, aligned_distance_squared, normalize};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{ClusterError, ClusterResult};
use crate::params::ClusterParams;
use crate::result::{Cluster, ClusterResult as ClusterOutput};
use crate::seed::{furthest_seeds, unit_vectors, validate};

/// 2-means passes used when splitting a cluster.
const SPLIT_ITERATIONS: usize = 10;

/// Partition the faces of a field into `params.k` clusters of similar line
/// direction.
///
/// Seeds come from furthest-point sampling starting at `params.start_face`.
/// Each iteration assigns every face to the proxy at the smallest aligned
/// distance (ties go to the lowest cluster id), then replaces every proxy by
/// the normalized mean of its members aligned to the previous proxy.
/// Iteration stops when no assignment changes or the budget runs out. The
/// result is a local optimum.
///
/// # Errors
///
/// Returns an error if:
/// - The field is empty
/// - `k` is zero or exceeds the face count
/// - `start_face` is out of bounds
/// - The iteration count is 0
/// - A face vector has zero length
///
/// # Examples
///
/// ```
/// use field_cluster::{ClusterParams, cluster};
/// use field_mesh::Field;
/// use nalgebra::Vector3;
///
/// let field = Field::from_vectors(
///     "dir",
///     vec![Vector3::x(), -Vector3::x(), Vector3::y(), Vector3::y()],
/// );
/// let result = cluster(&field, &ClusterParams::with_clusters(2))?;
///
/// assert_eq!(result.assignment(), vec![1, 1, 2, 2]);
/// assert!(result.error < 1e-12);
/// # Ok::<(), field_cluster::ClusterError>(())
/// ```
pub fn cluster(field: &Field, params: &ClusterParams) -> ClusterResult<ClusterOutput> {
    validate(field.len(), params.k, params.start_face)?;
    if params.max_iterations == 0 {
        return Err(ClusterError::InvalidIterations(params.max_iterations));
    }

    let units = unit_vectors(field)?;
    let weights: Vec<f64> = if params.weighted {
        field.weights().to_vec()
    } else {
        vec![1.0; units.len()]
    };

    info!(
        faces = units.len(),
        k = params.k,
        max_iterations = params.max_iterations,
        merge_split = params.merge_split,
        "Clustering line field"
    );

    let seeds = furthest_seeds(&units, params.k, params.start_face);
    let mut proxies: Vec<Vector3<f64>> = seeds.iter().map(|&face| units[face]).collect();
    let mut assignment = vec![usize::MAX; units.len()];
    let mut error_history = Vec::with_capacity(params.max_iterations as usize);
    let mut iterations = 0;
    let mut converged = false;

    for iter in 0..params.max_iterations {
        iterations = iter + 1;

        let changed = assign(&units, &proxies, &mut assignment);
        update_proxies(&units, &weights, &assignment, &mut proxies);
        let error = quantization_error(&units, &assignment, &proxies);
        error_history.push(error);

        debug!(iteration = iterations, changed, error, "Clustering iteration");

        if changed == 0 {
            debug!("Converged at iteration {}", iterations);
            converged = true;
            break;
        }

        // Repairs only happen when another assignment pass follows.
        if params.merge_split && iterations < params.max_iterations {
            repair(&units, &weights, &mut assignment, &mut proxies, params);
        }
    }

    let mut clusters: Vec<Cluster> = proxies
        .iter()
        .enumerate()
        .map(|(index, proxy)| Cluster {
            id: index as u32 + 1,
            proxy: *proxy,
            faces: Vec::new(),
        })
        .collect();
    for (face, &index) in assignment.iter().enumerate() {
        clusters[index].faces.push(face);
    }

    for empty in clusters.iter().filter(|c| c.is_empty()) {
        warn!(cluster = empty.id, "Cluster has no faces; keeping its seed proxy");
    }

    let error = error_history.last().copied().unwrap_or(0.0);

    info!(
        k = clusters.len(),
        iterations,
        converged,
        error,
        "Clustering complete"
    );

    Ok(ClusterOutput {
        clusters,
        error,
        iterations,
        converged,
        error_history,
        face_count: units.len(),
    })
}

/// Assign every face to its nearest proxy. Returns the number of faces whose
/// cluster changed.
fn assign(units: &[Vector3<f64>], proxies: &[Vector3<f64>], assignment: &mut [usize]) -> usize {
    let nearest: Vec<usize> = units
        .par_iter()
        .map(|unit| nearest_proxy(unit, proxies))
        .collect();

    let mut changed = 0;
    for (slot, best) in assignment.iter_mut().zip(nearest) {
        if *slot != best {
            *slot = best;
            changed += 1;
        }
    }
    changed
}

fn nearest_proxy(unit: &Vector3<f64>, proxies: &[Vector3<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (index, proxy) in proxies.iter().enumerate() {
        let dist = aligned_distance_squared(unit, proxy);
        if dist < best_dist {
            best = index;
            best_dist = dist;
        }
    }
    best
}

/// Replace each proxy by the aligned mean of its members. Empty clusters and
/// zero means keep the previous proxy.
fn update_proxies(
    units: &[Vector3<f64>],
    weights: &[f64],
    assignment: &[usize],
    proxies: &mut [Vector3<f64>],
) {
    let mut sums = vec![Vector3::zeros(); proxies.len()];
    for ((unit, &weight), &index) in units.iter().zip(weights).zip(assignment) {
        sums[index] += align_vector(unit, &proxies[index]) * weight;
    }

    for (index, (proxy, sum)) in proxies.iter_mut().zip(&sums).enumerate() {
        match normalize(sum) {
            Ok(mean) => *proxy = mean,
            Err(_) => debug!(cluster = index + 1, "Cluster mean has no direction"),
        }
    }
}

/// Aligned mean of `members`, or `None` without direction.
fn aligned_mean(
    units: &[Vector3<f64>],
    weights: &[f64],
    members: impl Iterator<Item = usize>,
    reference: &Vector3<f64>,
) -> Option<Vector3<f64>> {
    let sum = members.fold(Vector3::zeros(), |acc, face| {
        acc + align_vector(&units[face], reference) * weights[face]
    });
    normalize(&sum).ok()
}

/// Sum of per-face errors normalized by face count.
fn quantization_error(units: &[Vector3<f64>], assignment: &[usize], proxies: &[Vector3<f64>]) -> f64 {
    if units.is_empty() {
        return 0.0;
    }
    let total: f64 = units
        .iter()
        .zip(assignment)
        .map(|(unit, &index)| aligned_distance_squared(unit, &proxies[index]))
        .sum();
    total / units.len() as f64
}

/// Per-cluster member count and summed error.
fn cluster_stats(
    units: &[Vector3<f64>],
    assignment: &[usize],
    proxies: &[Vector3<f64>],
) -> (Vec<usize>, Vec<f64>) {
    let mut sizes = vec![0; proxies.len()];
    let mut errors = vec![0.0; proxies.len()];
    for (unit, &index) in units.iter().zip(assignment) {
        sizes[index] += 1;
        errors[index] += aligned_distance_squared(unit, &proxies[index]);
    }
    (sizes, errors)
}

/// Merge the closest proxy pair under the merge threshold, then give every
/// free slot (merged or empty) a new cluster by splitting or reseeding.
/// K stays constant. Returns the number of repairs made.
fn repair(
    units: &[Vector3<f64>],
    weights: &[f64],
    assignment: &mut [usize],
    proxies: &mut [Vector3<f64>],
    params: &ClusterParams,
) -> usize {
    let (sizes, _) = cluster_stats(units, assignment, proxies);
    let mut empty: Vec<usize> = (0..proxies.len()).filter(|&c| sizes[c] == 0).collect();
    let mut merged = None;
    let mut repairs = 0;

    if let Some((keep, absorbed)) = closest_pair(proxies, &sizes, params.merge_threshold) {
        for index in assignment.iter_mut() {
            if *index == absorbed {
                *index = keep;
            }
        }
        let reference = proxies[keep];
        let members = (0..units.len()).filter(|&face| assignment[face] == keep);
        if let Some(mean) = aligned_mean(units, weights, members, &reference) {
            proxies[keep] = mean;
        }
        debug!(cluster = keep + 1, absorbed = absorbed + 1, "Merged clusters");
        merged = Some(absorbed);
        repairs += 1;
    }

    // The merged slot goes to the cluster with the largest error.
    if let Some(slot) = merged {
        let (sizes, errors) = cluster_stats(units, assignment, proxies);
        let target = largest(&errors, |c| sizes[c] >= 2 && errors[c] > 0.0);
        match target {
            Some(target) => split(units, weights, assignment, proxies, target, slot),
            None => empty.push(slot),
        }
    }

    // Empty slots split a cluster above the threshold, else take the worst face.
    for slot in empty {
        let (sizes, errors) = cluster_stats(units, assignment, proxies);
        let mean_errors: Vec<f64> = errors
            .iter()
            .zip(&sizes)
            .map(|(&e, &n)| if n == 0 { 0.0 } else { e / n as f64 })
            .collect();
        let target = largest(&mean_errors, |c| {
            sizes[c] >= 2 && mean_errors[c] > params.split_threshold
        });

        if let Some(target) = target {
            split(units, weights, assignment, proxies, target, slot);
            repairs += 1;
        } else if reseed(units, assignment, proxies, slot) {
            repairs += 1;
        }
    }

    if repairs > 0 {
        debug!(repairs, "Repaired clusters");
    }
    repairs
}

/// Index of the largest value among eligible clusters; ties go to the lowest.
fn largest(values: &[f64], eligible: impl Fn(usize) -> bool) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        if eligible(index) && best.is_none_or(|(_, b)| value > b) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

/// Closest pair of non-empty clusters whose proxies lie within `threshold`.
fn closest_pair(
    proxies: &[Vector3<f64>],
    sizes: &[usize],
    threshold: f64,
) -> Option<(usize, usize)> {
    let limit = threshold * threshold;
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..proxies.len() {
        if sizes[i] == 0 {
            continue;
        }
        for j in (i + 1)..proxies.len() {
            if sizes[j] == 0 {
                continue;
            }
            let dist = aligned_distance_squared(&proxies[j], &proxies[i]);
            if dist < limit && best.is_none_or(|(_, _, b)| dist < b) {
                best = Some((i, j, dist));
            }
        }
    }
    best.map(|(i, j, _)| (i, j))
}

/// Split cluster `target` with 2-means seeded from its current proxy and its
/// worst-fit face. The second half moves to cluster `slot`.
fn split(
    units: &[Vector3<f64>],
    weights: &[f64],
    assignment: &mut [usize],
    proxies: &mut [Vector3<f64>],
    target: usize,
    slot: usize,
) {
    let members: Vec<usize> = (0..units.len())
        .filter(|&face| assignment[face] == target)
        .collect();

    let mut worst: Option<(usize, f64)> = None;
    for &face in &members {
        let err = aligned_distance_squared(&units[face], &proxies[target]);
        if worst.is_none_or(|(_, w)| err > w) {
            worst = Some((face, err));
        }
    }
    let Some((worst, _)) = worst else {
        return;
    };

    let mut first = proxies[target];
    let mut second = units[worst];
    let mut in_second = vec![false; members.len()];

    for _ in 0..SPLIT_ITERATIONS {
        let mut moved = false;
        for (flag, &face) in in_second.iter_mut().zip(&members) {
            let to_second = aligned_distance_squared(&units[face], &second)
                < aligned_distance_squared(&units[face], &first);
            if to_second != *flag {
                *flag = to_second;
                moved = true;
            }
        }

        let first_members = members
            .iter()
            .zip(&in_second)
            .filter(|(_, s)| !**s)
            .map(|(&f, _)| f);
        first = aligned_mean(units, weights, first_members, &first).unwrap_or(first);

        let second_members = members
            .iter()
            .zip(&in_second)
            .filter(|(_, s)| **s)
            .map(|(&f, _)| f);
        second = aligned_mean(units, weights, second_members, &second).unwrap_or(second);

        if !moved {
            break;
        }
    }

    let mut moved_faces = 0;
    for (&face, &flag) in members.iter().zip(&in_second) {
        if flag {
            assignment[face] = slot;
            moved_faces += 1;
        }
    }
    proxies[target] = first;
    proxies[slot] = second;

    debug!(
        cluster = target + 1,
        into = slot + 1,
        moved = moved_faces,
        "Split cluster"
    );
}

/// Reseed cluster `slot` from the face with the largest error. Returns
/// `false` when every face already fits its proxy exactly.
fn reseed(
    units: &[Vector3<f64>],
    assignment: &mut [usize],
    proxies: &mut [Vector3<f64>],
    slot: usize,
) -> bool {
    let mut worst: Option<(usize, f64)> = None;
    for (face, (unit, &index)) in units.iter().zip(assignment.iter()).enumerate() {
        let err = aligned_distance_squared(unit, &proxies[index]);
        if err > 0.0 && worst.is_none_or(|(_, w)| err > w) {
            worst = Some((face, err));
        }
    }

    let Some((face, err)) = worst else {
        return false;
    };
    assignment[face] = slot;
    proxies[slot] = units[face];
    debug!(cluster = slot + 1, face, error = err, "Reseeded empty cluster");
    true
}
