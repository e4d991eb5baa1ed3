//! Result types for clustering.

// Face counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A group of faces sharing a representative line direction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    /// Cluster id (starting at 1).
    pub id: u32,

    /// Unit proxy direction.
    pub proxy: Vector3<f64>,

    /// Member faces in ascending order.
    pub faces: Vec<usize>,
}

impl Cluster {
    /// Number of member faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether the cluster has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Result of clustering a line field.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterResult {
    /// Clusters ordered by id.
    pub clusters: Vec<Cluster>,

    /// Final quantization error normalized by face count.
    pub error: f64,

    /// Number of iterations performed.
    pub iterations: u32,

    /// Whether assignments stopped changing before the budget ran out.
    pub converged: bool,

    /// Quantization error after each iteration.
    pub error_history: Vec<f64>,

    /// Number of faces clustered.
    pub face_count: usize,
}

impl ClusterResult {
    /// Number of clusters.
    #[must_use]
    pub fn k(&self) -> usize {
        self.clusters.len()
    }

    /// Look up a cluster by id.
    #[must_use]
    pub fn cluster(&self, id: u32) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    /// Cluster id of every face, indexed by face.
    #[must_use]
    pub fn assignment(&self) -> Vec<u32> {
        let mut ids = vec![0; self.face_count];
        for cluster in &self.clusters {
            for &face in &cluster.faces {
                if let Some(slot) = ids.get_mut(face) {
                    *slot = cluster.id;
                }
            }
        }
        ids
    }

    /// Ids of clusters left without members.
    #[must_use]
    pub fn empty_clusters(&self) -> Vec<u32> {
        self.clusters
            .iter()
            .filter(|c| c.is_empty())
            .map(|c| c.id)
            .collect()
    }

    /// Mean number of faces per cluster.
    #[must_use]
    pub fn mean_cluster_size(&self) -> f64 {
        if self.clusters.is_empty() {
            0.0
        } else {
            self.face_count as f64 / self.clusters.len() as f64
        }
    }
}

impl std::fmt::Display for ClusterResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} clusters over {} faces, error {:.6} after {} iterations{}",
            self.clusters.len(),
            self.face_count,
            self.error,
            self.iterations,
            if self.converged { " (converged)" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClusterResult {
        ClusterResult {
            clusters: vec![
                Cluster {
                    id: 1,
                    proxy: Vector3::x(),
                    faces: vec![0, 2],
                },
                Cluster {
                    id: 2,
                    proxy: Vector3::y(),
                    faces: vec![1],
                },
                Cluster {
                    id: 3,
                    proxy: Vector3::z(),
                    faces: vec![],
                },
            ],
            error: 0.0,
            iterations: 2,
            converged: true,
            error_history: vec![0.1, 0.0],
            face_count: 3,
        }
    }

    #[test]
    fn test_assignment() {
        assert_eq!(sample().assignment(), vec![1, 2, 1]);
    }

    #[test]
    fn test_lookup_and_empty() {
        let result = sample();
        assert_eq!(result.k(), 3);
        assert_eq!(result.cluster(2).map(Cluster::len), Some(1));
        assert!(result.cluster(7).is_none());
        assert_eq!(result.empty_clusters(), vec![3]);
    }

    #[test]
    fn test_display() {
        let text = format!("{}", sample());
        assert!(text.contains("3 clusters"));
        assert!(text.contains("converged"));
    }
}
