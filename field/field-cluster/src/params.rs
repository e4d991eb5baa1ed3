//! Clustering parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for k-means clustering of a line field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterParams {
    /// Number of clusters.
    pub k: usize,

    /// Maximum number of assignment/update iterations.
    pub max_iterations: u32,

    /// Enable merge/split repair between iterations.
    pub merge_split: bool,

    /// Clusters whose proxies are closer than this (aligned distance) merge.
    pub merge_threshold: f64,

    /// Clusters whose mean per-face error exceeds this are split when a
    /// slot is free.
    pub split_threshold: f64,

    /// Face whose vector seeds the first cluster.
    pub start_face: usize,

    /// Weight faces by the field weights (face area) in proxy means.
    pub weighted: bool,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            k: 5,
            max_iterations: 30,
            merge_split: false,
            merge_threshold: 0.05,
            split_threshold: 0.1,
            start_face: 0,
            weighted: false,
        }
    }
}

impl ClusterParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for `k` clusters.
    #[must_use]
    pub fn with_clusters(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Set the number of clusters.
    #[must_use]
    pub const fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the iteration budget.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Enable or disable merge/split repair.
    #[must_use]
    pub const fn with_merge_split(mut self, enable: bool) -> Self {
        self.merge_split = enable;
        self
    }

    /// Set the merge threshold.
    #[must_use]
    pub const fn with_merge_threshold(mut self, threshold: f64) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Set the split threshold.
    #[must_use]
    pub const fn with_split_threshold(mut self, threshold: f64) -> Self {
        self.split_threshold = threshold;
        self
    }

    /// Set the seeding face.
    #[must_use]
    pub const fn with_start_face(mut self, face: usize) -> Self {
        self.start_face = face;
        self
    }

    /// Enable or disable weighted proxy means.
    #[must_use]
    pub const fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }
}
