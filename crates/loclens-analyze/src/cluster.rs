//! Size clustering of line counts into Small/Medium/Large buckets.
//!
//! The canonical policy is a deterministic one-dimensional k-means with
//! k = 3: centroids seed from the minimum, middle and maximum of the
//! sorted sample, then refine for at most [`MAX_ITERATIONS`] passes,
//! stopping early once no sample changes cluster. Deterministic seeding
//! means repeated runs over the same tree bucket identically.
//!
//! A quantile split at the 1/3 and 2/3 order statistics is available as
//! an alternative strategy for trees where k-means collapses nearly
//! everything into one bucket.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Number of size buckets produced by clustering.
pub const CLUSTER_COUNT: usize = 3;

/// Default iteration cap for centroid refinement.
pub const MAX_ITERATIONS: usize = 10;

/// Human-readable bucket label, ordered smallest to largest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum SizeLabel {
    Small,
    Medium,
    Large,
}

/// Assignment policy for bucketing a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterStrategy {
    /// Deterministic k-means refinement.
    #[default]
    KMeans,
    /// Thresholds at the 1/3 and 2/3 order statistics.
    Quantile,
}

/// Configuration for size clustering.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ClusterConfig {
    /// Iteration cap for centroid refinement.
    #[builder(default = "MAX_ITERATIONS")]
    pub max_iterations: usize,

    /// Assignment policy.
    #[builder(default)]
    pub strategy: ClusterStrategy,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            strategy: ClusterStrategy::KMeans,
        }
    }
}

impl ClusterConfig {
    /// Create a new config builder.
    pub fn builder() -> ClusterConfigBuilder {
        ClusterConfigBuilder::default()
    }
}

/// Accumulated figures for one cluster under its final assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSummary {
    /// Cluster id (0-based).
    pub cluster: usize,
    /// Number of samples assigned.
    pub count: usize,
    /// Sum of assigned samples.
    pub sum: f64,
    /// Smallest assigned sample; `+inf` while the cluster is empty.
    pub min: f64,
    /// Largest assigned sample; `-inf` while the cluster is empty.
    pub max: f64,
    /// Mean of assigned samples, 0.0 for an empty cluster.
    pub avg: f64,
}

/// Result of clustering one sample.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Cluster id for each sample, in input order.
    pub assignments: Vec<usize>,
    /// Per-cluster accumulation, indexed by cluster id.
    pub summaries: Vec<ClusterSummary>,
    /// Label for each cluster id, assigned by ascending cluster average.
    pub labels: Vec<SizeLabel>,
}

impl Clustering {
    /// Label of a cluster id.
    pub fn label_of(&self, cluster: usize) -> SizeLabel {
        self.labels[cluster]
    }
}

/// Buckets line-count samples into three size clusters.
pub struct SizeClusterer {
    config: ClusterConfig,
}

impl SizeClusterer {
    /// Create a new clusterer with default config.
    pub fn new() -> Self {
        Self {
            config: ClusterConfig::default(),
        }
    }

    /// Create a new clusterer with custom config.
    pub fn with_config(config: ClusterConfig) -> Self {
        Self { config }
    }

    /// Cluster a sample into [`CLUSTER_COUNT`] buckets.
    ///
    /// Callers must supply at least [`CLUSTER_COUNT`] samples; below
    /// that, bucketing three ways is meaningless and the CLI reports
    /// the shortfall instead of calling in.
    pub fn cluster(&self, sizes: &[f64]) -> Clustering {
        debug_assert!(
            sizes.len() >= CLUSTER_COUNT,
            "clustering needs at least {CLUSTER_COUNT} samples"
        );

        let assignments = match self.config.strategy {
            ClusterStrategy::KMeans => {
                let (assignments, _centroids) = run_kmeans(sizes, self.config.max_iterations);
                assignments
            }
            ClusterStrategy::Quantile => quantile_assignments(sizes),
        };

        let summaries = summarize(sizes, &assignments);
        let labels = label_by_average(&summaries);

        Clustering {
            assignments,
            summaries,
            labels,
        }
    }
}

impl Default for SizeClusterer {
    fn default() -> Self {
        Self::new()
    }
}

/// One-dimensional k-means over the sample.
///
/// Seeds are the minimum, middle and maximum of the sorted sample, so
/// two runs over the same input always agree.
fn run_kmeans(data: &[f64], max_iterations: usize) -> (Vec<usize>, [f64; CLUSTER_COUNT]) {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut centroids = [sorted[0], sorted[sorted.len() / 2], sorted[sorted.len() - 1]];

    let mut assignments = vec![0usize; data.len()];
    for iteration in 0..max_iterations {
        let mut changed = false;
        for (i, &size) in data.iter().enumerate() {
            let mut best = 0;
            let mut best_dist = (size - centroids[0]).abs();
            for (cluster, &centroid) in centroids.iter().enumerate().skip(1) {
                let dist = (size - centroid).abs();
                // Strict comparison keeps ties on the lowest cluster id.
                if dist < best_dist {
                    best_dist = dist;
                    best = cluster;
                }
            }
            if assignments[i] != best {
                assignments[i] = best;
                changed = true;
            }
        }

        let mut sums = [0.0; CLUSTER_COUNT];
        let mut counts = [0usize; CLUSTER_COUNT];
        for (&size, &cluster) in data.iter().zip(&assignments) {
            sums[cluster] += size;
            counts[cluster] += 1;
        }
        for cluster in 0..CLUSTER_COUNT {
            // A cluster that lost every sample keeps its centroid.
            if counts[cluster] > 0 {
                centroids[cluster] = sums[cluster] / counts[cluster] as f64;
            }
        }

        if !changed {
            tracing::debug!("k-means converged after {} iterations", iteration + 1);
            break;
        }
    }

    (assignments, centroids)
}

/// Bucket by comparison against the 1/3 and 2/3 order statistics.
fn quantile_assignments(data: &[f64]) -> Vec<usize> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let lower = sorted[sorted.len() / 3];
    let upper = sorted[sorted.len() * 2 / 3];

    data.iter()
        .map(|&size| {
            if size < lower {
                0
            } else if size < upper {
                1
            } else {
                2
            }
        })
        .collect()
}

/// Accumulate per-cluster figures over the final assignment.
fn summarize(data: &[f64], assignments: &[usize]) -> Vec<ClusterSummary> {
    let mut summaries: Vec<ClusterSummary> = (0..CLUSTER_COUNT)
        .map(|cluster| ClusterSummary {
            cluster,
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            avg: 0.0,
        })
        .collect();

    for (&size, &cluster) in data.iter().zip(assignments) {
        let summary = &mut summaries[cluster];
        summary.count += 1;
        summary.sum += size;
        summary.min = summary.min.min(size);
        summary.max = summary.max.max(size);
    }
    for summary in &mut summaries {
        if summary.count > 0 {
            summary.avg = summary.sum / summary.count as f64;
        }
    }
    summaries
}

/// Rank clusters by ascending average and hand out labels in that order.
fn label_by_average(summaries: &[ClusterSummary]) -> Vec<SizeLabel> {
    let mut order: Vec<usize> = (0..summaries.len()).collect();
    // Stable sort: clusters tied on average keep id order.
    order.sort_by(|&a, &b| summaries[a].avg.total_cmp(&summaries[b].avg));

    let mut labels = vec![SizeLabel::Small; summaries.len()];
    for (&cluster, label) in order.iter().zip(SizeLabel::iter()) {
        labels[cluster] = label;
    }
    labels
}
