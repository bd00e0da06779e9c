//! Analysis algorithms for loclens.
//!
//! This crate turns a scan's line-count sample into the two analysis
//! products the report renders:
//!
//! - **Descriptive statistics** - mean, median and one-sided deviations
//! - **Size clustering** - Small/Medium/Large buckets via k-means
//!
//! Both engines are pure: they take a sample, return a value, and touch
//! no global state, so results are reproducible run to run.
//!
//! # Statistics
//!
//! ```rust
//! use loclens_analyze::compute_stats;
//!
//! let summary = compute_stats(&[10, 20, 30, 100]);
//! assert_eq!(summary.average, 40.0);
//! assert_eq!(summary.median, 25.0);
//! ```
//!
//! # Clustering
//!
//! ```rust
//! use loclens_analyze::{SizeClusterer, SizeLabel};
//!
//! let sizes = [12.0, 15.0, 240.0, 250.0, 4000.0];
//! let clustering = SizeClusterer::new().cluster(&sizes);
//!
//! assert_eq!(clustering.label_of(clustering.assignments[0]), SizeLabel::Small);
//! assert_eq!(clustering.label_of(clustering.assignments[4]), SizeLabel::Large);
//! ```

mod cluster;
mod stats;

pub use cluster::{
    CLUSTER_COUNT, ClusterConfig, ClusterConfigBuilder, ClusterStrategy, ClusterSummary,
    Clustering, MAX_ITERATIONS, SizeClusterer, SizeLabel,
};
pub use stats::{StatsSummary, compute_stats};
