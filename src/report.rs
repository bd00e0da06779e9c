//! Report assembly.
//!
//! Turns scan records plus the statistics and clustering summaries into
//! one [`Report`] value that both the text printer and the JSON output
//! serialize from, so the two formats never drift apart.

use chrono::{DateTime, Utc};
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use loclens_analyze::{Clustering, SizeLabel, StatsSummary};
use loclens_core::FileRecord;

/// Which per-file listing the report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// No per-file entries.
    None,
    /// Every file, in traversal order.
    Detailed,
    /// Every file, smallest first.
    Sorted,
}

/// One rendered size bucket.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterEntry {
    /// Bucket label.
    pub label: SizeLabel,
    /// Files in the bucket.
    pub count: usize,
    /// Share of all analyzed files, 0 to 100 with two decimals.
    pub percentage: f64,
    /// Mean line count, rounded to whole lines.
    pub avg: f64,
    /// Smallest and largest line count, rounded to whole lines.
    /// `[0, 0]` for a bucket that holds no files.
    pub range: [f64; 2],
}

/// The complete analysis report.
///
/// Line-valued figures are rounded to whole lines when the report is
/// built; percentages keep two decimals.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Number of files that survived filtering and exclusion.
    pub total_files: usize,
    /// Mean line count.
    pub average: f64,
    /// Median line count.
    pub median: f64,
    /// One-sided deviation over files at or above the mean.
    pub std_dev_high: f64,
    /// One-sided deviation over files below the mean.
    pub std_dev_low: f64,
    /// Sum of all counted lines. Absent when every file was counted
    /// regardless of extension, where the sum says little.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_lines: Option<u64>,
    /// File with the fewest lines.
    pub smallest_file: FileRecord,
    /// File with the most lines.
    pub largest_file: FileRecord,
    /// Per-file listing, present only when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileRecord>>,
    /// Size buckets, absent when there were too few files to cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<ClusterEntry>>,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

/// Assemble a report over a non-empty record set.
pub fn build_report(
    records: &[FileRecord],
    summary: &StatsSummary,
    clustering: Option<&Clustering>,
    include_total: bool,
    listing: Listing,
) -> Report {
    debug_assert!(!records.is_empty(), "reports need at least one record");

    let (smallest, largest) = match records.iter().minmax_by_key(|record| record.lines) {
        MinMaxResult::MinMax(min, max) => (min.clone(), max.clone()),
        MinMaxResult::OneElement(only) => (only.clone(), only.clone()),
        MinMaxResult::NoElements => unreachable!("caller checks for empty record sets"),
    };

    let files = match listing {
        Listing::None => None,
        Listing::Detailed => Some(records.to_vec()),
        Listing::Sorted => Some(
            records
                .iter()
                .cloned()
                .sorted_by_key(|record| record.lines)
                .collect(),
        ),
    };

    Report {
        total_files: records.len(),
        average: summary.average.round(),
        median: summary.median.round(),
        std_dev_high: summary.std_dev_high.round(),
        std_dev_low: summary.std_dev_low.round(),
        total_lines: include_total.then(|| records.iter().map(|record| record.lines).sum()),
        smallest_file: smallest,
        largest_file: largest,
        files,
        clusters: clustering.map(|clustering| cluster_entries(clustering, records.len())),
        generated_at: Utc::now(),
    }
}

/// Render cluster summaries into presentation entries, in cluster id order.
fn cluster_entries(clustering: &Clustering, total_files: usize) -> Vec<ClusterEntry> {
    clustering
        .summaries
        .iter()
        .map(|summary| {
            // Empty buckets keep sentinel extremes; render them as zero
            // instead of serializing infinities.
            let range = if summary.count > 0 {
                [summary.min.round(), summary.max.round()]
            } else {
                [0.0, 0.0]
            };
            ClusterEntry {
                label: clustering.label_of(summary.cluster),
                count: summary.count,
                percentage: round2(100.0 * summary.count as f64 / total_files as f64),
                avg: summary.avg.round(),
                range,
            }
        })
        .collect()
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use loclens_analyze::{SizeClusterer, compute_stats};

    fn sample_records() -> Vec<FileRecord> {
        vec![
            FileRecord::new("b.rs", 30),
            FileRecord::new("a.rs", 10),
            FileRecord::new("c.rs", 20),
        ]
    }

    fn summary_for(records: &[FileRecord]) -> StatsSummary {
        let sizes: Vec<u64> = records.iter().map(|record| record.lines).collect();
        compute_stats(&sizes)
    }

    #[test]
    fn test_report_rounds_line_figures() {
        let records = vec![FileRecord::new("a.rs", 10), FileRecord::new("b.rs", 21)];
        let summary = summary_for(&records);
        let report = build_report(&records, &summary, None, true, Listing::None);

        // Mean and median of [10, 21] are both 15.5 and round away from zero.
        assert_eq!(report.average, 16.0);
        assert_eq!(report.median, 16.0);
        assert_eq!(report.std_dev_high, 6.0);
        assert_eq!(report.std_dev_low, 6.0);
        assert_eq!(report.total_lines, Some(31));
        assert_eq!(report.smallest_file, FileRecord::new("a.rs", 10));
        assert_eq!(report.largest_file, FileRecord::new("b.rs", 21));
    }

    #[test]
    fn test_report_listing_modes() {
        let records = sample_records();
        let summary = summary_for(&records);

        let none = build_report(&records, &summary, None, true, Listing::None);
        assert!(none.files.is_none());

        let detailed = build_report(&records, &summary, None, true, Listing::Detailed);
        assert_eq!(detailed.files.as_deref(), Some(records.as_slice()));

        let sorted = build_report(&records, &summary, None, true, Listing::Sorted);
        let expected = vec![
            FileRecord::new("a.rs", 10),
            FileRecord::new("c.rs", 20),
            FileRecord::new("b.rs", 30),
        ];
        assert_eq!(sorted.files.as_deref(), Some(expected.as_slice()));
    }

    #[test]
    fn test_cluster_entries_shape() {
        let records = vec![
            FileRecord::new("a.rs", 1),
            FileRecord::new("b.rs", 2),
            FileRecord::new("c.rs", 3),
            FileRecord::new("d.rs", 100),
            FileRecord::new("e.rs", 110),
            FileRecord::new("f.rs", 5000),
        ];
        let summary = summary_for(&records);
        let sizes: Vec<f64> = records.iter().map(|record| record.lines as f64).collect();
        let clustering = SizeClusterer::new().cluster(&sizes);

        let report = build_report(&records, &summary, Some(&clustering), true, Listing::None);
        let entries = report.clusters.unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, SizeLabel::Small);
        assert_eq!(entries[0].count, 3);
        assert_eq!(entries[0].percentage, 50.0);
        assert_eq!(entries[0].avg, 2.0);
        assert_eq!(entries[0].range, [1.0, 3.0]);

        assert_eq!(entries[1].label, SizeLabel::Medium);
        assert_eq!(entries[1].count, 2);
        assert_eq!(entries[1].percentage, 33.33);
        assert_eq!(entries[1].range, [100.0, 110.0]);

        assert_eq!(entries[2].label, SizeLabel::Large);
        assert_eq!(entries[2].count, 1);
        assert_eq!(entries[2].percentage, 16.67);
        assert_eq!(entries[2].range, [5000.0, 5000.0]);
    }

    #[test]
    fn test_empty_cluster_renders_zero_range() {
        let records = vec![
            FileRecord::new("a.rs", 0),
            FileRecord::new("b.rs", 0),
            FileRecord::new("c.rs", 10),
        ];
        let summary = summary_for(&records);
        let sizes: Vec<f64> = records.iter().map(|record| record.lines as f64).collect();
        let clustering = SizeClusterer::new().cluster(&sizes);

        let report = build_report(&records, &summary, Some(&clustering), true, Listing::None);
        let entries = report.clusters.unwrap();

        let empty: Vec<_> = entries.iter().filter(|entry| entry.count == 0).collect();
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].range, [0.0, 0.0]);
        assert_eq!(empty[0].avg, 0.0);
        assert_eq!(empty[0].percentage, 0.0);
    }

    #[test]
    fn test_json_omits_absent_sections() {
        let records = sample_records();
        let summary = summary_for(&records);
        let report = build_report(&records, &summary, None, false, Listing::None);

        let value = serde_json::to_value(&report).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("total_lines"));
        assert!(!object.contains_key("files"));
        assert!(!object.contains_key("clusters"));
        assert!(object.contains_key("generated_at"));
        assert_eq!(value["total_files"], 3);
    }

    #[test]
    fn test_json_keeps_zero_total() {
        let records = vec![FileRecord::new("a.rs", 0), FileRecord::new("b.rs", 0)];
        let summary = summary_for(&records);
        let report = build_report(&records, &summary, None, true, Listing::None);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["total_lines"], 0);
    }
}
