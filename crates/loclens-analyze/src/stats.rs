//! Descriptive statistics over line-count samples.

use serde::{Deserialize, Serialize};

/// Aggregate statistics for a sample of line counts.
///
/// The two deviations are one-sided population standard deviations:
/// `std_dev_high` is taken over samples at or above the mean,
/// `std_dev_low` over samples below it. Source trees skew toward many
/// small files and a few huge ones, and a single symmetric deviation
/// hides that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Arithmetic mean of the sample.
    pub average: f64,
    /// Middle value; mean of the two middle values for even sample sizes.
    pub median: f64,
    /// Population standard deviation of samples >= average.
    pub std_dev_high: f64,
    /// Population standard deviation of samples < average.
    pub std_dev_low: f64,
}

impl StatsSummary {
    /// Summary with every figure zeroed, used for empty samples.
    pub fn zero() -> Self {
        Self {
            average: 0.0,
            median: 0.0,
            std_dev_high: 0.0,
            std_dev_low: 0.0,
        }
    }
}

/// Compute aggregate statistics over a sample of line counts.
///
/// An empty sample yields an all-zero summary rather than an error, so
/// callers can render unconditionally. The input is never reordered;
/// the median works on a sorted copy.
pub fn compute_stats(sizes: &[u64]) -> StatsSummary {
    if sizes.is_empty() {
        return StatsSummary::zero();
    }

    let n = sizes.len();
    let sum: u64 = sizes.iter().sum();
    let average = sum as f64 / n as f64;

    let mut sorted = sizes.to_vec();
    sorted.sort_unstable();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    } else {
        sorted[n / 2] as f64
    };

    let mut high_sq = 0.0;
    let mut high_count = 0usize;
    let mut low_sq = 0.0;
    let mut low_count = 0usize;
    for &size in sizes {
        let diff = size as f64 - average;
        if diff >= 0.0 {
            high_sq += diff * diff;
            high_count += 1;
        } else {
            low_sq += diff * diff;
            low_count += 1;
        }
    }

    // An empty partition contributes 0.0, never NaN.
    let std_dev_high = if high_count > 0 {
        (high_sq / high_count as f64).sqrt()
    } else {
        0.0
    };
    let std_dev_low = if low_count > 0 {
        (low_sq / low_count as f64).sqrt()
    } else {
        0.0
    };

    StatsSummary {
        average,
        median,
        std_dev_high,
        std_dev_low,
    }
}
