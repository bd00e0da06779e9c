//! Per-file line count records.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single counted file: its path and how many lines it holds.
///
/// Records are kept in traversal order; listings that want a different
/// order sort a copy rather than the originals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path of the file, relative to the scan root.
    pub path: PathBuf,
    /// Number of lines in the file.
    pub lines: u64,
}

impl FileRecord {
    /// Create a new record.
    pub fn new(path: impl Into<PathBuf>, lines: u64) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }
}

/// Extract the line counts from a set of records, in record order.
///
/// This is the sample the statistics and clustering engines consume.
pub fn line_counts(records: &[FileRecord]) -> Vec<u64> {
    records.iter().map(|record| record.lines).collect()
}

/// Split off the `n` largest records.
///
/// Returns the kept records, still in traversal order, and the dropped
/// ones ordered smallest to largest. Ties at the cut line are broken by
/// position, so repeat runs always drop the same files.
pub fn split_largest(records: Vec<FileRecord>, n: usize) -> (Vec<FileRecord>, Vec<FileRecord>) {
    if n == 0 {
        return (records, Vec::new());
    }
    if n >= records.len() {
        let mut dropped = records;
        dropped.sort_by_key(|record| record.lines);
        return (Vec::new(), dropped);
    }

    let mut by_size: Vec<usize> = (0..records.len()).collect();
    by_size.sort_by_key(|&index| records[index].lines);
    let cut: HashSet<usize> = by_size[records.len() - n..].iter().copied().collect();

    let mut kept = Vec::with_capacity(records.len() - n);
    let mut dropped = Vec::with_capacity(n);
    for (index, record) in records.into_iter().enumerate() {
        if cut.contains(&index) {
            dropped.push(record);
        } else {
            kept.push(record);
        }
    }
    dropped.sort_by_key(|record| record.lines);
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = FileRecord::new("src/main.rs", 120);
        assert_eq!(record.path, PathBuf::from("src/main.rs"));
        assert_eq!(record.lines, 120);
    }

    #[test]
    fn test_line_counts_preserve_order() {
        let records = vec![
            FileRecord::new("b.rs", 30),
            FileRecord::new("a.rs", 10),
            FileRecord::new("c.rs", 20),
        ];
        assert_eq!(line_counts(&records), vec![30, 10, 20]);
    }

    #[test]
    fn test_split_largest_keeps_traversal_order() {
        let records = vec![
            FileRecord::new("a.rs", 10),
            FileRecord::new("b.rs", 30),
            FileRecord::new("c.rs", 5),
            FileRecord::new("d.rs", 20),
        ];
        let (kept, dropped) = split_largest(records, 2);
        assert_eq!(kept, vec![FileRecord::new("a.rs", 10), FileRecord::new("c.rs", 5)]);
        assert_eq!(
            dropped,
            vec![FileRecord::new("d.rs", 20), FileRecord::new("b.rs", 30)]
        );
    }

    #[test]
    fn test_split_largest_breaks_ties_by_position() {
        let records = vec![
            FileRecord::new("a.rs", 10),
            FileRecord::new("b.rs", 30),
            FileRecord::new("c.rs", 30),
        ];
        // The later of two equal-sized files is dropped first.
        let (kept, dropped) = split_largest(records, 1);
        assert_eq!(kept, vec![FileRecord::new("a.rs", 10), FileRecord::new("b.rs", 30)]);
        assert_eq!(dropped, vec![FileRecord::new("c.rs", 30)]);
    }

    #[test]
    fn test_split_largest_zero_is_identity() {
        let records = vec![FileRecord::new("a.rs", 10), FileRecord::new("b.rs", 30)];
        let (kept, dropped) = split_largest(records.clone(), 0);
        assert_eq!(kept, records);
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_split_largest_can_drop_everything() {
        let records = vec![FileRecord::new("b.rs", 30), FileRecord::new("a.rs", 10)];
        let (kept, dropped) = split_largest(records, 5);
        assert!(kept.is_empty());
        assert_eq!(
            dropped,
            vec![FileRecord::new("a.rs", 10), FileRecord::new("b.rs", 30)]
        );
    }
}
