//! Scanned file set container and statistics.

use std::time::Duration;

use crate::error::ScanWarning;
use crate::record::FileRecord;

/// Counters accumulated while walking the tree.
///
/// `files_seen` and `dirs_seen` cover every entry visited; `matched_files`
/// and `total_lines` only the files that passed the extension filter and
/// were counted successfully.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStats {
    /// Regular files visited, whether or not they matched.
    pub files_seen: u64,
    /// Directories visited.
    pub dirs_seen: u64,
    /// Files that matched the filter and were counted.
    pub matched_files: u64,
    /// Sum of line counts over all matched files.
    pub total_lines: u64,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a regular file that was visited.
    pub fn record_file(&mut self) {
        self.files_seen += 1;
    }

    /// Record a directory that was visited.
    pub fn record_dir(&mut self) {
        self.dirs_seen += 1;
    }

    /// Record a matched file and its line count.
    pub fn record_match(&mut self, lines: u64) {
        self.matched_files += 1;
        self.total_lines += lines;
    }
}

/// Complete result of one scan: the matched records plus bookkeeping.
#[derive(Debug, Clone)]
pub struct FileSet {
    /// Matched files in traversal order.
    pub records: Vec<FileRecord>,

    /// Counters accumulated during the walk.
    pub stats: ScanStats,

    /// Warnings encountered during scan.
    pub warnings: Vec<ScanWarning>,

    /// Duration of the scan.
    pub scan_duration: Duration,
}

impl FileSet {
    /// Create a new file set.
    pub fn new(
        records: Vec<FileRecord>,
        stats: ScanStats,
        warnings: Vec<ScanWarning>,
        scan_duration: Duration,
    ) -> Self {
        Self {
            records,
            stats,
            warnings,
            scan_duration,
        }
    }

    /// Number of matched files.
    pub fn file_count(&self) -> usize {
        self.records.len()
    }

    /// Sum of line counts over all matched files.
    pub fn total_lines(&self) -> u64 {
        self.stats.total_lines
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_stats_default() {
        let stats = ScanStats::default();
        assert_eq!(stats.files_seen, 0);
        assert_eq!(stats.matched_files, 0);
        assert_eq!(stats.total_lines, 0);
    }

    #[test]
    fn test_scan_stats_record_match() {
        let mut stats = ScanStats::new();
        stats.record_file();
        stats.record_file();
        stats.record_match(12);
        stats.record_match(30);

        assert_eq!(stats.files_seen, 2);
        assert_eq!(stats.matched_files, 2);
        assert_eq!(stats.total_lines, 42);
    }

    #[test]
    fn test_file_set_accessors() {
        let records = vec![FileRecord::new("a.rs", 10), FileRecord::new("b.rs", 20)];
        let mut stats = ScanStats::new();
        stats.record_match(10);
        stats.record_match(20);

        let set = FileSet::new(records, stats, Vec::new(), Duration::from_millis(5));
        assert_eq!(set.file_count(), 2);
        assert_eq!(set.total_lines(), 30);
        assert!(!set.has_warnings());
    }
}
