//! Jwalk-based parallel directory scanner.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use jwalk::{Parallelism, WalkDir};
use rayon::prelude::*;

use loclens_core::{
    FileFilter, FileRecord, FileSet, ScanConfig, ScanError, ScanStats, ScanWarning,
};

use crate::counter::count_lines;

/// Recursive scanner that pairs a parallel walk with parallel counting.
///
/// Traversal is depth-first with sorted siblings, so repeated runs over
/// an unchanged tree yield records in the same order.
pub struct LineScanner;

impl LineScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan the configured root and count every matching file.
    ///
    /// Files that cannot be read are skipped and reported as warnings on
    /// the returned set; only a bad root or a bad catalog is fatal.
    pub fn scan(&self, config: &ScanConfig) -> Result<FileSet, ScanError> {
        let start = Instant::now();
        let root = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        // Verify root is a directory
        if !root.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }

        let filter = FileFilter::from_config(config)?;

        let mut stats = ScanStats::new();
        let mut warnings = Vec::new();

        let paths = collect_paths(config, &root, &filter, &mut stats, &mut warnings);
        let records = count_files(&root, paths, &mut stats, &mut warnings);

        let scan_duration = start.elapsed();
        tracing::debug!(
            "matched {} of {} files across {} directories in {:.2?}",
            stats.matched_files,
            stats.files_seen,
            stats.dirs_seen,
            scan_duration,
        );

        Ok(FileSet::new(records, stats, warnings, scan_duration))
    }
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk the tree and gather the paths of matching files.
fn collect_paths(
    config: &ScanConfig,
    root: &Path,
    filter: &FileFilter,
    stats: &mut ScanStats,
    warnings: &mut Vec<ScanWarning>,
) -> Vec<PathBuf> {
    let parallelism = match config.threads {
        0 => Parallelism::RayonDefaultPool {
            busy_timeout: Duration::from_millis(100),
        },
        n => Parallelism::RayonNewPool(n),
    };

    let walker = WalkDir::new(root)
        .parallelism(parallelism)
        .sort(true)
        .skip_hidden(false)
        .follow_links(false);

    let mut paths = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                warnings.push(ScanWarning::walk_error(path, err.to_string()));
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            stats.record_dir();
            continue;
        }
        if !file_type.is_file() {
            // Symlinks and special files are never counted.
            continue;
        }

        stats.record_file();
        let name = entry.file_name().to_string_lossy();
        if filter.matches(&name) {
            paths.push(entry.path());
        }
    }

    paths
}

/// Count lines in every collected path, in parallel, keeping walk order.
fn count_files(
    root: &Path,
    paths: Vec<PathBuf>,
    stats: &mut ScanStats,
    warnings: &mut Vec<ScanWarning>,
) -> Vec<FileRecord> {
    let counted: Vec<(PathBuf, std::io::Result<u64>)> = paths
        .into_par_iter()
        .map(|path| {
            let result = count_lines(&path);
            (path, result)
        })
        .collect();

    let mut records = Vec::with_capacity(counted.len());
    for (path, result) in counted {
        match result {
            Ok(lines) => {
                stats.record_match(lines);
                let display = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                records.push(FileRecord::new(display, lines));
            }
            Err(err) => {
                tracing::warn!("skipping {}: {err}", path.display());
                warnings.push(ScanWarning::read_error(path, &err));
            }
        }
    }
    records
}
