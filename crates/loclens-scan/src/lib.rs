//! File system scanning engine for loclens.
//!
//! This crate walks a directory tree in parallel, filters file names
//! through a [`FileFilter`], and counts the lines of every match.
//!
//! # Overview
//!
//! `loclens-scan` produces the flat [`FileSet`] the statistics and
//! clustering layers work from. Key properties:
//!
//! - **Parallel traversal** via jwalk/rayon
//! - **Deterministic order**: sorted, depth-first, stable across runs
//! - **Non-fatal failures**: unreadable files become warnings
//!
//! # Example
//!
//! ```rust,no_run
//! use loclens_scan::{LineScanner, ScanConfig};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let scanner = LineScanner::new();
//! let set = scanner.scan(&config).unwrap();
//!
//! println!("Counted {} files", set.file_count());
//! println!("Total lines: {}", set.total_lines());
//! ```

mod counter;
mod scanner;

pub use counter::count_lines;
pub use scanner::LineScanner;

// Re-export core types for convenience
pub use loclens_core::{
    FileFilter, FileRecord, FileSet, ScanConfig, ScanError, ScanStats, ScanWarning, WarningKind,
};
