//! Core types for loclens.
//!
//! This crate provides the fundamental data structures used throughout
//! the loclens ecosystem: file records, scan results, configuration and
//! the extension filter.

mod config;
mod error;
mod record;
mod set;

pub use config::{DEFAULT_CATALOG, ExtensionCatalog, FileFilter, ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use record::{FileRecord, line_counts, split_largest};
pub use set::{FileSet, ScanStats};
