//! Scan configuration and file filtering.

use std::path::{Path, PathBuf};

use compact_str::{CompactString, format_compact};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Catalog file consulted when no explicit extension flags are given.
pub const DEFAULT_CATALOG: &str = "languages.json";

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Count every regular file, ignoring extension filters entirely.
    #[builder(default = "false")]
    pub all_files: bool,

    /// Only count files with this extension (bypasses the catalog).
    #[builder(default)]
    pub include: Option<String>,

    /// Skip files with this extension.
    #[builder(default)]
    pub exclude: Option<String>,

    /// Path of the extension catalog file.
    #[builder(default = "PathBuf::from(DEFAULT_CATALOG)")]
    pub catalog_path: PathBuf,

    /// Number of threads for scanning (0 = auto-detect).
    #[builder(default = "0")]
    pub threads: usize,
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path with catalog filtering.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            all_files: false,
            include: None,
            exclude: None,
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            threads: 0,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Extension catalog loaded from a JSON file.
///
/// `extensions` are suffixes a file name must carry to be counted;
/// `exclusions` are suffixes that knock a file out even when an
/// extension matches (say `_test.go` against `.go`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionCatalog {
    /// Suffixes of files to count.
    #[serde(default)]
    pub extensions: Vec<CompactString>,

    /// Suffixes of files to skip.
    #[serde(default)]
    pub exclusions: Vec<CompactString>,
}

impl ExtensionCatalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let data = std::fs::read_to_string(path).map_err(|err| ScanError::io(path, err))?;
        serde_json::from_str(&data)
            .map_err(|err| ScanError::invalid_config(format!("{}: {err}", path.display())))
    }

    /// Lowercase every entry so suffix checks stay case-insensitive.
    fn normalized(mut self) -> Self {
        self.extensions = self
            .extensions
            .iter()
            .map(|ext| CompactString::from(ext.to_lowercase()))
            .collect();
        self.exclusions = self
            .exclusions
            .iter()
            .map(|ext| CompactString::from(ext.to_lowercase()))
            .collect();
        self
    }
}

/// How file names are selected once the exclude flag has had its say.
#[derive(Debug, Clone)]
enum FilterMode {
    /// Count everything.
    All,
    /// Count only names with this suffix.
    Include(CompactString),
    /// Consult the extension catalog.
    Catalog(ExtensionCatalog),
}

/// Decides which file names get counted.
///
/// Built once per scan from the [`ScanConfig`]; the catalog file is only
/// read when the config actually filters through it. All comparisons are
/// case-insensitive suffix matches against the base file name.
#[derive(Debug, Clone)]
pub struct FileFilter {
    exclude: Option<CompactString>,
    mode: FilterMode,
}

impl FileFilter {
    /// Build a filter from a scan config, loading the catalog if needed.
    pub fn from_config(config: &ScanConfig) -> Result<Self, ScanError> {
        let exclude = config.exclude.as_deref().map(normalize_ext);
        let mode = if config.all_files {
            FilterMode::All
        } else if let Some(ext) = config.include.as_deref() {
            FilterMode::Include(normalize_ext(ext))
        } else {
            let catalog = ExtensionCatalog::load(&config.catalog_path)?;
            FilterMode::Catalog(catalog.normalized())
        };
        Ok(Self { exclude, mode })
    }

    /// Check whether a file with this base name should be counted.
    pub fn matches(&self, name: &str) -> bool {
        match &self.mode {
            FilterMode::All => true,
            FilterMode::Include(ext) => {
                let name = name.to_lowercase();
                !self.is_excluded(&name) && name.ends_with(ext.as_str())
            }
            FilterMode::Catalog(catalog) => {
                let name = name.to_lowercase();
                if self.is_excluded(&name) {
                    return false;
                }
                if catalog.exclusions.iter().any(|ex| name.ends_with(ex.as_str())) {
                    return false;
                }
                catalog.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
            }
        }
    }

    fn is_excluded(&self, lower_name: &str) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|ext| lower_name.ends_with(ext.as_str()))
    }
}

/// Lowercase a flag extension and give it a leading dot if missing.
fn normalize_ext(ext: &str) -> CompactString {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        CompactString::from(lower)
    } else {
        format_compact!(".{lower}")
    }
}
