//! loclens - line count statistics and size clustering for source trees.
//!
//! Usage:
//!   locl [PATH]              Scan and report line statistics
//!   locl -d [PATH]           Include a per-file listing
//!   locl -s -H [PATH]        Histogram, smallest files first
//!   locl -f json [PATH]      Print the report as JSON
//!   locl -o out.json [PATH]  Write the JSON report to a file
//!   locl --help              Show help

mod report;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use loclens_analyze::{CLUSTER_COUNT, ClusterConfig, ClusterStrategy, SizeClusterer, compute_stats};
use loclens_core::{DEFAULT_CATALOG, FileRecord, line_counts, split_largest};
use loclens_scan::{FileSet, LineScanner, ScanConfig};

use crate::report::{Listing, Report, build_report};

#[derive(Parser)]
#[command(
    name = "loclens",
    version,
    about = "Line count statistics and size clustering for source trees",
    long_about = "loclens walks a directory tree, counts the lines of every \
                  matching source file, and reports size statistics together \
                  with Small/Medium/Large clustering.\n\n\
                  Extensions are taken from a JSON catalog (languages.json by \
                  default) unless --all or --include overrides it."
)]
struct Cli {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// List every counted file with its line count
    #[arg(short, long)]
    detailed: bool,

    /// Sort file listings by line count, smallest first
    #[arg(short, long)]
    sorted: bool,

    /// Render the file listing as a bar histogram
    #[arg(short = 'H', long)]
    histogram: bool,

    /// Count every file, ignoring the extension catalog
    #[arg(short, long)]
    all: bool,

    /// Extension catalog file
    #[arg(short, long, default_value = DEFAULT_CATALOG)]
    config: PathBuf,

    /// Count only files with this extension
    #[arg(short, long)]
    include: Option<String>,

    /// Skip files with this extension
    #[arg(short, long)]
    exclude: Option<String>,

    /// Drop the N largest files before analysis
    #[arg(short = 'k', long, default_value = "0")]
    skip_largest: usize,

    /// Clustering policy for the size buckets
    #[arg(long, default_value = "kmeans")]
    strategy: Strategy,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Write the JSON report to this file instead of printing
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Strategy {
    #[default]
    Kmeans,
    Quantile,
}

impl From<Strategy> for ClusterStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Kmeans => ClusterStrategy::KMeans,
            Strategy::Quantile => ClusterStrategy::Quantile,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    run(Cli::parse())
}

/// Send library diagnostics to stderr, keeping stdout for reports.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Scan, analyze and report.
fn run(cli: Cli) -> Result<()> {
    let path = cli.path.canonicalize().context("Invalid path")?;

    eprintln!("Scanning {}...", path.display());

    let config = ScanConfig::builder()
        .root(&path)
        .all_files(cli.all)
        .include(cli.include.clone())
        .exclude(cli.exclude.clone())
        .catalog_path(&cli.config)
        .build()
        .unwrap();

    let scanner = LineScanner::new();
    let set = scanner.scan(&config).context("Scan failed")?;

    let FileSet {
        mut records,
        stats,
        warnings,
        scan_duration,
    } = set;

    eprintln!(
        "Scanned {} files in {:.2}s",
        stats.files_seen,
        scan_duration.as_secs_f64()
    );

    if cli.skip_largest > 0 {
        let (kept, dropped) = split_largest(records, cli.skip_largest);
        eprintln!("Excluding {} largest file(s):", dropped.len());
        for record in &dropped {
            eprintln!(" - {}: {} lines", record.path.display(), record.lines);
        }
        records = kept;
    }

    if records.is_empty() {
        println!("No files found");
        return Ok(());
    }

    let sizes = line_counts(&records);
    let summary = compute_stats(&sizes);

    let clustering = if records.len() >= CLUSTER_COUNT {
        let cluster_config = ClusterConfig::builder()
            .strategy(cli.strategy)
            .build()
            .unwrap();
        let samples: Vec<f64> = sizes.iter().map(|&lines| lines as f64).collect();
        Some(SizeClusterer::with_config(cluster_config).cluster(&samples))
    } else {
        None
    };

    let report = build_report(
        &records,
        &summary,
        clustering.as_ref(),
        !cli.all,
        listing_mode(&cli),
    );

    if let Some(output) = &cli.output {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(output, json).with_context(|| format!("Cannot write {}", output.display()))?;
        eprintln!("Report written to {}", output.display());
    } else {
        match cli.format {
            OutputFormat::Text => print_report(&report, &records, &cli),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
    }

    if !warnings.is_empty() {
        eprintln!("{} warning(s) during scan", warnings.len());
    }

    Ok(())
}

/// Pick the listing the report carries. Sorting implies a listing.
fn listing_mode(cli: &Cli) -> Listing {
    if cli.sorted {
        Listing::Sorted
    } else if cli.detailed {
        Listing::Detailed
    } else {
        Listing::None
    }
}

/// Print the text report.
fn print_report(report: &Report, records: &[FileRecord], cli: &Cli) {
    println!();
    println!("{}", "─".repeat(70));
    println!(" Line Count Report");
    println!("{}", "─".repeat(70));
    println!();

    println!(" Total files analyzed: {}", report.total_files);
    println!(" Average: {} lines", report.average);
    println!(" Median: {} lines", report.median);
    println!(" Standard deviation (high): {} lines", report.std_dev_high);
    println!(" Standard deviation (low): {} lines", report.std_dev_low);
    if let Some(total) = report.total_lines {
        println!(" Total lines: {total}");
    }
    println!(
        " Smallest file: {} ({} lines)",
        report.smallest_file.path.display(),
        report.smallest_file.lines
    );
    println!(
        " Largest file: {} ({} lines)",
        report.largest_file.path.display(),
        report.largest_file.lines
    );

    println!();
    match &report.clusters {
        Some(entries) => {
            match cli.strategy {
                Strategy::Kmeans => {
                    println!(" File clusters (k-means clustering, k={CLUSTER_COUNT}):")
                }
                Strategy::Quantile => println!(" File clusters (quantile split):"),
            }
            for entry in entries {
                println!(
                    "   {}: {} files ({:.2}%), Avg = {} lines, Range = [{}, {}] lines",
                    entry.label,
                    entry.count,
                    entry.percentage,
                    entry.avg,
                    entry.range[0],
                    entry.range[1]
                );
            }
        }
        None => println!(" Not enough files for clustering."),
    }

    if cli.histogram {
        // The report only carries files when a listing was requested;
        // a bare histogram renders over the records in traversal order.
        let files = report.files.as_deref().unwrap_or(records);
        println!();
        print_histogram(files, report.largest_file.lines);
    } else if let Some(files) = &report.files {
        println!();
        if cli.sorted {
            println!(" Detailed file list (sorted smallest to largest):");
        } else {
            println!(" Detailed file list:");
        }
        for record in files {
            println!("   {}: {} lines", record.path.display(), record.lines);
        }
    }
    println!();
}

/// Width of the longest histogram bar.
const BAR_WIDTH: usize = 50;

/// Print one proportional bar per file, scaled against the largest file.
fn print_histogram(files: &[FileRecord], max_lines: u64) {
    let paths: Vec<String> = files
        .iter()
        .map(|record| record.path.display().to_string())
        .collect();
    let widest = paths.iter().map(String::len).max().unwrap_or(0);

    println!(" Detailed file histogram:");
    for (record, path) in files.iter().zip(&paths) {
        let bar_len = if max_lines > 0 {
            ((record.lines as f64 / max_lines as f64) * BAR_WIDTH as f64) as usize
        } else {
            0
        };
        println!("   {:<width$}: {}", path, "█".repeat(bar_len), width = widest);
    }
}
