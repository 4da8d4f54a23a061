//! Normalizing several collection files in one run.
//!
//! A file that fails (missing, unreadable, wrong shape, unwritable) is
//! reported and the run moves on to the next one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::NormalizeError;
use crate::normalize::{normalize_collection, NormalizeStats};
use crate::store::CollectionFile;

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Normalize in memory and report, but leave files untouched.
    pub dry_run: bool,
}

/// Outcome for one file of a batch.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub stats: NormalizeStats,
    pub error: Option<NormalizeError>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    pub fn files_total(&self) -> usize {
        self.reports.len()
    }

    pub fn files_ok(&self) -> usize {
        self.reports.iter().filter(|r| r.is_ok()).count()
    }

    /// True when every file was processed; false for an empty batch.
    pub fn is_success(&self) -> bool {
        !self.reports.is_empty() && self.files_ok() == self.files_total()
    }

    /// Showtime counts summed over the files that succeeded.
    pub fn totals(&self) -> NormalizeStats {
        let mut totals = NormalizeStats::default();
        for report in self.reports.iter().filter(|r| r.is_ok()) {
            totals.merge(&report.stats);
        }
        totals
    }
}

#[derive(Debug, Serialize)]
struct SummaryView<'a> {
    files_total: usize,
    files_ok: usize,
    totals: NormalizeStats,
    files: Vec<FileView<'a>>,
}

#[derive(Debug, Serialize)]
struct FileView<'a> {
    path: &'a Path,
    stats: &'a NormalizeStats,
    error: Option<String>,
}

impl Serialize for BatchSummary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SummaryView {
            files_total: self.files_total(),
            files_ok: self.files_ok(),
            totals: self.totals(),
            files: self
                .reports
                .iter()
                .map(|r| FileView {
                    path: &r.path,
                    stats: &r.stats,
                    error: r.error.as_ref().map(|e| e.to_string()),
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

/// Load, normalize and (unless dry-running) write back one file.
pub fn normalize_file(
    path: &Path,
    now: NaiveDateTime,
    options: &BatchOptions,
) -> Result<NormalizeStats, NormalizeError> {
    info!("Normalizing datetimes in {}", path.display());

    let file = CollectionFile::new(path);
    let mut collection = file.load()?;
    let stats = normalize_collection(&mut collection, now)?;

    if options.dry_run {
        info!("Dry run, not writing {}", path.display());
    } else {
        file.save(&collection)?;
    }

    info!(
        normalized = stats.normalized,
        total = stats.total,
        "Normalized {}/{} showtimes in {}",
        stats.normalized,
        stats.total,
        path.display()
    );
    Ok(stats)
}

/// Process every path in order. `on_file` sees each report as it lands.
pub fn run_batch<F>(
    paths: &[PathBuf],
    now: NaiveDateTime,
    options: &BatchOptions,
    mut on_file: F,
) -> BatchSummary
where
    F: FnMut(&FileReport),
{
    info!("Starting datetime normalization for {} files", paths.len());

    let mut summary = BatchSummary::default();
    for path in paths {
        let report = match normalize_file(path, now, options) {
            Ok(stats) => FileReport {
                path: path.clone(),
                stats,
                error: None,
            },
            Err(e) => {
                error!("{}", e);
                FileReport {
                    path: path.clone(),
                    stats: NormalizeStats::default(),
                    error: Some(e),
                }
            }
        };
        on_file(&report);
        summary.reports.push(report);
    }

    if summary.is_success() {
        info!(
            "Normalization complete: {}/{} files processed successfully",
            summary.files_ok(),
            summary.files_total()
        );
    } else {
        warn!(
            "Normalization complete: {}/{} files processed successfully",
            summary.files_ok(),
            summary.files_total()
        );
    }
    summary
}

/// Files directly inside `data_dir` whose name ends with `suffix`, sorted.
pub fn discover_files(data_dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, NormalizeError> {
    let discover_error = |source: std::io::Error| NormalizeError::Discover {
        path: data_dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(data_dir).map_err(discover_error)? {
        let entry = entry.map_err(discover_error)?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
