//! Report building: walks search roots and groups files by base name.
//!
//! Every discovered file becomes an [`Occurrence`] keyed by its base name.
//! The occurrence's directory is expressed relative to the builder's base
//! directory (normally the current working directory) rather than to the
//! search root, so the first path segment names the account the file
//! belongs to.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use super::{FileEntry, ScanError, Walker, WalkerConfig};
use crate::progress::{ProgressCallback, PHASE_WALKING};
use crate::report::{Occurrence, Report};

/// Statistics collected while building a report.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of search roots walked
    pub roots: usize,
    /// Number of files recorded in the report
    pub files_recorded: usize,
    /// Number of hidden files skipped
    pub hidden_skipped: usize,
    /// Number of symbolic links skipped
    pub symlinks_skipped: usize,
    /// Number of files skipped because their path is not valid UTF-8
    pub non_utf8_skipped: usize,
    /// Number of files recorded with the `file not found` flag
    pub unreadable: usize,
    /// Errors encountered while walking
    pub scan_errors: Vec<ScanError>,
}

/// Builds a [`Report`] from a list of search roots.
pub struct ReportBuilder {
    base: PathBuf,
    config: WalkerConfig,
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl ReportBuilder {
    /// Create a builder whose occurrence directories are relative to `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            config: WalkerConfig::default(),
            progress_callback: None,
        }
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walk every root in order and build the report.
    ///
    /// Walk errors and stat failures never abort the build; they are logged
    /// and collected in the returned summary.
    pub fn build(&self, roots: &[PathBuf]) -> (Report, ScanSummary) {
        let mut report = Report::new();
        let mut summary = ScanSummary::default();

        if let Some(cb) = &self.progress_callback {
            cb.on_phase_start(PHASE_WALKING, 0);
        }

        for root in roots {
            log::info!("searching all files in {}", root.display());
            if let Some(cb) = &self.progress_callback {
                cb.on_message(&format!("Searching {}", root.display()));
            }
            summary.roots += 1;

            let search_root = self.resolve(root);
            let walker = Walker::new(&search_root, self.config.clone());
            for result in walker.walk() {
                match result {
                    Ok(entry) => self.add_entry(&mut report, &mut summary, entry),
                    Err(e) => {
                        log::warn!("{}", e);
                        summary.scan_errors.push(e);
                    }
                }
            }
        }

        if let Some(cb) = &self.progress_callback {
            cb.on_phase_end(PHASE_WALKING);
        }

        log::info!(
            "Recorded {} files under {} names ({} seen more than once)",
            summary.files_recorded,
            report.len(),
            report.duplicated_count()
        );
        log::debug!(
            "Skipped {} hidden files, {} symlinks and {} non-UTF-8 paths; {} unreadable; {} walk errors",
            summary.hidden_skipped,
            summary.symlinks_skipped,
            summary.non_utf8_skipped,
            summary.unreadable,
            summary.scan_errors.len()
        );

        (report, summary)
    }

    /// Relative roots are taken relative to the base directory.
    fn resolve(&self, root: &Path) -> PathBuf {
        if root.is_absolute() {
            root.to_path_buf()
        } else {
            self.base.join(root)
        }
    }

    fn add_entry(&self, report: &mut Report, summary: &mut ScanSummary, entry: FileEntry) {
        if self.config.skip_hidden && entry.is_hidden() {
            log::trace!("Skipping hidden file: {}", entry.path.display());
            summary.hidden_skipped += 1;
            return;
        }
        if entry.is_symlink {
            log::trace!("Skipping symlink: {}", entry.path.display());
            summary.symlinks_skipped += 1;
            return;
        }
        // Names must survive the JSON report unchanged.
        if entry.path.to_str().is_none() {
            log::warn!("Skipping {}: path is not valid UTF-8", entry.path.display());
            summary.non_utf8_skipped += 1;
            return;
        }

        let parent = entry.path.parent().unwrap_or_else(|| Path::new(""));
        let directory = relative_directory(parent, &self.base);
        let occurrence = stat_occurrence(&entry.path, directory);
        if occurrence.file_not_found {
            summary.unreadable += 1;
        }

        summary.files_recorded += 1;
        if let Some(cb) = &self.progress_callback {
            cb.on_progress(summary.files_recorded, &entry.file_name);
        }
        report.record(entry.file_name, occurrence);
    }
}

/// Build an occurrence for `path`, reading its modification time.
///
/// A file that cannot be stat'ed still yields a record, with a zero
/// timestamp and the `file not found` flag set.
#[must_use]
pub fn stat_occurrence(path: &Path, directory: String) -> Occurrence {
    let modified = std::fs::symlink_metadata(path)
        .and_then(|m| m.modified())
        .map(|time| match time.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs_f64(),
            Err(e) => -e.duration().as_secs_f64(),
        });

    match modified {
        Ok(seconds) => Occurrence::new(directory, seconds),
        Err(e) => {
            log::warn!("Could not read modification time of {}: {}", path.display(), e);
            Occurrence::not_found(directory)
        }
    }
}

/// Express `dir` relative to `base` using `/` separators.
///
/// Absolute directories outside `base` climb out of it with `..`. They
/// keep their full path only when the two share no root, such as
/// different drives. The base itself is `.`.
///
/// # Example
///
/// ```
/// use namedupe::scanner::relative_directory;
/// use std::path::Path;
///
/// assert_eq!(relative_directory(Path::new("/home/u/Alice/docs"), Path::new("/home/u")), "Alice/docs");
/// assert_eq!(relative_directory(Path::new("/tmp/x/B"), Path::new("/home/u")), "../../tmp/x/B");
/// assert_eq!(relative_directory(Path::new("./Alice"), Path::new("/home/u")), "Alice");
/// ```
#[must_use]
pub fn relative_directory(dir: &Path, base: &Path) -> String {
    let relative = relative_path(dir, base);

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            Component::RootDir => Some(String::new()),
            Component::ParentDir => Some("..".to_string()),
            Component::Prefix(p) => Some(p.as_os_str().to_string_lossy().into_owned()),
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
        })
        .collect();

    match parts.as_slice() {
        [] => ".".to_string(),
        [root] if root.is_empty() => "/".to_string(),
        _ => parts.join("/"),
    }
}

fn relative_path(dir: &Path, base: &Path) -> PathBuf {
    if !dir.is_absolute() {
        return dir.to_path_buf();
    }

    let dir_parts: Vec<Component> = dir.components().collect();
    let base_parts: Vec<Component> = base.components().collect();
    if dir_parts.first() != base_parts.first() {
        return dir.to_path_buf();
    }

    let common = dir_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push(Component::ParentDir);
    }
    for part in &dir_parts[common..] {
        relative.push(part);
    }
    relative
}
