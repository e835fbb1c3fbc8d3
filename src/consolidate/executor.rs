//! Filesystem side of consolidation.
//!
//! Creates the destination tree, recreates sub-directories one component at
//! a time (copying directory metadata from the winning account the first
//! time each component is created) and copies winning files. Permission
//! failures on a file copy are written to the unreadable-files log and the
//! run continues; every other I/O failure ends the run.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use filetime::FileTime;
use thiserror::Error;

use super::plan::{components, plan_file, CopyJob, SkipReason};
use super::spec::{DestinationMap, DestinationSpec};
use crate::progress::{PercentTracker, ProgressCallback, PHASE_CONSOLIDATING};
use crate::report::{Report, ReportError};

/// Error type for consolidation.
#[derive(Debug, Error)]
pub enum ConsolidateError {
    /// No destination specifications were supplied.
    #[error("no destination specifications were given")]
    NoDestinations,

    /// The report could not be loaded.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// A filesystem operation failed.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ConsolidateError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where consolidation reads from and writes to.
#[derive(Debug, Clone)]
pub struct ConsolidateOptions {
    /// Directory the report's relative directories are resolved against
    pub source_root: PathBuf,
    /// Top-level consolidation directory
    pub target_dir: PathBuf,
    /// Path of the unreadable-files log
    pub unreadable_log: PathBuf,
}

/// Outcome of a consolidation run.
#[derive(Debug, Clone, Default)]
pub struct ConsolidateSummary {
    /// Number of file names processed
    pub names_processed: usize,
    /// Number of files copied
    pub files_copied: usize,
    /// Number of copies refused with a permission error
    pub permission_failures: usize,
    /// Records skipped because their account has no destination
    pub unmapped_skipped: usize,
    /// Records skipped because they were flagged `file not found`
    pub not_found_skipped: usize,
    /// Records skipped because their directory escapes the tree
    pub unsafe_skipped: usize,
    /// Accounts that had no destination
    pub unmapped_accounts: BTreeSet<String>,
    /// Path of the unreadable-files log
    pub unreadable_log: PathBuf,
}

impl ConsolidateSummary {
    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Copied {} file(s) for {} name(s)",
            self.files_copied, self.names_processed
        );
        if self.permission_failures > 0 {
            text.push_str(&format!(
                ", {} unreadable (see '{}')",
                self.permission_failures,
                self.unreadable_log.display()
            ));
        }
        if self.unmapped_skipped > 0 {
            text.push_str(&format!(
                ", {} skipped for unmapped accounts",
                self.unmapped_skipped
            ));
        }
        text
    }
}

/// Copies the newest copy of every file into per-destination folders.
pub struct Consolidator {
    destinations: DestinationMap,
    options: ConsolidateOptions,
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl Consolidator {
    /// Create a consolidator from destination specifications.
    ///
    /// # Errors
    ///
    /// Returns [`ConsolidateError::NoDestinations`] if `specs` is empty.
    pub fn new(specs: &[DestinationSpec], options: ConsolidateOptions) -> Result<Self, ConsolidateError> {
        let destinations = DestinationMap::from_specs(specs);
        if destinations.is_empty() {
            return Err(ConsolidateError::NoDestinations);
        }
        Ok(Self {
            destinations,
            options,
            progress_callback: None,
        })
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Create the top-level folder of every destination.
    ///
    /// # Errors
    ///
    /// Returns [`ConsolidateError::Io`] if a folder cannot be created.
    pub fn prepare_destinations(&self) -> Result<(), ConsolidateError> {
        for destination in self.destinations.destinations() {
            let path = self.options.target_dir.join(destination);
            fs::create_dir_all(&path).map_err(|e| ConsolidateError::io(&path, e))?;
            log::debug!("Destination ready: {}", path.display());
        }
        Ok(())
    }

    /// Prepare destinations, load the report at `report_path` and consolidate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConsolidateError::Report`] if the report is missing or
    /// invalid; nothing is copied in that case.
    pub fn run(&self, report_path: &Path) -> Result<ConsolidateSummary, ConsolidateError> {
        self.prepare_destinations()?;
        let report = Report::load(report_path)?;
        self.consolidate(&report)
    }

    /// Copy the winning occurrence of every file name in `report`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsolidateError::Io`] for any filesystem failure other
    /// than a permission error on a file copy.
    pub fn consolidate(&self, report: &Report) -> Result<ConsolidateSummary, ConsolidateError> {
        let log_path = &self.options.unreadable_log;
        let mut unreadable = LineWriter::new(
            File::create(log_path).map_err(|e| ConsolidateError::io(log_path, e))?,
        );

        let mut summary = ConsolidateSummary {
            unreadable_log: log_path.clone(),
            ..Default::default()
        };
        let mut tracker = PercentTracker::new(report.len());

        if let Some(cb) = &self.progress_callback {
            cb.on_phase_start(PHASE_CONSOLIDATING, report.len());
        }

        for (file_name, entries) in report.iter() {
            if let Some(percent) = tracker.advance() {
                if let Some(cb) = &self.progress_callback {
                    cb.on_percent(percent, tracker.processed());
                }
            }

            let plan = plan_file(file_name, entries, &self.destinations);
            self.record_skips(&plan.skipped, &mut summary);

            for job in &plan.jobs {
                self.execute(job, &mut unreadable, &mut summary)?;
            }
            summary.names_processed += 1;
        }

        unreadable
            .flush()
            .map_err(|e| ConsolidateError::io(log_path, e))?;

        if let Some(cb) = &self.progress_callback {
            cb.on_phase_end(PHASE_CONSOLIDATING);
        }
        log::info!("{}", summary.summary());
        Ok(summary)
    }

    fn record_skips(&self, skipped: &[SkipReason], summary: &mut ConsolidateSummary) {
        for reason in skipped {
            match reason {
                SkipReason::UnmappedAccount(account) => {
                    if summary.unmapped_accounts.insert(account.clone()) {
                        log::warn!(
                            "Account '{}' has no destination; its files are skipped",
                            account
                        );
                    }
                    summary.unmapped_skipped += 1;
                }
                SkipReason::FileNotFound => summary.not_found_skipped += 1,
                SkipReason::UnsafePath(directory) => {
                    log::warn!("Skipping '{}': leaves the destination tree", directory);
                    summary.unsafe_skipped += 1;
                }
            }
        }
    }

    fn execute<W: Write>(
        &self,
        job: &CopyJob<'_>,
        unreadable: &mut W,
        summary: &mut ConsolidateSummary,
    ) -> Result<(), ConsolidateError> {
        let account_root = self.options.source_root.join(job.account);
        let destination_root = self.options.target_dir.join(job.destination);

        let mut relative = PathBuf::new();
        for component in components(job.sub_directory) {
            relative.push(component);
            ensure_dir(&destination_root.join(&relative), &account_root.join(&relative))?;
        }

        let src = account_root.join(&relative).join(job.file_name);
        let dst = destination_root.join(&relative).join(job.file_name);

        match copy_file(&src, &dst) {
            Ok(()) => {
                log::debug!("Copied {} -> {}", src.display(), dst.display());
                summary.files_copied += 1;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                log::warn!("Cannot copy {}: {}", src.display(), e);
                writeln!(
                    unreadable,
                    "{}, src='{}', dst='{}'",
                    e,
                    src.display(),
                    dst.display()
                )
                .map_err(|e| ConsolidateError::io(&self.options.unreadable_log, e))?;
                summary.permission_failures += 1;
                Ok(())
            }
            Err(e) => Err(ConsolidateError::io(&src, e)),
        }
    }
}

/// Create `target` if it does not exist, copying metadata from `source`.
///
/// An existing directory is left as it is.
///
/// # Errors
///
/// Returns [`ConsolidateError::Io`] if creation fails for any reason other
/// than the directory already existing, or if metadata cannot be copied.
pub fn ensure_dir(target: &Path, source: &Path) -> Result<(), ConsolidateError> {
    match fs::create_dir(target) {
        Ok(()) => {
            log::trace!("Created {}", target.display());
            copy_metadata(source, target).map_err(|e| ConsolidateError::io(source, e))
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(ConsolidateError::io(target, e)),
    }
}

/// Copy permissions and access/modification times from `source` to `target`.
fn copy_metadata(source: &Path, target: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;
    fs::set_permissions(target, metadata.permissions())?;
    filetime::set_file_times(
        target,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
}

/// Copy a file without following symbolic links, preserving metadata.
///
/// A symlink source is recreated as a symlink at `dst`.
///
/// # Errors
///
/// Returns the underlying I/O error unchanged so callers can inspect its kind.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(src)?;

    #[cfg(unix)]
    if metadata.file_type().is_symlink() {
        let link_target = fs::read_link(src)?;
        if fs::symlink_metadata(dst).is_ok() {
            fs::remove_file(dst)?;
        }
        return std::os::unix::fs::symlink(link_target, dst);
    }

    fs::copy(src, dst)?;
    filetime::set_file_times(
        dst,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
}
