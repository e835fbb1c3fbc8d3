//! I/O operations for duplication reports.
//!
//! Reports are written to `<base>.txt`, falling back to `<base>_1.txt`,
//! `<base>_2.txt` and so on when earlier names are taken. The search is
//! bounded; when every candidate is taken nothing is written.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::report::data::Report;

/// Extension appended to report base names.
pub const REPORT_EXTENSION: &str = "txt";

/// Default number of candidate names tried before giving up.
pub const DEFAULT_MAX_REPORT_NAMES: usize = 1000;

/// Errors that can occur while saving or loading a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No report exists at the given path.
    #[error("no report by the name of '{}' was found", .0.display())]
    NotFound(PathBuf),

    /// Every candidate file name was already taken.
    #[error("unable to create a uniquely named report after {attempts} attempts; please delete files with names like '{base}'")]
    NamesExhausted {
        /// Base name that was tried
        base: String,
        /// Number of candidates tried
        attempts: usize,
    },

    /// The report file is not valid report JSON.
    #[error("failed to parse report {path}: {source}")]
    Parse {
        /// Path of the report
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error occurred while accessing the report.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ReportError {
    /// Whether this error means the requested report does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// File name for the `index`-th candidate of a base name.
///
/// Index 0 is the bare name; later candidates carry an `_<index>` suffix.
///
/// # Example
///
/// ```
/// use namedupe::report::report_file_name;
///
/// assert_eq!(report_file_name("duplication-report", 0), "duplication-report.txt");
/// assert_eq!(report_file_name("duplication-report", 2), "duplication-report_2.txt");
/// ```
#[must_use]
pub fn report_file_name(base: &str, index: usize) -> String {
    if index == 0 {
        format!("{base}.{REPORT_EXTENSION}")
    } else {
        format!("{base}_{index}.{REPORT_EXTENSION}")
    }
}

/// Reserve the first free candidate name in `dir`.
///
/// The file is created with `create_new`, so a name that appears between
/// check and create counts as taken.
fn create_unique(dir: &Path, base: &str, max_names: usize) -> Result<(PathBuf, File), ReportError> {
    for index in 0..max_names {
        let path = dir.join(report_file_name(base, index));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                log::trace!("Report name taken: {}", path.display());
            }
            Err(source) => return Err(ReportError::Io { path, source }),
        }
    }
    Err(ReportError::NamesExhausted {
        base: base.to_string(),
        attempts: max_names,
    })
}

impl Report {
    /// Save the report to a fresh file in `dir` and return its path.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NamesExhausted`] if `max_names` candidates are
    /// all taken, or [`ReportError::Io`] if writing fails.
    pub fn save_unique(&self, dir: &Path, base: &str, max_names: usize) -> Result<PathBuf, ReportError> {
        let (path, file) = create_unique(dir, base, max_names)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| ReportError::Io {
            path: path.clone(),
            source: e.into(),
        })?;
        writer.flush().map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!(
            "Saved report with {} names ({} occurrences) to {}",
            self.len(),
            self.occurrence_count(),
            path.display()
        );
        Ok(path)
    }

    /// Load a report from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] if the file does not exist,
    /// [`ReportError::Parse`] if it is not a report.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ReportError::NotFound(path.to_path_buf()))
            }
            Err(source) => {
                return Err(ReportError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let report: Report = serde_json::from_str(&content).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "Loaded report with {} names ({} occurrences) from {}",
            report.len(),
            report.occurrence_count(),
            path.display()
        );
        Ok(report)
    }
}
