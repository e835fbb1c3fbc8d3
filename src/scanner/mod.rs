//! Scanner module for directory traversal and report building.
//!
//! This module provides functionality for:
//! - Single-threaded, sorted directory walking using walkdir
//! - Hidden file and symlink filtering
//! - Grouping discovered files by base name into a [`Report`](crate::report::Report)
//!
//! # Architecture
//!
//! - [`walker`]: Directory traversal and file discovery
//! - [`builder`]: Turns walked files into report occurrences
//!
//! # Example
//!
//! ```no_run
//! use namedupe::scanner::ReportBuilder;
//! use std::path::PathBuf;
//!
//! let builder = ReportBuilder::new(std::env::current_dir().unwrap());
//! let (report, summary) = builder.build(&[PathBuf::from("Alice"), PathBuf::from("Bob")]);
//! println!("{} names, {} files", report.len(), summary.files_recorded);
//! ```

pub mod builder;
pub mod walker;

use std::path::PathBuf;

pub use builder::{relative_directory, stat_occurrence, ReportBuilder, ScanSummary};
pub use walker::Walker;

/// Leading character that marks a hidden file.
pub const HIDDEN_MARKER: char = '.';

/// A non-directory entry discovered while walking.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path to the entry as produced by the walk
    pub path: PathBuf,
    /// Base name of the entry
    pub file_name: String,
    /// Whether this entry is a symbolic link
    pub is_symlink: bool,
}

impl FileEntry {
    /// Create a new FileEntry for a regular file.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            is_symlink: false,
        }
    }

    /// Whether the entry's name marks it as hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.file_name.starts_with(HIDDEN_MARKER)
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Skip files whose names start with `.`.
    pub skip_hidden: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self { skip_hidden: true }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
