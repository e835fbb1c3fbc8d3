//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding every non-directory entry. Traversal is sorted by file
//! name so repeated walks over an unchanged tree produce the same order.
//! Symbolic links are reported but never followed.
//!
//! # Example
//!
//! ```no_run
//! use namedupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("Alice"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}", file.path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root path of this walker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walker configuration.
    #[must_use]
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walk the tree, yielding every non-directory entry.
    ///
    /// Errors for individual entries are yielded in place so callers can
    /// log them and keep going.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|result| match result {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    if file_type.is_dir() {
                        return None;
                    }
                    let mut file = FileEntry::new(entry.into_path());
                    file.is_symlink = file_type.is_symlink();
                    Some(Ok(file))
                }
                Err(e) => Some(Err(convert_walk_error(e))),
            })
    }
}

fn convert_walk_error(error: walkdir::Error) -> ScanError {
    let path = error.path().map(Path::to_path_buf).unwrap_or_default();
    match error.into_io_error() {
        Some(io) if io.kind() == std::io::ErrorKind::NotFound => ScanError::NotFound(path),
        Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
            ScanError::PermissionDenied(path)
        }
        Some(source) => ScanError::Io { path, source },
        None => ScanError::Io {
            path,
            source: std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop detected"),
        },
    }
}
