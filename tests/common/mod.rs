//! Shared helpers for integration tests.

use std::fs;
use std::path::Path;

use filetime::FileTime;

/// Write `content` to `path`, creating parents, and pin its mtime.
pub fn write_file(path: &Path, content: &str, mtime: i64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    filetime::set_file_mtime(path, FileTime::from_unix_time(mtime, 0)).unwrap();
}
