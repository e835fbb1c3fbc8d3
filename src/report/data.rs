//! Data structures for duplication reports.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Layout used for human-readable timestamps (`ctime` style).
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// One sighting of a file in a specific directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Directory the file was found in, relative to the scan's base directory.
    pub directory: String,
    /// Modification time in seconds since the Unix epoch.
    pub last_modified: f64,
    /// Set when the file disappeared between listing and stat.
    #[serde(
        rename = "file not found",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub file_not_found: bool,
}

impl Occurrence {
    /// Create a record for a file whose modification time was read.
    #[must_use]
    pub fn new(directory: impl Into<String>, last_modified: f64) -> Self {
        Self {
            directory: directory.into(),
            last_modified,
            file_not_found: false,
        }
    }

    /// Create a record for a file that could not be stat'ed.
    #[must_use]
    pub fn not_found(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            last_modified: 0.0,
            file_not_found: true,
        }
    }

    /// Modification time rendered for display.
    #[must_use]
    pub fn modified_display(&self) -> String {
        format_timestamp(self.last_modified)
    }
}

/// Mapping from file base name to every occurrence of that name.
///
/// Keys are kept sorted so iteration is deterministic. Occurrences for a
/// single name keep discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    files: BTreeMap<String, Vec<Occurrence>>,
}

impl Report {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an occurrence to the entry for `name`, creating it if needed.
    pub fn record(&mut self, name: impl Into<String>, occurrence: Occurrence) {
        self.files.entry(name.into()).or_default().push(occurrence);
    }

    /// Occurrences recorded for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Occurrence]> {
        self.files.get(name).map(Vec::as_slice)
    }

    /// Iterate over file names and their occurrences in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Occurrence])> {
        self.files
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Number of distinct file names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the report has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of occurrences across all file names.
    #[must_use]
    pub fn occurrence_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Number of file names seen in more than one location.
    #[must_use]
    pub fn duplicated_count(&self) -> usize {
        self.files.values().filter(|entries| entries.len() > 1).count()
    }
}

/// Render seconds since the epoch as a local `ctime`-style string.
///
/// Out-of-range values fall back to the raw number.
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    let secs = seconds.floor();
    let nanos = ((seconds - secs) * 1e9) as u32;
    match DateTime::from_timestamp(secs as i64, nanos) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        None => seconds.to_string(),
    }
}
