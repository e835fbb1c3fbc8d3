//! JSON output formatter for duplication reports.
//!
//! Emits the report as indented JSON with keys sorted and every timestamp
//! replaced by its readable form:
//!
//! ```json
//! {
//!   "report.pdf": [
//!     {
//!       "directory": "A",
//!       "last_modified": "Mon Nov 13 10:00:00 2023"
//!     }
//!   ]
//! }
//! ```
//!
//! The report itself is left untouched; the converted copy exists only for
//! display.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::report::{Occurrence, Report};

/// A single occurrence in JSON output.
///
/// Field order matches sorted key order.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOccurrence {
    /// Directory the file was found in
    pub directory: String,
    /// Set when the file could not be stat'ed
    #[serde(rename = "file not found", skip_serializing_if = "std::ops::Not::not")]
    pub file_not_found: bool,
    /// Readable modification time
    pub last_modified: String,
}

impl From<&Occurrence> for JsonOccurrence {
    fn from(occurrence: &Occurrence) -> Self {
        Self {
            directory: occurrence.directory.clone(),
            file_not_found: occurrence.file_not_found,
            last_modified: occurrence.modified_display(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct JsonOutput {
    /// Occurrences per file name
    pub files: BTreeMap<String, Vec<JsonOccurrence>>,
}

impl JsonOutput {
    /// Create JSON output from a report.
    #[must_use]
    pub fn new(report: &Report) -> Self {
        let files = report
            .iter()
            .map(|(name, entries)| {
                (
                    name.to_string(),
                    entries.iter().map(JsonOccurrence::from).collect(),
                )
            })
            .collect();
        Self { files }
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), super::OutputError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
