//! Count summary formatter.
//!
//! Lists every file name with the number of places it was found and the
//! directory holding its most recent copy, least duplicated first.

use std::io;

use crate::report::{Occurrence, Report};

/// One row of the count summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CountRow<'a> {
    /// Number of occurrences
    pub count: usize,
    /// File base name
    pub file_name: &'a str,
    /// Directory of the most recently modified occurrence
    pub latest_directory: &'a str,
}

/// Count summary output formatter.
pub struct CountsOutput<'a> {
    report: &'a Report,
}

impl<'a> CountsOutput<'a> {
    /// Create a new count summary formatter.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Rows ordered by ascending count; equal counts keep name order.
    #[must_use]
    pub fn rows(&self) -> Vec<CountRow<'a>> {
        let mut rows: Vec<CountRow<'a>> = self
            .report
            .iter()
            .map(|(file_name, entries)| CountRow {
                count: entries.len(),
                file_name,
                latest_directory: latest(entries).map_or("", |o| o.directory.as_str()),
            })
            .collect();
        rows.sort_by_key(|row| row.count);
        rows
    }

    /// Write the summary to the given writer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "count  filename, directory last found in")?;
        writeln!(writer, "------+{}", "-".repeat(74))?;
        for row in self.rows() {
            writeln!(writer, "{:>5} | {}", row.count, row.file_name)?;
            writeln!(writer, "      | {}", row.latest_directory)?;
        }
        writer.flush()
    }
}

/// Most recently modified occurrence. Ties go to the later record.
fn latest(entries: &[Occurrence]) -> Option<&Occurrence> {
    entries
        .iter()
        .max_by(|a, b| a.last_modified.total_cmp(&b.last_modified))
}
