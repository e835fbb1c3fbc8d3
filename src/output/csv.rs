//! CSV output formatter for duplication reports.
//!
//! One line is written per file name, in sorted name order:
//!
//! ```text
//! "report.pdf",Tue Nov 14 22:13:20 2023,"B",Mon Nov 13 10:00:00 2023,"A"
//! ```
//!
//! Occurrences follow the name, newest first, each as a timestamp and a
//! quoted directory. Embedded double quotes are replaced with single quotes
//! rather than escaped.

use std::io;

use crate::report::{Occurrence, Report};

/// Header line written before the rows.
pub const CSV_HEADER: &str = "filename,modified timestamp,directory,modified timestamp,directory,...";

/// CSV output formatter.
pub struct CsvOutput<'a> {
    report: &'a Report,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{CSV_HEADER}")?;
        for (name, entries) in self.report.iter() {
            writeln!(writer, "{}", csv_line(name, entries))?;
        }
        writer.flush()
    }
}

/// Occurrences ordered newest first. Ties keep discovery order.
#[must_use]
pub fn newest_first(entries: &[Occurrence]) -> Vec<&Occurrence> {
    let mut sorted: Vec<&Occurrence> = entries.iter().collect();
    sorted.sort_by(|a, b| b.last_modified.total_cmp(&a.last_modified));
    sorted
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "'"))
}

fn csv_line(name: &str, entries: &[Occurrence]) -> String {
    let mut fields = vec![quote(name)];
    for occurrence in newest_first(entries) {
        fields.push(occurrence.modified_display());
        fields.push(quote(&occurrence.directory));
    }
    fields.join(",")
}
