//! Lookup of a single file name in a report.

use std::io;

use super::csv::newest_first;
use crate::report::Report;

/// Prints every location of one file name, newest first.
pub struct FindOutput<'a> {
    report: &'a Report,
    name: &'a str,
}

impl<'a> FindOutput<'a> {
    /// Create a lookup for `name`.
    #[must_use]
    pub fn new(report: &'a Report, name: &'a str) -> Self {
        Self { report, name }
    }

    /// Write the lookup result to the given writer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        match self.report.get(self.name) {
            Some(entries) => {
                writeln!(writer, "'{}' was found in {} location(s):", self.name, entries.len())?;
                for occurrence in newest_first(entries) {
                    let flag = if occurrence.file_not_found {
                        " (file not found)"
                    } else {
                        ""
                    };
                    writeln!(
                        writer,
                        "  {}  {}{}",
                        occurrence.modified_display(),
                        occurrence.directory,
                        flag
                    )?;
                }
            }
            None => writeln!(writer, "'{}' is not in the report", self.name)?,
        }
        writer.flush()
    }
}
