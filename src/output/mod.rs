//! Output formatters for duplication reports.
//!
//! This module provides the render modes for a loaded report:
//! - CSV (default): one line per file name, newest occurrence first
//! - JSON: the whole report with readable timestamps
//! - Counts: file names ordered by how often they occur
//!
//! plus [`find`] for looking up a single file name.
//!
//! Rendering never mutates the report; readable timestamps are produced
//! into separate display structures.
//!
//! # Example
//!
//! ```no_run
//! use namedupe::output::{render, RenderMode};
//! use namedupe::report::Report;
//! use std::path::Path;
//!
//! let report = Report::load(Path::new("duplication-report.txt")).unwrap();
//! render(&report, RenderMode::Counts, std::io::stdout()).unwrap();
//! ```

pub mod counts;
pub mod csv;
pub mod find;
pub mod json;

use std::io;

use thiserror::Error;

use crate::report::Report;

// Re-export main types
pub use counts::CountsOutput;
pub use csv::CsvOutput;
pub use find::FindOutput;
pub use json::JsonOutput;

/// Errors that can occur while rendering a report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Comma-separated, one line per file name
    #[default]
    Csv,
    /// Indented, key-sorted JSON
    Json,
    /// Occurrence counts, ascending
    Counts,
}

/// Write `report` to `writer` in the given mode.
///
/// # Errors
///
/// Returns [`OutputError`] if writing or serialization fails.
pub fn render<W: io::Write>(report: &Report, mode: RenderMode, writer: W) -> Result<(), OutputError> {
    match mode {
        RenderMode::Csv => CsvOutput::new(report).write_to(writer)?,
        RenderMode::Json => JsonOutput::new(report).write_to(writer)?,
        RenderMode::Counts => CountsOutput::new(report).write_to(writer)?,
    }
    Ok(())
}
