//! Report module for persisting scan results.
//!
//! A report maps every file base name seen during a scan to the list of
//! places it was found. Reports are written once by the scanner and later
//! reloaded read-only for rendering or consolidation.
//!
//! # Architecture
//!
//! * [`data`]: Serializable models for reports and occurrences.
//! * [`io`]: Saving under a collision-free name and loading back.

pub mod data;
pub mod io;

pub use data::{format_timestamp, Occurrence, Report};
pub use io::{report_file_name, ReportError, DEFAULT_MAX_REPORT_NAMES, REPORT_EXTENSION};
