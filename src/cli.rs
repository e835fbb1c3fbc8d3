//! Command-line interface definitions for namedupe.
//!
//! There are no subcommands; flags select the mode:
//!
//! ```bash
//! # Scan directories and write a duplication report
//! namedupe Joe Mary Bob
//!
//! # Print a report as CSV (default), JSON or counts
//! namedupe --report duplication-report.txt --counts
//!
//! # Look up one file name
//! namedupe --report duplication-report.txt --find taxes.pdf
//!
//! # Copy the newest copy of every file into per-destination folders
//! namedupe --report duplication-report.txt --deduplicate Family:Joe,Mary Work:Bob
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::consolidate::DestinationSpec;
use crate::output::RenderMode;

/// Find same-named files across directories and consolidate the newest copies.
///
/// Identifies duplicate files by name and generates a report of every
/// location where each file exists, including the last modification time in
/// each location. With no optional arguments, only the report is produced.
#[derive(Debug, Parser)]
#[command(name = "namedupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base directories to search
    #[arg(value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,

    /// Read the report with this file name, then print, find or deduplicate
    #[arg(short, long, value_name = "NAME")]
    pub report: Option<PathBuf>,

    /// Only show the number of copies per file name
    #[arg(short, long, conflicts_with = "json")]
    pub counts: bool,

    /// Print the report as JSON instead of CSV
    #[arg(short, long)]
    pub json: bool,

    /// Copy the most recently modified copy of each file into destination folders
    ///
    /// Each value is DESTINATION:ACCOUNT[,ACCOUNT...], e.g. `Family:Joe,Mary`.
    #[arg(
        short = 'D',
        long,
        value_name = "DEST:ACCOUNTS",
        num_args = 1..,
        requires = "report",
        value_parser = parse_destination
    )]
    pub deduplicate: Vec<DestinationSpec>,

    /// Look up one file name in the report
    #[arg(short, long, value_name = "FILE")]
    pub find: Option<String>,

    /// Verify a consolidation (not implemented)
    #[arg(long)]
    pub verify: bool,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH", env = "NAMEDUPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Placeholder verification
    Verify,
    /// Consolidate the report into destination folders
    Deduplicate(PathBuf),
    /// Look up one file name, in the given report if any
    Find {
        /// Report to search, `None` for the default report
        report: Option<PathBuf>,
        /// File name to look up
        name: String,
    },
    /// Print the report
    Render(PathBuf, RenderMode),
    /// Scan the directories and write a report
    Scan,
    /// Nothing was asked for
    Idle,
}

impl Cli {
    /// Resolve the flags into a mode.
    ///
    /// Precedence: verify, deduplicate, find, render, scan.
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.verify {
            return Mode::Verify;
        }
        if let Some(report) = &self.report {
            if !self.deduplicate.is_empty() {
                return Mode::Deduplicate(report.clone());
            }
        }
        if let Some(name) = &self.find {
            return Mode::Find {
                report: self.report.clone(),
                name: name.clone(),
            };
        }
        if let Some(report) = &self.report {
            return Mode::Render(report.clone(), self.render_mode());
        }
        if self.directories.is_empty() {
            Mode::Idle
        } else {
            Mode::Scan
        }
    }

    /// Render mode selected by `--counts` / `--json`.
    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        if self.counts {
            RenderMode::Counts
        } else if self.json {
            RenderMode::Json
        } else {
            RenderMode::Csv
        }
    }
}

/// Parse a `destination:account,...` argument.
///
/// # Errors
///
/// Returns a message describing why the specification is malformed.
pub fn parse_destination(s: &str) -> Result<DestinationSpec, String> {
    s.parse().map_err(|e: crate::consolidate::SpecError| e.to_string())
}
