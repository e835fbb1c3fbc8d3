//! namedupe - same-name duplicate finder and consolidator
//!
//! Scans directory trees for files that share a base name, records every
//! location and modification time in a JSON report, prints reports in
//! several formats, and consolidates the newest copy of each file into
//! per-destination folders.

pub mod cli;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod report;
pub mod scanner;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::{Cli, Mode};
use crate::config::Config;
use crate::consolidate::{ConsolidateError, ConsolidateOptions, Consolidator};
use crate::error::ExitCode;
use crate::output::{FindOutput, RenderMode};
use crate::progress::Progress;
use crate::report::{report_file_name, Report, ReportError};
use crate::scanner::{ReportBuilder, WalkerConfig};

/// Run the application with the current directory as base.
///
/// # Errors
///
/// Returns an error for failures that end the run early.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    let base = std::env::current_dir().context("Failed to determine the current directory")?;
    run_in(cli, &base)
}

/// Run the application, resolving reports, search roots and the
/// consolidation directory against `base`.
///
/// # Errors
///
/// Returns an error for failures that end the run early. Missing reports
/// and exhausted report names are reported on stdout and are not errors.
pub fn run_in(cli: Cli, base: &Path) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.mode() {
        Mode::Verify => verify(),
        Mode::Deduplicate(report) => deduplicate(&cli, &config, base, &report)?,
        Mode::Find { report, name } => {
            let path = report.unwrap_or_else(|| PathBuf::from(report_file_name(&config.report_name, 0)));
            find(base, &path, &name)?;
        }
        Mode::Render(report, mode) => print_report(base, &report, mode)?,
        Mode::Scan => generate_report(&cli, &config, base)?,
        Mode::Idle => {
            println!("I have nothing to do here, please list some directories for me to search.");
        }
    }

    Ok(ExitCode::Success)
}

fn verify() {
    println!("As I said, I am not sure I can do this yet...");
    println!("Nope.");
}

fn missing_report(base: &Path, report: &Path) {
    println!(
        "no report by the name of '{}' was found in the current directory '{}'",
        report.display(),
        base.display()
    );
}

/// Load a report, printing the missing-report diagnostic if it does not exist.
fn load_report(base: &Path, report: &Path) -> Result<Option<Report>> {
    match Report::load(&base.join(report)) {
        Ok(loaded) => Ok(Some(loaded)),
        Err(e) if e.is_not_found() => {
            missing_report(base, report);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(base: &Path, report: &Path, mode: RenderMode) -> Result<()> {
    if let Some(loaded) = load_report(base, report)? {
        output::render(&loaded, mode, std::io::stdout().lock())
            .context("Failed to print report")?;
    }
    Ok(())
}

fn find(base: &Path, report: &Path, name: &str) -> Result<()> {
    if let Some(loaded) = load_report(base, report)? {
        FindOutput::new(&loaded, name)
            .write_to(std::io::stdout().lock())
            .context("Failed to print lookup")?;
    }
    Ok(())
}

fn generate_report(cli: &Cli, config: &Config, base: &Path) -> Result<()> {
    let progress = Arc::new(Progress::new(cli.quiet));
    let builder = ReportBuilder::new(base)
        .with_config(WalkerConfig {
            skip_hidden: config.skip_hidden,
        })
        .with_progress_callback(progress);
    let (report, _summary) = builder.build(&cli.directories);

    match report.save_unique(base, &config.report_name, config.max_report_names) {
        Ok(path) => {
            println!("I have written the report to '{}'. Goodbye.", path.display());
            Ok(())
        }
        Err(ReportError::NamesExhausted { base: name, .. }) => {
            println!(
                "Unable to create a uniquely named report. Please delete files with names like '{}'",
                name
            );
            Ok(())
        }
        Err(e) => Err(e).context("Failed to save report"),
    }
}

fn deduplicate(cli: &Cli, config: &Config, base: &Path, report: &Path) -> Result<()> {
    let options = ConsolidateOptions {
        source_root: base.to_path_buf(),
        target_dir: base.join(&config.target_dir),
        unreadable_log: base.join(report_file_name(&config.unreadable_report_name, 0)),
    };

    let consolidator = match Consolidator::new(&cli.deduplicate, options) {
        Ok(c) => c.with_progress_callback(Arc::new(Progress::new(cli.quiet))),
        Err(ConsolidateError::NoDestinations) => {
            println!("Please specify some destination specifications");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match consolidator.run(&base.join(report)) {
        Ok(summary) => {
            if !cli.quiet {
                println!("{}", summary.summary());
            }
            Ok(())
        }
        Err(ConsolidateError::Report(e)) if e.is_not_found() => {
            missing_report(base, report);
            Ok(())
        }
        Err(e) => Err(e).context("Consolidation failed"),
    }
}
