//! Grouping of report occurrences and winner selection.
//!
//! For one file name, every occurrence is split into an account and a
//! sub-directory, the account is mapped to its destination, and the
//! occurrences are grouped by `(destination, sub-directory)`. Within each
//! group the most recently modified occurrence wins and is the only one
//! copied.

use std::collections::BTreeMap;

use super::spec::DestinationMap;
use crate::report::Occurrence;

/// Separator used in report directories.
pub const SEPARATOR: char = '/';

/// An occurrence together with the account it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// Account (first directory segment)
    pub account: &'a str,
    /// The recorded occurrence
    pub occurrence: &'a Occurrence,
}

/// `destination -> sub-directory -> candidates`, in discovery order.
pub type Groups<'a> = BTreeMap<&'a str, BTreeMap<&'a str, Vec<Candidate<'a>>>>;

/// A single file copy decided by the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyJob<'a> {
    /// File base name
    pub file_name: &'a str,
    /// Destination folder name
    pub destination: &'a str,
    /// Sub-directory below the account and the destination
    pub sub_directory: &'a str,
    /// Account holding the winning copy
    pub account: &'a str,
    /// Modification time of the winning copy
    pub last_modified: f64,
}

/// Why an occurrence was left out of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The account has no destination mapping
    UnmappedAccount(String),
    /// The file could not be stat'ed when the report was built
    FileNotFound,
    /// The sub-directory would leave the destination tree
    UnsafePath(String),
}

/// Copy jobs and skipped occurrences for one file name.
#[derive(Debug, Default)]
pub struct FilePlan<'a> {
    /// Winners to copy, ordered by destination then sub-directory
    pub jobs: Vec<CopyJob<'a>>,
    /// Occurrences that were left out
    pub skipped: Vec<SkipReason>,
}

/// Split a report directory into account and sub-directory at the first
/// separator. A directory without a separator is an account root.
///
/// # Example
///
/// ```
/// use namedupe::consolidate::plan::split_directory;
///
/// assert_eq!(split_directory("Joe/photos/2019"), ("Joe", "photos/2019"));
/// assert_eq!(split_directory("Joe"), ("Joe", ""));
/// ```
#[must_use]
pub fn split_directory(directory: &str) -> (&str, &str) {
    directory
        .split_once(SEPARATOR)
        .unwrap_or((directory, ""))
}

/// Non-empty components of a sub-directory.
pub fn components(sub_directory: &str) -> impl Iterator<Item = &str> {
    sub_directory.split(SEPARATOR).filter(|c| !c.is_empty() && *c != ".")
}

/// Group the occurrences of one file name by destination and sub-directory.
pub fn group_occurrences<'a>(
    entries: &'a [Occurrence],
    destinations: &'a DestinationMap,
    skipped: &mut Vec<SkipReason>,
) -> Groups<'a> {
    let mut groups: Groups<'a> = BTreeMap::new();

    for occurrence in entries {
        if occurrence.file_not_found {
            skipped.push(SkipReason::FileNotFound);
            continue;
        }

        let (account, sub_directory) = split_directory(&occurrence.directory);
        let Some(destination) = destinations.destination_for(account) else {
            skipped.push(SkipReason::UnmappedAccount(account.to_string()));
            continue;
        };
        if components(sub_directory).any(|c| c == "..") {
            skipped.push(SkipReason::UnsafePath(occurrence.directory.clone()));
            continue;
        }

        groups
            .entry(destination)
            .or_default()
            .entry(sub_directory)
            .or_default()
            .push(Candidate {
                account,
                occurrence,
            });
    }

    groups
}

/// The most recently modified candidate. Ties go to the later candidate.
#[must_use]
pub fn pick_winner<'a, 'b>(candidates: &'b [Candidate<'a>]) -> Option<&'b Candidate<'a>> {
    candidates.iter().max_by(|a, b| {
        a.occurrence
            .last_modified
            .total_cmp(&b.occurrence.last_modified)
    })
}

/// Decide which occurrences of `file_name` are copied where.
#[must_use]
pub fn plan_file<'a>(
    file_name: &'a str,
    entries: &'a [Occurrence],
    destinations: &'a DestinationMap,
) -> FilePlan<'a> {
    let mut plan = FilePlan::default();
    let groups = group_occurrences(entries, destinations, &mut plan.skipped);

    for (&destination, sub_directories) in &groups {
        for (&sub_directory, candidates) in sub_directories {
            if let Some(winner) = pick_winner(candidates) {
                plan.jobs.push(CopyJob {
                    file_name,
                    destination,
                    sub_directory,
                    account: winner.account,
                    last_modified: winner.occurrence.last_modified,
                });
            }
        }
    }

    plan
}
