//! Consolidation of duplicate-named files into destination folders.
//!
//! This module provides functionality for:
//! - Parsing `destination:account,...` specifications
//! - Grouping report occurrences by destination and sub-directory
//! - Picking the most recently modified copy in each group
//! - Recreating the directory structure and copying the winners
//!
//! # Architecture
//!
//! - [`spec`]: Destination specifications and the account lookup
//! - [`plan`]: Pure grouping and winner selection
//! - [`executor`]: Directory creation, file copying and failure logging
//!
//! # Example
//!
//! ```no_run
//! use namedupe::consolidate::{ConsolidateOptions, Consolidator, DestinationSpec};
//! use std::path::{Path, PathBuf};
//!
//! let specs: Vec<DestinationSpec> = vec!["Family:Joe,Mary".parse().unwrap()];
//! let options = ConsolidateOptions {
//!     source_root: PathBuf::from("."),
//!     target_dir: PathBuf::from("DEDUPLICATED"),
//!     unreadable_log: PathBuf::from("unreadable-files-report.txt"),
//! };
//! let consolidator = Consolidator::new(&specs, options).unwrap();
//! let summary = consolidator.run(Path::new("duplication-report.txt")).unwrap();
//! println!("{}", summary.summary());
//! ```

pub mod executor;
pub mod plan;
pub mod spec;

// Re-export commonly used types
pub use executor::{
    copy_file, ensure_dir, ConsolidateError, ConsolidateOptions, ConsolidateSummary, Consolidator,
};
pub use plan::{plan_file, pick_winner, split_directory, CopyJob, FilePlan, SkipReason};
pub use spec::{DestinationMap, DestinationSpec, SpecError};
