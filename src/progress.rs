//! Progress reporting utilities using indicatif.
//!
//! The library never prints progress itself. It calls a [`ProgressCallback`]
//! and lets the caller decide how (or whether) to display it. [`Progress`]
//! is the console implementation used by the binary: a spinner while
//! walking directories and one line per completed percent while
//! consolidating.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Phase name used while walking directories.
pub const PHASE_WALKING: &str = "walking";

/// Phase name used while consolidating a report.
pub const PHASE_CONSOLIDATING: &str = "consolidating";

/// Progress callback for long-running phases.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "walking", "consolidating")
    /// * `total` - Total number of items to process, 0 if unknown
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each item processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `path` - Path or name being processed
    fn on_progress(&self, current: usize, path: &str);

    /// Called whenever cumulative progress crosses a new whole percent.
    ///
    /// # Arguments
    ///
    /// * `percent` - Completed percentage (1..=100)
    /// * `processed` - Number of items processed so far
    fn on_percent(&self, _percent: u8, _processed: usize) {}

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);

    /// Called to update the progress message.
    fn on_message(&self, _message: &str) {}
}

/// Tracks completion and reports each newly crossed integer percentage.
///
/// # Example
///
/// ```
/// use namedupe::progress::PercentTracker;
///
/// let mut tracker = PercentTracker::new(3);
/// assert_eq!(tracker.advance(), Some(33));
/// assert_eq!(tracker.advance(), Some(66));
/// assert_eq!(tracker.advance(), Some(100));
/// ```
#[derive(Debug, Clone)]
pub struct PercentTracker {
    total: usize,
    processed: usize,
    last_percent: u8,
}

impl PercentTracker {
    /// Create a tracker for `total` items.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            processed: 0,
            last_percent: 0,
        }
    }

    /// Mark one more item as processed.
    ///
    /// Returns the new percentage if it is greater than the last one reported.
    pub fn advance(&mut self) -> Option<u8> {
        self.processed += 1;
        if self.total == 0 {
            return None;
        }
        let percent = (self.processed.min(self.total) * 100 / self.total) as u8;
        if percent > self.last_percent {
            self.last_percent = percent;
            Some(percent)
        } else {
            None
        }
    }

    /// Number of items processed so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed
    }
}

/// Console progress reporter.
pub struct Progress {
    walking: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use namedupe::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            walking: Mutex::new(None),
            quiet,
        }
    }

    fn walking_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn with_walking<F: FnOnce(&ProgressBar)>(&self, f: F) {
        if let Ok(guard) = self.walking.lock() {
            if let Some(pb) = guard.as_ref() {
                f(pb);
            }
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }

        match phase {
            PHASE_WALKING => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::walking_style());
                pb.set_message("Searching");
                pb.enable_steady_tick(Duration::from_millis(100));
                if let Ok(mut walking) = self.walking.lock() {
                    *walking = Some(pb);
                }
            }
            PHASE_CONSOLIDATING => println!("deduplicating {total} files..."),
            _ => {}
        }
    }

    fn on_progress(&self, current: usize, _path: &str) {
        self.with_walking(|pb| pb.set_position(current as u64));
    }

    fn on_percent(&self, percent: u8, _processed: usize) {
        if !self.quiet {
            println!("{percent:>3}% completed");
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if phase == PHASE_WALKING {
            if let Ok(mut walking) = self.walking.lock() {
                if let Some(pb) = walking.take() {
                    pb.finish_and_clear();
                }
            }
        }
    }

    fn on_message(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut shown = false;
        self.with_walking(|pb| {
            pb.set_message(message.to_string());
            shown = true;
        });
        if !shown {
            println!("{message}");
        }
    }
}
