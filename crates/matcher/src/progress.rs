//! Progress reporting.
//!
//! Percentages follow a fixed layout shared by the whole check:
//!
//! | Range | Stage |
//! |-------|-------|
//! | 0..=70 | parsing, split evenly across files |
//! | 75..=90 | comparing, proportional to visited pairs |
//! | 90..=100 | caller finalization (ranking, export) |
//!
//! Observers see a non-decreasing percentage and at least one update per
//! scheduler slice.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

pub const PARSE_START: u8 = 0;
pub const PARSE_END: u8 = 70;
pub const COMPARE_START: u8 = 75;
pub const COMPARE_END: u8 = 90;
pub const FINALIZE: u8 = 95;
pub const DONE: u8 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    Parsing,
    Comparing,
    Finalizing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub stage: ProgressStage,
    pub percent: u8,
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(stage: ProgressStage, percent: u8, message: impl Into<String>) -> Self {
        Self {
            stage,
            percent: percent.min(DONE),
            message: message.into(),
        }
    }
}

impl Default for ProgressUpdate {
    fn default() -> Self {
        Self::new(ProgressStage::Parsing, PARSE_START, "Waiting")
    }
}

/// Receives progress updates. Called inline from the scan task, so
/// implementations should return quickly.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, update: &ProgressUpdate);
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressUpdate) + Send + Sync,
{
    fn on_progress(&self, update: &ProgressUpdate) {
        self(update)
    }
}

/// Observer that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _update: &ProgressUpdate) {}
}

/// Polled-status observer: publishes the latest update on a
/// `tokio::sync::watch` channel.
#[derive(Debug)]
pub struct WatchProgress {
    tx: watch::Sender<ProgressUpdate>,
}

impl WatchProgress {
    pub fn channel() -> (Self, watch::Receiver<ProgressUpdate>) {
        let (tx, rx) = watch::channel(ProgressUpdate::default());
        (Self { tx }, rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressUpdate> {
        self.tx.subscribe()
    }
}

impl ProgressObserver for WatchProgress {
    fn on_progress(&self, update: &ProgressUpdate) {
        // Succeeds even with no receivers left.
        self.tx.send_replace(update.clone());
    }
}

/// Linear position of `done` out of `total` inside `[start, end]`.
pub fn percent_in_range(start: u8, end: u8, done: u64, total: u64) -> u8 {
    if total == 0 || done >= total {
        return end;
    }
    let span = f64::from(end.saturating_sub(start));
    start + (span * done as f64 / total as f64).floor() as u8
}

/// Percent for file `index` of `count` at `file_percent` within that file,
/// mapped into the parsing range.
pub fn parse_percent(index: usize, count: usize, file_percent: u8) -> u8 {
    if count == 0 {
        return PARSE_END;
    }
    let per_file = f64::from(PARSE_END - PARSE_START) / count as f64;
    let value = f64::from(PARSE_START)
        + per_file * index as f64
        + per_file * f64::from(file_percent.min(DONE)) / 100.0;
    (value.floor() as u8).min(PARSE_END)
}

/// Wraps an observer and enforces a non-decreasing percentage.
pub struct ProgressReporter<'a> {
    observer: &'a dyn ProgressObserver,
    last: u8,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(observer: &'a dyn ProgressObserver) -> Self {
        Self { observer, last: 0 }
    }

    /// Starts from `floor` so later reports never go below it.
    pub fn starting_at(observer: &'a dyn ProgressObserver, floor: u8) -> Self {
        Self {
            observer,
            last: floor.min(DONE),
        }
    }

    pub fn last_percent(&self) -> u8 {
        self.last
    }

    pub fn report(&mut self, stage: ProgressStage, percent: u8, message: impl Into<String>) {
        let percent = percent.min(DONE).max(self.last);
        self.last = percent;
        self.observer
            .on_progress(&ProgressUpdate::new(stage, percent, message));
    }
}

impl std::fmt::Debug for ProgressReporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("last", &self.last)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn compare_range_mapping() {
        assert_eq!(percent_in_range(COMPARE_START, COMPARE_END, 0, 100), 75);
        assert_eq!(percent_in_range(COMPARE_START, COMPARE_END, 50, 100), 82);
        assert_eq!(percent_in_range(COMPARE_START, COMPARE_END, 100, 100), 90);
        assert_eq!(percent_in_range(COMPARE_START, COMPARE_END, 0, 0), 90);
    }

    #[test]
    fn parse_range_splits_files_evenly() {
        assert_eq!(parse_percent(0, 2, 0), 0);
        assert_eq!(parse_percent(0, 2, 100), 35);
        assert_eq!(parse_percent(1, 2, 50), 52);
        assert_eq!(parse_percent(1, 2, 100), 70);
        assert_eq!(parse_percent(0, 1, 100), 70);
    }

    #[test]
    fn reporter_never_goes_backwards() {
        let seen = Mutex::new(Vec::new());
        let observer = |u: &ProgressUpdate| seen.lock().unwrap().push(u.percent);
        let mut reporter = ProgressReporter::new(&observer);
        reporter.report(ProgressStage::Parsing, 40, "a");
        reporter.report(ProgressStage::Parsing, 30, "b");
        reporter.report(ProgressStage::Comparing, 200, "c");
        assert_eq!(*seen.lock().unwrap(), vec![40, 40, 100]);
    }

    #[test]
    fn watch_observer_keeps_latest() {
        let (observer, rx) = WatchProgress::channel();
        let mut reporter = ProgressReporter::starting_at(&observer, COMPARE_START);
        reporter.report(ProgressStage::Comparing, 80, "Comparing");
        reporter.report(ProgressStage::Comparing, 85, "Comparing");
        let latest = rx.borrow().clone();
        assert_eq!(latest.percent, 85);
        assert_eq!(latest.stage, ProgressStage::Comparing);
    }
}
