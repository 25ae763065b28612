//! # dupscan matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` runs the near-duplicate scan over paragraphs that `ingest`
//! extracted. It profiles each paragraph once (tokens from `canonical`,
//! count vectors from `similarity`), walks the pairs the scan mode calls for,
//! pre-filters and scores them, and ranks the matches.
//!
//! The scan runs as a single async task that yields to the executor after
//! every slice (500 comparisons or 16 ms by default), so it never starves
//! other work on the runtime. A [`CancellationToken`] stops it early; the
//! matches found so far are still returned.
//!
//! ## Core Types
//!
//! - [`ScanMode`]: `Single` (pairs within one document) or `Cross` (pairs
//!   within and across all documents).
//! - [`ScanConfig`]: threshold, filter, tokenizer and slice budget.
//! - [`Scanner`] / [`run_scan`]: entry points.
//! - [`ScanOutcome`]: ranked [`MatchResult`]s, [`ScanStatus`] and
//!   [`ScanStats`].
//! - [`ProgressObserver`]: receives non-decreasing percentages in `75..=90`.
//!
//! ## Example
//!
//! ```
//! use ingest::Document;
//! use matcher::{run_scan, CancellationToken, NoProgress, ScanConfig, ScanMode, ScanStatus};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let doc = Document::new(
//!     "bank.txt",
//!     [
//!         "This is a test sentence about history.",
//!         "This is a test sentence about geography.",
//!     ],
//! );
//! let cfg = ScanConfig::new(ScanMode::Single, 0.5);
//! let outcome = run_scan(&[doc], &cfg, &NoProgress, &CancellationToken::new())
//!     .await
//!     .unwrap();
//! assert_eq!(outcome.status, ScanStatus::Completed);
//! assert_eq!(outcome.matches.len(), 1);
//! # });
//! ```
//!
//! ## Observability
//!
//! Each scan runs inside a `matcher.scan` tracing span and logs
//! `scan_start`, then `scan_complete` or `scan_cancelled`. Install a
//! [`ScanMetrics`] implementation via [`set_scan_metrics`] to record latency
//! and counters for every scan.

pub mod aggregate;
pub mod engine;
pub mod metrics;
pub mod progress;
mod scheduler;
pub mod session;
pub mod types;

pub use crate::aggregate::{rank, rank_in_place};
pub use crate::engine::{run_scan, Scanner};
pub use crate::metrics::{set_scan_metrics, ScanMetrics};
pub use crate::progress::{
    NoProgress, ProgressObserver, ProgressReporter, ProgressStage, ProgressUpdate, WatchProgress,
};
pub use crate::scheduler::total_pairs;
pub use crate::session::{
    request_cancellation, CancellationToken, ScanOutcome, ScanPhase, ScanStats, ScanStatus,
};
pub use crate::types::{
    EngineMisuse, MatchResult, MatchSource, ScanConfig, ScanError, ScanMode, SliceBudget,
    DEFAULT_THRESHOLD,
};
