//! Per-scan state: cancellation token, phase, accumulated matches and
//! counters.
//!
//! A `ScanSession` is created when a scan starts, mutated only by the
//! scheduler, and consumed into a [`ScanOutcome`] when the scan ends, whether
//! it ran to completion or was cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::aggregate::rank;
use crate::types::MatchResult;

/// Shared cancellation flag. The caller sets it; the scheduler only reads it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Requests cancellation of the scan watching `token`. Calling it again, or
/// after the scan ended, has no effect.
pub fn request_cancellation(token: &CancellationToken) {
    token.cancel();
}

/// Stage of a scan. A completed outcome ends in `Finished`; a cancelled one
/// ends in the phase that was interrupted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScanPhase {
    Profiling,
    Comparing,
    Ranking,
    Finished,
}

/// How a scan ended. Cancellation is a normal terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Completed,
    Cancelled,
}

/// Counters collected during a scan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanStats {
    /// Pairs the scan would visit if it ran to completion.
    pub total_pairs: u64,
    /// Pairs actually visited (filtered or scored).
    pub pairs_visited: u64,
    /// Pairs the candidate filter rejected, plus pairs skipped because a
    /// paragraph has no tokens.
    pub pairs_filtered: u64,
    pub pairs_scored: u64,
    pub matches: u64,
    /// Slice boundaries crossed, i.e. how many times the scan yielded.
    pub slices: u64,
}

/// Live state of one scan.
#[derive(Debug)]
pub(crate) struct ScanSession {
    token: CancellationToken,
    phase: ScanPhase,
    matches: Vec<MatchResult>,
    stats: ScanStats,
    cancelled: bool,
}

impl ScanSession {
    pub(crate) fn new(token: CancellationToken, total_pairs: u64) -> Self {
        Self {
            token,
            phase: ScanPhase::Profiling,
            matches: Vec::new(),
            stats: ScanStats {
                total_pairs,
                ..ScanStats::default()
            },
            cancelled: false,
        }
    }

    pub(crate) fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut ScanStats {
        &mut self.stats
    }

    pub(crate) fn enter(&mut self, phase: ScanPhase) {
        self.phase = phase;
    }

    /// Polls the token; once it has been seen set the session stays cancelled.
    pub(crate) fn check_cancelled(&mut self) -> bool {
        if !self.cancelled && self.token.is_cancelled() {
            self.cancelled = true;
        }
        self.cancelled
    }

    pub(crate) fn record(&mut self, result: MatchResult) {
        self.stats.matches += 1;
        self.matches.push(result);
    }

    pub(crate) fn finish(mut self, elapsed: Duration) -> ScanOutcome {
        let interrupted = self.phase;
        self.enter(ScanPhase::Ranking);
        let (matches, scan_positions) = rank(std::mem::take(&mut self.matches));
        self.enter(ScanPhase::Finished);
        ScanOutcome {
            matches,
            scan_positions,
            status: if self.cancelled {
                ScanStatus::Cancelled
            } else {
                ScanStatus::Completed
            },
            ended_in: if self.cancelled {
                interrupted
            } else {
                self.phase
            },
            stats: self.stats,
            elapsed,
        }
    }
}

/// Result of a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// Matches ranked by similarity, descending; ties keep scan order.
    pub matches: Vec<MatchResult>,
    /// `scan_positions[k]` is the scan-order position of `matches[k]`.
    scan_positions: Vec<usize>,
    pub status: ScanStatus,
    pub ended_in: ScanPhase,
    pub stats: ScanStats,
    pub elapsed: Duration,
}

impl ScanOutcome {
    /// Outcome of a check cancelled before its scan began.
    pub fn cancelled_before_start() -> Self {
        Self {
            matches: Vec::new(),
            scan_positions: Vec::new(),
            status: ScanStatus::Cancelled,
            ended_in: ScanPhase::Profiling,
            stats: ScanStats::default(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ScanStatus::Cancelled
    }

    /// Matches in the order the scan found them.
    pub fn in_scan_order(&self) -> Vec<&MatchResult> {
        let mut ordered: Vec<(usize, &MatchResult)> = self
            .scan_positions
            .iter()
            .copied()
            .zip(&self.matches)
            .collect();
        ordered.sort_unstable_by_key(|(pos, _)| *pos);
        ordered.into_iter().map(|(_, result)| result).collect()
    }

    /// Keeps only the `limit` best matches.
    pub fn truncate(&mut self, limit: usize) {
        if self.matches.len() > limit {
            self.matches.truncate(limit);
            self.scan_positions.truncate(limit);
        }
    }
}
