// Metrics hooks for scans.
//
// Callers install a global `ScanMetrics` implementation via [`set_scan_metrics`];
// every scan run through [`crate::Scanner`] then reports its latency and
// counters, keeping instrumentation independent of any metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::session::{ScanStats, ScanStatus};
use crate::types::ScanMode;

/// Metrics observer for scans.
pub trait ScanMetrics: Send + Sync {
    /// Record one finished scan, completed or cancelled.
    ///
    /// `latency` is the wall-clock time from validation to ranking and
    /// `stats` carries the pair and match counters.
    fn record_scan(&self, mode: ScanMode, latency: Duration, stats: &ScanStats, status: ScanStatus);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn ScanMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn ScanMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn ScanMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global scan metrics recorder.
pub fn set_scan_metrics(recorder: Option<Arc<dyn ScanMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
