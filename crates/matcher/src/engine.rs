use std::time::Instant;

use ingest::Document;
use tracing::{info, warn, Instrument, Level};

use crate::metrics::metrics_recorder;
use crate::progress::{ProgressObserver, ProgressReporter, COMPARE_START};
use crate::scheduler::{total_pairs, Scheduler};
use crate::session::{CancellationToken, ScanOutcome, ScanSession, ScanStatus};
use crate::types::{EngineMisuse, ScanConfig, ScanError, ScanMode};


/// Runs near-duplicate scans with a fixed, validated configuration.
#[derive(Debug, Clone)]
pub struct Scanner {
    cfg: ScanConfig,
}

impl Scanner {
    pub fn new(cfg: ScanConfig) -> Result<Self, ScanError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.cfg
    }

    /// Checks the document set against the configured mode.
    pub fn check_documents(&self, documents: &[Document]) -> Result<(), ScanError> {
        if documents.is_empty() {
            return Err(EngineMisuse::NoDocuments.into());
        }
        if self.cfg.mode == ScanMode::Single && documents.len() != 1 {
            return Err(EngineMisuse::SingleModeDocumentCount(documents.len()).into());
        }
        Ok(())
    }

    /// Scans `documents` and returns ranked matches.
    ///
    /// Returns `Ok` with [`ScanStatus::Cancelled`] and the matches found so far
    /// when `token` is cancelled mid-scan. Errors only on misuse, before any
    /// comparison work.
    pub async fn scan(
        &self,
        documents: &[Document],
        observer: &dyn ProgressObserver,
        token: &CancellationToken,
    ) -> Result<ScanOutcome, ScanError> {
        if let Err(err) = self.check_documents(documents) {
            warn!(error = %err, mode = %self.cfg.mode, "scan_rejected");
            return Err(err);
        }

        let start = Instant::now();
        let mode = self.cfg.mode;
        let total = total_pairs(mode, documents);
        let span = tracing::span!(
            Level::INFO,
            "matcher.scan",
            mode = %mode,
            documents = documents.len(),
            total_pairs = total
        );

        async move {
            info!(
                threshold = self.cfg.threshold,
                filter = self.cfg.filter.enabled,
                "scan_start"
            );

            let session = ScanSession::new(token.clone(), total);
            let reporter = ProgressReporter::starting_at(observer, COMPARE_START);
            let mut scheduler = Scheduler::new(&self.cfg, session, reporter);
            scheduler.run(documents).await;
            let outcome = scheduler.into_session().finish(start.elapsed());

            let elapsed_micros = outcome.elapsed.as_micros();
            let stats = &outcome.stats;
            match outcome.status {
                ScanStatus::Completed => info!(
                    matches = stats.matches,
                    pairs_visited = stats.pairs_visited,
                    pairs_filtered = stats.pairs_filtered,
                    slices = stats.slices,
                    elapsed_micros,
                    "scan_complete"
                ),
                ScanStatus::Cancelled => info!(
                    matches = stats.matches,
                    pairs_visited = stats.pairs_visited,
                    ended_in = ?outcome.ended_in,
                    elapsed_micros,
                    "scan_cancelled"
                ),
            }

            if let Some(metrics) = metrics_recorder() {
                metrics.record_scan(mode, outcome.elapsed, &outcome.stats, outcome.status);
            }
            Ok::<_, ScanError>(outcome)
        }
        .instrument(span)
        .await
    }
}

/// Validates `config` and scans `documents` with it.
pub async fn run_scan(
    documents: &[Document],
    config: &ScanConfig,
    observer: &dyn ProgressObserver,
    token: &CancellationToken,
) -> Result<ScanOutcome, ScanError> {
    let scanner = Scanner::new(config.clone()).inspect_err(|err| {
        warn!(error = %err, "scan_rejected");
    })?;
    scanner.scan(documents, observer, token).await
}
