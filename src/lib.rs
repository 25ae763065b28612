//! Workspace umbrella crate for dupscan.
//!
//! Stitches paragraph extraction (`ingest`) and the similarity scan
//! (`matcher`) together so callers can check a set of files for
//! near-duplicate paragraphs with a single entry point, [`check_files`].
//!
//! Progress for a whole check runs from 0 to 100: parsing fills `0..=70`
//! split evenly across files, the scan fills `75..=90`, and ranking reports
//! 95 before the final 100.

pub mod config;

pub use canonical::{
    CanonicalError, Token, TokenizeConfig, collapse_whitespace, non_whitespace_len,
    strip_whitespace, tokenize, tokenize_with_config,
};
pub use ingest::{
    Document, DocumentParser, ExtractProgress, IngestConfig, Paragraph, ParagraphExtractor,
    ParagraphSplit, ParseError, PlainTextExtractor, SourceFile, clean_paragraphs, ignore_progress,
};
pub use matcher::{
    CancellationToken, EngineMisuse, MatchResult, MatchSource, NoProgress, ProgressObserver,
    ProgressStage, ProgressUpdate, ScanConfig, ScanError, ScanMetrics, ScanMode, ScanOutcome,
    ScanPhase, ScanStats, ScanStatus, Scanner, SliceBudget, WatchProgress, request_cancellation,
    run_scan, set_scan_metrics,
};
pub use similarity::{
    CandidateFilter, FilterConfig, ParagraphProfile, TokenVector, build_vector, score,
    should_compare,
};

pub use crate::config::{ConfigLoadError, DupscanConfig, ScanYamlConfig};

use std::sync::Mutex;
use std::time::Instant;

use matcher::progress::{
    COMPARE_END, COMPARE_START, DONE, FINALIZE, PARSE_END, ProgressReporter, parse_percent,
    percent_in_range,
};
use thiserror::Error;
use tracing::{Instrument, Level, info, warn};

/// Errors that can occur while checking files.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("no input files")]
    NoFiles,

    #[error("parse failure: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Parsed documents plus the scan outcome of one check.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Documents in input order, as the scan saw them.
    pub documents: Vec<Document>,
    pub outcome: ScanOutcome,
}

impl CheckReport {
    pub fn paragraph_count(&self) -> usize {
        self.documents.iter().map(Document::len).sum()
    }
}

/// Parses `files` and scans them for near-duplicate paragraphs.
///
/// Single mode with other than exactly one file is rejected before any file
/// is parsed. Any parse error aborts the check and is returned unchanged inside
/// [`PipelineError::Parse`]. Cancellation is checked after every file; a
/// check cancelled during parsing skips the scan and reports a cancelled,
/// empty outcome. Cancellation during the scan returns the matches found so
/// far.
pub async fn check_files(
    files: &[SourceFile],
    parser: &DocumentParser,
    config: &ScanConfig,
    observer: &dyn ProgressObserver,
    token: &CancellationToken,
) -> Result<CheckReport, PipelineError> {
    if files.is_empty() {
        return Err(PipelineError::NoFiles);
    }
    // Reject misuse before spending time on parsing.
    let scanner = Scanner::new(config.clone())?;
    if config.mode == ScanMode::Single && files.len() != 1 {
        let err = ScanError::from(EngineMisuse::SingleModeDocumentCount(files.len()));
        warn!(error = %err, "check_rejected");
        return Err(err.into());
    }

    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "dupscan.check_files",
        files = files.len(),
        mode = %config.mode
    );

    async move {
        let reporter = Mutex::new(ProgressReporter::new(observer));
        let report = |stage: ProgressStage, percent: u8, message: String| {
            reporter
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .report(stage, percent, message);
        };

        let mut documents = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            let on_file_progress = |message: &str, percent: u8| {
                report(
                    ProgressStage::Parsing,
                    parse_percent(index, files.len(), percent),
                    format!("{}: {message}", file.name),
                );
            };
            let document = parser.parse(file, &on_file_progress).await.inspect_err(|err| {
                warn!(file = %file.name, error = %err, "check_parse_failure");
            })?;
            documents.push(document);

            if token.is_cancelled() {
                break;
            }
        }

        let (outcome, reached) = if token.is_cancelled() {
            let last = reporter
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .last_percent();
            (ScanOutcome::cancelled_before_start(), last)
        } else {
            report(
                ProgressStage::Parsing,
                PARSE_END,
                format!("Parsed {} files", documents.len()),
            );
            let outcome = scanner.scan(&documents, observer, token).await?;
            // The scan reported through `observer` directly; never fall below
            // the point it reached.
            let reached = percent_in_range(
                COMPARE_START,
                COMPARE_END,
                outcome.stats.pairs_visited,
                outcome.stats.total_pairs,
            );
            (outcome, reached)
        };

        match outcome.status {
            ScanStatus::Completed => {
                report(ProgressStage::Finalizing, FINALIZE, "Ranking results".to_string());
                report(
                    ProgressStage::Completed,
                    DONE,
                    format!("Found {} similar pairs", outcome.matches.len()),
                );
            }
            ScanStatus::Cancelled => report(
                ProgressStage::Cancelled,
                reached,
                format!("Cancelled with {} similar pairs so far", outcome.matches.len()),
            ),
        }

        let report = CheckReport {
            documents,
            outcome,
        };
        info!(
            paragraphs = report.paragraph_count(),
            matches = report.outcome.matches.len(),
            status = ?report.outcome.status,
            elapsed_micros = start.elapsed().as_micros(),
            "check_complete"
        );
        Ok(report)
    }
    .instrument(span)
    .await
}

/// Reads `paths` from disk into [`SourceFile`]s.
pub fn read_sources<P: AsRef<std::path::Path>>(
    paths: &[P],
) -> Result<Vec<SourceFile>, PipelineError> {
    paths
        .iter()
        .map(|p| SourceFile::from_path(p).map_err(PipelineError::from))
        .collect()
}
