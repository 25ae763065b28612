//! Cooperative pair scheduler.
//!
//! Profiles every paragraph, then visits every pair the scan mode calls for,
//! in a fixed order. Both passes share one slice clock and give up their turn
//! on the async executor at each slice boundary, reporting progress first.
//! Cancellation is checked before every outer-loop iteration and again at
//! every slice boundary; on cancellation the loops unwind and whatever
//! matches were recorded so far stay in the session.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use ingest::Document;
use similarity::{profile_paragraphs, score, CandidateFilter, ParagraphProfile};
use tokio::task::yield_now;

use crate::progress::{percent_in_range, ProgressReporter, ProgressStage, COMPARE_END, COMPARE_START};
use crate::session::{ScanPhase, ScanSession};
use crate::types::{MatchResult, MatchSource, ScanConfig, ScanMode};

type Flow = ControlFlow<()>;

/// Upper bound on paragraphs profiled in one rayon fan-out.
const PARALLEL_PROFILE_BATCH: usize = 64;

/// Pairs a complete scan of `documents` visits.
///
/// Single mode: `n·(n−1)/2` over the first document. Cross mode: that count
/// for each document plus `p·q` for every pair of distinct documents.
pub fn total_pairs(mode: ScanMode, documents: &[Document]) -> u64 {
    let within = |n: usize| {
        let n = n as u64;
        n * n.saturating_sub(1) / 2
    };
    match mode {
        ScanMode::Single => documents.first().map_or(0, |d| within(d.len())),
        ScanMode::Cross => documents
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let across: u64 = documents[i + 1..]
                    .iter()
                    .map(|b| a.len() as u64 * b.len() as u64)
                    .sum();
                within(a.len()) + across
            })
            .sum(),
    }
}

/// Counts visits and wall time within the current slice.
struct SliceClock {
    max_comparisons: usize,
    max_duration: Duration,
    started: Instant,
    comparisons: usize,
}

impl SliceClock {
    fn new(cfg: &ScanConfig) -> Self {
        Self {
            max_comparisons: cfg.slice.max_comparisons,
            max_duration: cfg.slice.max_duration(),
            started: Instant::now(),
            comparisons: 0,
        }
    }

    /// Records one visit; true when the slice is used up.
    fn tick(&mut self) -> bool {
        self.tick_by(1)
    }

    fn tick_by(&mut self, units: usize) -> bool {
        self.comparisons = self.comparisons.saturating_add(units);
        self.comparisons >= self.max_comparisons || self.started.elapsed() >= self.max_duration
    }

    fn restart(&mut self) {
        self.comparisons = 0;
        self.started = Instant::now();
    }
}

pub(crate) struct Scheduler<'a> {
    cfg: &'a ScanConfig,
    filter: CandidateFilter,
    session: ScanSession,
    progress: ProgressReporter<'a>,
    clock: SliceClock,
}

impl<'a> Scheduler<'a> {
    pub(crate) fn new(
        cfg: &'a ScanConfig,
        session: ScanSession,
        progress: ProgressReporter<'a>,
    ) -> Self {
        Self {
            cfg,
            filter: CandidateFilter::new(cfg.filter.clone()),
            session,
            progress,
            clock: SliceClock::new(cfg),
        }
    }

    pub(crate) fn into_session(self) -> ScanSession {
        self.session
    }

    /// Runs the scan to completion or cancellation. Documents must already be
    /// validated against the mode.
    pub(crate) async fn run(&mut self, documents: &[Document]) {
        self.progress
            .report(ProgressStage::Comparing, COMPARE_START, "Preparing comparison");

        let documents = match self.cfg.mode {
            ScanMode::Single => &documents[..documents.len().min(1)],
            ScanMode::Cross => documents,
        };
        let Some(profiles) = self.build_profiles(documents).await else {
            return;
        };

        self.session.enter(ScanPhase::Comparing);
        self.clock.restart();
        let flow = match self.cfg.mode {
            ScanMode::Single => match (documents.first(), profiles.first()) {
                (Some(doc), Some(profiles)) => self.scan_document(doc, profiles).await,
                _ => Flow::Continue(()),
            },
            ScanMode::Cross => self.scan_all(documents, &profiles).await,
        };

        if flow.is_continue() {
            let total = self.session.stats().total_pairs;
            self.progress.report(
                ProgressStage::Comparing,
                COMPARE_END,
                format!("Compared {total} paragraph pairs"),
            );
        }
    }

    /// Profiles every paragraph once under the same slice budget as the
    /// comparisons. Parallel profiling works in batches of at most
    /// [`PARALLEL_PROFILE_BATCH`] paragraphs between clock checks.
    async fn build_profiles(&mut self, documents: &[Document]) -> Option<Vec<Vec<ParagraphProfile>>> {
        let batch = if self.cfg.use_parallel {
            PARALLEL_PROFILE_BATCH.min(self.cfg.slice.max_comparisons)
        } else {
            1
        };
        let total: usize = documents.iter().map(Document::len).sum();
        let mut done = 0usize;
        let mut all = Vec::with_capacity(documents.len());

        self.clock.restart();
        for doc in documents {
            let mut profiles = Vec::with_capacity(doc.len());
            for part in doc.paragraphs.chunks(batch) {
                if self.session.check_cancelled() {
                    return None;
                }
                profiles.extend(profile_paragraphs(
                    part,
                    &self.cfg.tokenizer,
                    self.cfg.use_parallel,
                ));
                done += part.len();
                if self.clock.tick_by(part.len()) {
                    self.session.stats_mut().slices += 1;
                    self.progress.report(
                        ProgressStage::Comparing,
                        COMPARE_START,
                        format!("Profiling paragraphs {done}/{total}"),
                    );
                    yield_now().await;
                    self.clock.restart();
                }
            }
            all.push(profiles);
        }
        Some(all)
    }

    async fn scan_all(&mut self, documents: &[Document], profiles: &[Vec<ParagraphProfile>]) -> Flow {
        for i in 0..documents.len() {
            for j in i..documents.len() {
                self.checkpoint()?;
                if i == j {
                    self.scan_document(&documents[i], &profiles[i]).await?;
                } else {
                    self.scan_across(&documents[i], &profiles[i], &documents[j], &profiles[j])
                        .await?;
                }
            }
        }
        Flow::Continue(())
    }

    async fn scan_document(&mut self, doc: &Document, profiles: &[ParagraphProfile]) -> Flow {
        for i in 0..profiles.len() {
            self.checkpoint()?;
            for j in (i + 1)..profiles.len() {
                if let Some(similarity) = self.compare(&profiles[i], &profiles[j]) {
                    self.session.record(MatchResult {
                        paragraph_a: doc.paragraphs[i].as_str().to_owned(),
                        paragraph_b: doc.paragraphs[j].as_str().to_owned(),
                        index_a: i,
                        index_b: j,
                        similarity,
                        source: MatchSource::Single {
                            document: doc.name.clone(),
                        },
                    });
                }
                self.tick().await?;
            }
        }
        Flow::Continue(())
    }

    async fn scan_across(
        &mut self,
        doc_a: &Document,
        profiles_a: &[ParagraphProfile],
        doc_b: &Document,
        profiles_b: &[ParagraphProfile],
    ) -> Flow {
        for (i, a) in profiles_a.iter().enumerate() {
            self.checkpoint()?;
            for (j, b) in profiles_b.iter().enumerate() {
                if let Some(similarity) = self.compare(a, b) {
                    self.session.record(MatchResult {
                        paragraph_a: doc_a.paragraphs[i].as_str().to_owned(),
                        paragraph_b: doc_b.paragraphs[j].as_str().to_owned(),
                        index_a: i,
                        index_b: j,
                        similarity,
                        source: MatchSource::Cross {
                            document_a: doc_a.name.clone(),
                            document_b: doc_b.name.clone(),
                        },
                    });
                }
                self.tick().await?;
            }
        }
        Flow::Continue(())
    }

    /// Filters then scores one pair. Returns the similarity when it meets the
    /// threshold.
    fn compare(&mut self, a: &ParagraphProfile, b: &ParagraphProfile) -> Option<f64> {
        let stats = self.session.stats_mut();
        stats.pairs_visited += 1;
        // A paragraph without tokens never matches, filter or not.
        if a.is_empty() || b.is_empty() || !self.filter.admits(a, b) {
            stats.pairs_filtered += 1;
            return None;
        }
        stats.pairs_scored += 1;
        let similarity = score(a.vector(), b.vector());
        (similarity >= self.cfg.threshold).then_some(similarity)
    }

    async fn tick(&mut self) -> Flow {
        if self.clock.tick() {
            self.slice_boundary().await
        } else {
            Flow::Continue(())
        }
    }

    /// Reports progress, yields, then checks cancellation.
    async fn slice_boundary(&mut self) -> Flow {
        let stats = self.session.stats_mut();
        stats.slices += 1;
        let (visited, total) = (stats.pairs_visited, stats.total_pairs);

        self.progress.report(
            ProgressStage::Comparing,
            percent_in_range(COMPARE_START, COMPARE_END, visited, total),
            format!("Comparing paragraphs {visited}/{total}"),
        );
        yield_now().await;
        self.clock.restart();
        self.checkpoint()
    }

    fn checkpoint(&mut self) -> Flow {
        if self.session.check_cancelled() {
            Flow::Break(())
        } else {
            Flow::Continue(())
        }
    }
}
