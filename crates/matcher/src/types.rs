use std::time::Duration;

use canonical::TokenizeConfig;
use serde::{Deserialize, Serialize};
use similarity::FilterConfig;
use thiserror::Error;

/// Which pairs a scan visits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Every pair of paragraphs within exactly one document.
    Single,
    /// Every pair within each document plus every cross-document pair.
    #[default]
    Cross,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Single => "single",
            ScanMode::Cross => "cross",
        }
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default similarity threshold (75%).
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Default number of comparisons per slice before yielding.
pub const DEFAULT_SLICE_COMPARISONS: usize = 500;

/// Default wall-clock length of a slice before yielding.
pub const DEFAULT_SLICE_MILLIS: u64 = 16;

/// Bound on how long the scheduler holds its turn: it yields after
/// `max_comparisons` pair visits or `max_duration_ms`, whichever comes first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SliceBudget {
    pub max_comparisons: usize,
    pub max_duration_ms: u64,
}

impl SliceBudget {
    pub fn new(max_comparisons: usize, max_duration: Duration) -> Self {
        Self {
            max_comparisons,
            max_duration_ms: max_duration.as_millis().min(u64::MAX as u128) as u64,
        }
    }

    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms)
    }
}

impl Default for SliceBudget {
    fn default() -> Self {
        Self {
            max_comparisons: DEFAULT_SLICE_COMPARISONS,
            max_duration_ms: DEFAULT_SLICE_MILLIS,
        }
    }
}

/// Configuration for one scan.
///
/// Cheap to clone and serde-friendly so it can be embedded in the top-level
/// YAML config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    #[serde(default)]
    pub mode: ScanMode,
    /// Minimum similarity, inclusive, for a pair to be reported. Must lie in
    /// `[0, 1]`.
    #[serde(default = "ScanConfig::default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub tokenizer: TokenizeConfig,
    #[serde(default)]
    pub slice: SliceBudget,
    /// Build paragraph profiles on the rayon pool.
    #[serde(default)]
    pub use_parallel: bool,
}

impl ScanConfig {
    pub(crate) fn default_threshold() -> f64 {
        DEFAULT_THRESHOLD
    }

    pub fn new(mode: ScanMode, threshold: f64) -> Self {
        Self {
            mode,
            threshold,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: TokenizeConfig) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_slice(mut self, slice: SliceBudget) -> Self {
        self.slice = slice;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Checks everything that does not depend on the documents.
    pub fn validate(&self) -> Result<(), ScanError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(EngineMisuse::InvalidThreshold(self.threshold).into());
        }
        if self.slice.max_comparisons == 0 || self.slice.max_duration_ms == 0 {
            return Err(EngineMisuse::EmptySliceBudget.into());
        }
        self.filter
            .validate()
            .map_err(|e| EngineMisuse::InvalidConfig(e.to_string()))?;
        self.tokenizer
            .validate()
            .map_err(|e| EngineMisuse::InvalidConfig(e.to_string()))?;
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mode: ScanMode::default(),
            threshold: DEFAULT_THRESHOLD,
            filter: FilterConfig::default(),
            tokenizer: TokenizeConfig::default(),
            slice: SliceBudget::default(),
            use_parallel: false,
        }
    }
}

/// Where the two paragraphs of a match come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchSource {
    Single { document: String },
    Cross { document_a: String, document_b: String },
}

/// A pair of paragraphs whose similarity met the threshold.
///
/// For intra-document matches `index_a < index_b`. For cross-document matches
/// `index_a` indexes `document_a` and `index_b` indexes `document_b`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub paragraph_a: String,
    pub paragraph_b: String,
    pub index_a: usize,
    pub index_b: usize,
    pub similarity: f64,
    pub source: MatchSource,
}

impl MatchResult {
    /// Similarity as a whole percentage, rounded.
    pub fn percent(&self) -> u32 {
        (self.similarity * 100.0).round() as u32
    }
}

/// Caller errors detected before any comparison work starts.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineMisuse {
    #[error("no documents supplied")]
    NoDocuments,
    #[error("single mode needs exactly one document, got {0}")]
    SingleModeDocumentCount(usize),
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
    #[error("slice budget must allow at least one comparison and one millisecond")]
    EmptySliceBudget,
    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ScanError {
    #[error("engine misuse: {0}")]
    EngineMisuse(#[from] EngineMisuse),
}
