//! Configuration and error types for the candidate filter.
//!
//! The filter thresholds are heuristics with no derivation behind them. They
//! are kept configurable so callers can trade recall for speed, or switch the
//! filter off entirely for an exhaustive scan.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum ratio `min(len) / max(len)` of whitespace-stripped lengths.
pub const DEFAULT_MIN_LENGTH_RATIO: f64 = 0.5;

/// Default minimum overlap `|A ∩ B| / min(|A|, |B|)` of token sets.
pub const DEFAULT_MIN_TOKEN_OVERLAP: f64 = 0.2;

/// Configuration for the cheap pre-check that runs before full scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// When false every pair goes to the scorer (exhaustive mode).
    pub enabled: bool,
    /// Pairs whose length ratio falls below this value are skipped.
    pub min_length_ratio: f64,
    /// Pairs whose token-set overlap falls below this value are skipped.
    pub min_token_overlap: f64,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter that lets every pair through.
    pub fn exhaustive() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_min_length_ratio(mut self, ratio: f64) -> Self {
        self.min_length_ratio = ratio;
        self
    }

    pub fn with_min_token_overlap(mut self, overlap: f64) -> Self {
        self.min_token_overlap = overlap;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if !(0.0..=1.0).contains(&self.min_length_ratio) {
            return Err(SimilarityError::InvalidConfig(format!(
                "min_length_ratio must be within [0, 1] (got {})",
                self.min_length_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.min_token_overlap) {
            return Err(SimilarityError::InvalidConfig(format!(
                "min_token_overlap must be within [0, 1] (got {})",
                self.min_token_overlap
            )));
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_length_ratio: DEFAULT_MIN_LENGTH_RATIO,
            min_token_overlap: DEFAULT_MIN_TOKEN_OVERLAP,
        }
    }
}

/// Errors returned by the similarity layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    #[error("invalid filter config: {0}")]
    InvalidConfig(String),
}
