//! Candidate filter: a cheap pre-check that skips pairs unlikely to pass the
//! similarity threshold.
//!
//! The check is a heuristic and has false negatives. A pair of paragraphs
//! that would score above the threshold can still be skipped when their
//! lengths differ by more than half, or when their token sets overlap by less
//! than a fifth. Disable the filter ([`FilterConfig::exhaustive`]) when every
//! pair must be scored.

use canonical::TokenizeConfig;

use crate::config::FilterConfig;
use crate::profile::ParagraphProfile;

/// Outcome of the pre-check for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    /// Pass the pair on to the scorer.
    Compare,
    /// One side is empty once whitespace is removed.
    EmptyText,
    /// Lengths are too far apart.
    LengthRatio,
    /// One side produced no tokens.
    NoTokens,
    /// Token sets share too little.
    LowOverlap,
}

impl FilterVerdict {
    pub fn is_compare(self) -> bool {
        matches!(self, FilterVerdict::Compare)
    }
}

/// Candidate filter over precomputed [`ParagraphProfile`]s.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    cfg: FilterConfig,
}

impl CandidateFilter {
    pub fn new(cfg: FilterConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.cfg
    }

    /// Run the pre-check on two profiles.
    pub fn verdict(&self, a: &ParagraphProfile, b: &ParagraphProfile) -> FilterVerdict {
        if !self.cfg.enabled {
            return FilterVerdict::Compare;
        }

        let (len_a, len_b) = (a.stripped_len(), b.stripped_len());
        if len_a == 0 || len_b == 0 {
            return FilterVerdict::EmptyText;
        }
        let length_ratio = len_a.min(len_b) as f64 / len_a.max(len_b) as f64;
        if length_ratio < self.cfg.min_length_ratio {
            return FilterVerdict::LengthRatio;
        }

        let (set_a, set_b) = (a.vector(), b.vector());
        if set_a.is_empty() || set_b.is_empty() {
            return FilterVerdict::NoTokens;
        }
        let (small, large) = if set_a.len() <= set_b.len() {
            (set_a, set_b)
        } else {
            (set_b, set_a)
        };
        let shared = small.tokens().filter(|t| large.contains(t)).count();
        let overlap = shared as f64 / small.len() as f64;
        if overlap < self.cfg.min_token_overlap {
            return FilterVerdict::LowOverlap;
        }

        FilterVerdict::Compare
    }

    /// True when the pair should go on to full scoring.
    pub fn admits(&self, a: &ParagraphProfile, b: &ParagraphProfile) -> bool {
        self.verdict(a, b).is_compare()
    }
}

/// Pre-check two raw texts with the default thresholds.
///
/// ```rust
/// use similarity::should_compare;
///
/// assert!(should_compare(
///     "This is a test sentence about history.",
///     "This is a test sentence about geography.",
/// ));
/// assert!(!should_compare("short text here", "a much much longer paragraph of text here"));
/// ```
pub fn should_compare(a: &str, b: &str) -> bool {
    should_compare_with(a, b, &FilterConfig::default())
}

/// Pre-check two raw texts with explicit thresholds.
pub fn should_compare_with(a: &str, b: &str, cfg: &FilterConfig) -> bool {
    let tokenize_cfg = TokenizeConfig::default();
    let filter = CandidateFilter::new(cfg.clone());
    filter.admits(
        &ParagraphProfile::build(a, &tokenize_cfg),
        &ParagraphProfile::build(b, &tokenize_cfg),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_vector, score};

    fn profile(text: &str) -> ParagraphProfile {
        ParagraphProfile::build(text, &TokenizeConfig::default())
    }

    fn verdict(a: &str, b: &str) -> FilterVerdict {
        CandidateFilter::default().verdict(&profile(a), &profile(b))
    }

    #[test]
    fn whitespace_only_rejected() {
        assert_eq!(verdict("   ", "some text"), FilterVerdict::EmptyText);
        assert!(!should_compare("", "some text"));
    }

    #[test]
    fn length_ratio_boundary_is_inclusive() {
        // 10 vs 20 stripped chars: ratio exactly 0.5 passes.
        assert_eq!(verdict("aaaaa bbbbb", "aaaaabbbbb cccccddddd"), FilterVerdict::LowOverlap);
        assert_eq!(verdict("aaaaa bbbbb", "aaaaa bbbbb cccccddddd"), FilterVerdict::Compare);
        // 9 vs 20: ratio 0.45 fails before tokens are looked at.
        assert_eq!(verdict("aaaa bbbbb", "aaaaa bbbbb cccccddddd"), FilterVerdict::LengthRatio);
    }

    #[test]
    fn symbol_only_text_has_no_tokens() {
        assert_eq!(verdict("12345 67890", "abcde fghij"), FilterVerdict::NoTokens);
    }

    #[test]
    fn overlap_uses_smaller_set() {
        // Sets {a..e} and {a, x, y, z, w}: 1 shared / 5 = 0.2, passes.
        assert_eq!(
            verdict("aa bb cc dd ee", "aa xx yy zz ww"),
            FilterVerdict::Compare
        );
        // No shared tokens at all.
        assert_eq!(
            verdict("aa bb cc dd ee", "ff gg hh ii jj"),
            FilterVerdict::LowOverlap
        );
    }

    #[test]
    fn overlap_counts_unique_tokens() {
        // Repetition does not inflate the overlap: {the, cat} vs {the, dog, sat, on, mat}.
        assert_eq!(
            verdict("the the the cat cat cat cat", "the dog sat on mat ok"),
            FilterVerdict::Compare
        );
    }

    #[test]
    fn disabled_filter_admits_everything() {
        let filter = CandidateFilter::new(FilterConfig::exhaustive());
        assert!(filter.admits(&profile(""), &profile("anything at all")));
        assert!(should_compare_with("x", "y z w v u t s r q p o n m", &FilterConfig::exhaustive()));
    }

    #[test]
    fn custom_thresholds_apply() {
        let strict = FilterConfig::new().with_min_token_overlap(0.9);
        assert!(!should_compare_with(
            "This is a test sentence about history.",
            "This is a test sentence about geography.",
            &strict,
        ));
    }

    // Known precision/recall tradeoff: the pair below scores well above a
    // typical 0.75 threshold, yet the length heuristic drops it. The filter
    // accepts this false negative; exhaustive mode recovers it.
    #[test]
    fn length_ratio_false_negative_is_accepted() {
        let short = "Define photosynthesis";
        let long = "Define photosynthesis                   ................................................ (10 points)";
        let full = score(
            &build_vector(&canonical::tokenize(short)),
            &build_vector(&canonical::tokenize(long)),
        );
        assert!(full > 0.75, "full score was {full}");
        assert!(!should_compare(short, long));
        assert!(should_compare_with(short, long, &FilterConfig::exhaustive()));
    }

    #[test]
    fn overlap_false_negative_is_accepted() {
        // Heavy repetition of one shared token yields a high cosine, but the
        // unique-token overlap is only 1/6.
        let a = "water water water water water water water water alpha beta gamma delta epsilon";
        let b = "water water water water water water water water kappa lambda sigma omega theta";
        let full = score(
            &build_vector(&canonical::tokenize(a)),
            &build_vector(&canonical::tokenize(b)),
        );
        assert!(full > 0.75, "full score was {full}");
        assert!(!should_compare(a, b));
    }
}
