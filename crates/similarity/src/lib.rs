//! # dupscan similarity layer
//!
//! Turns canonical tokens into sparse count vectors, scores pairs of vectors
//! with cosine similarity, and pre-filters pairs that are unlikely to clear a
//! similarity threshold.
//!
//! ## Contract
//!
//! - Consumes tokens produced by the `canonical` crate; never reads files.
//! - Vectors hold raw counts. Normalization happens only inside [`score`].
//! - [`score`] is symmetric, bounded to `[0, 1]`, and returns 0 whenever either
//!   side is empty. It never fails.
//! - [`ParagraphProfile`] caches one paragraph's vector and stripped length so a
//!   scan tokenizes each paragraph once, however many pairs it takes part in.
//!
//! ## Example
//!
//! ```
//! use canonical::{tokenize, TokenizeConfig};
//! use similarity::{build_vector, score, CandidateFilter, ParagraphProfile};
//!
//! let a = "This is a test sentence about history.";
//! let b = "This is a test sentence about geography.";
//!
//! let s = score(&build_vector(&tokenize(a)), &build_vector(&tokenize(b)));
//! assert!(s > 0.5 && s < 0.99);
//!
//! let cfg = TokenizeConfig::default();
//! let filter = CandidateFilter::default();
//! assert!(filter.admits(&ParagraphProfile::build(a, &cfg), &ParagraphProfile::build(b, &cfg)));
//! ```

pub mod config;
pub mod filter;
pub mod profile;
mod score;
mod vector;

pub use crate::config::{
    FilterConfig, SimilarityError, DEFAULT_MIN_LENGTH_RATIO, DEFAULT_MIN_TOKEN_OVERLAP,
};
pub use crate::filter::{should_compare, should_compare_with, CandidateFilter, FilterVerdict};
pub use crate::profile::{profile_paragraphs, ParagraphProfile};
pub use crate::score::score;
pub use crate::vector::{build_vector, TokenVector};
