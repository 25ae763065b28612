//! Per-paragraph comparison data, built once per scan.

use canonical::{non_whitespace_len, tokenize_with_config, TokenizeConfig};
use rayon::prelude::*;

use crate::vector::TokenVector;

/// Everything the filter and the scorer need to know about one paragraph.
///
/// Building a profile tokenizes the paragraph exactly once; the token set used
/// by the filter is the key set of the vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphProfile {
    stripped_len: usize,
    vector: TokenVector,
}

impl ParagraphProfile {
    pub fn build(text: &str, cfg: &TokenizeConfig) -> Self {
        Self {
            stripped_len: non_whitespace_len(text),
            vector: tokenize_with_config(text, cfg).iter().collect(),
        }
    }

    /// Length of the paragraph with all whitespace removed, in chars.
    pub fn stripped_len(&self) -> usize {
        self.stripped_len
    }

    pub fn vector(&self) -> &TokenVector {
        &self.vector
    }

    /// True when tokenization produced nothing; such a paragraph never matches.
    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }
}

/// Build profiles for a document's paragraphs, in paragraph order.
///
/// With `use_parallel` the work is spread over the rayon pool; output order
/// is the same either way.
pub fn profile_paragraphs<S>(
    paragraphs: &[S],
    cfg: &TokenizeConfig,
    use_parallel: bool,
) -> Vec<ParagraphProfile>
where
    S: AsRef<str> + Sync,
{
    if use_parallel {
        paragraphs
            .par_iter()
            .map(|p| ParagraphProfile::build(p.as_ref(), cfg))
            .collect()
    } else {
        paragraphs
            .iter()
            .map(|p| ParagraphProfile::build(p.as_ref(), cfg))
            .collect()
    }
}
