//! Result ranking.

use crate::types::MatchResult;

/// Stable sort by similarity, descending. Returns the ranked matches together
/// with each match's position in the input (scan) order.
pub fn rank(results: Vec<MatchResult>) -> (Vec<MatchResult>, Vec<usize>) {
    let mut indexed: Vec<(usize, MatchResult)> = results.into_iter().enumerate().collect();
    // `sort_by` is stable, so equal similarities keep scan order.
    indexed.sort_by(|(_, a), (_, b)| b.similarity.total_cmp(&a.similarity));
    let (positions, ranked) = indexed.into_iter().unzip();
    (ranked, positions)
}

/// Ranks in place, discarding scan positions.
pub fn rank_in_place(results: &mut [MatchResult]) {
    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
}
