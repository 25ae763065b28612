//! Cosine similarity over [`TokenVector`]s.

use crate::vector::TokenVector;

/// Cosine similarity of two count vectors, in `[0, 1]`.
///
/// Returns 0 when either vector is empty. Counts are non-negative, so the raw
/// cosine can only leave `[0, 1]` through rounding; the result is clamped.
///
/// The dot product is accumulated in integers, which makes the result exactly
/// symmetric: `score(a, b) == score(b, a)`.
///
/// ```rust
/// use similarity::{build_vector, score};
///
/// let a = build_vector(&["red", "apple"]);
/// let b = build_vector(&["green", "apple"]);
/// assert!((score(&a, &b) - 0.5).abs() < 1e-9);
/// assert_eq!(score(&a, &build_vector::<&str>(&[])), 0.0);
/// ```
pub fn score(a: &TokenVector, b: &TokenVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Probe the larger map with the keys of the smaller one.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: u64 = small
        .iter()
        .map(|(token, count)| u64::from(count) * u64::from(large.get(token)))
        .sum();

    if dot == 0 {
        return 0.0;
    }

    // One square root over the product keeps `score(a, a)` at exactly 1.
    let denominator = (a.squared_norm() as f64 * b.squared_norm() as f64).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    (dot as f64 / denominator).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::build_vector;

    const EPS: f64 = 1e-9;

    fn vector_of(text: &str) -> TokenVector {
        build_vector(&canonical::tokenize(text))
    }

    #[test]
    fn identical_vectors_score_one() {
        let samples = [
            "a",
            "the the the",
            "下列说法正确的是",
            "This is a test sentence about history.",
        ];
        for text in samples {
            let v = vector_of(text);
            assert_eq!(score(&v, &v), 1.0, "reflexive for {text:?}");
        }
    }

    #[test]
    fn symmetric_and_bounded() {
        let texts = [
            "alpha beta gamma",
            "beta beta delta",
            "gamma alpha alpha alpha",
            "完全不同的内容",
            "",
        ];
        for a in texts {
            for b in texts {
                let (va, vb) = (vector_of(a), vector_of(b));
                let ab = score(&va, &vb);
                assert_eq!(ab, score(&vb, &va));
                assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn empty_vector_scores_zero() {
        let empty = vector_of("123 !!!");
        let full = vector_of("some words");
        assert_eq!(score(&empty, &full), 0.0);
        assert_eq!(score(&full, &empty), 0.0);
        assert_eq!(score(&empty, &empty), 0.0);
    }

    #[test]
    fn disjoint_vectors_score_zero() {
        assert_eq!(score(&vector_of("cat dog"), &vector_of("fish bird")), 0.0);
    }

    #[test]
    fn raw_counts_affect_score() {
        // [2,1] vs [1,1]: 3 / (sqrt(5) * sqrt(2))
        let a = build_vector(&["x", "x", "y"]);
        let b = build_vector(&["x", "y"]);
        let expected = 3.0 / (5f64.sqrt() * 2f64.sqrt());
        assert!((score(&a, &b) - expected).abs() < EPS);
    }

    #[test]
    fn history_and_geography_sentences() {
        let a = vector_of("This is a test sentence about history.");
        let b = vector_of("This is a test sentence about geography.");
        // Six of seven tokens shared, each once: 6 / 7.
        let s = score(&a, &b);
        assert!((s - 6.0 / 7.0).abs() < EPS);
        assert!(s >= 0.5);
        assert!(s < 0.99);
    }
}
