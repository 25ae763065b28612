//! Sparse token frequency vectors.

use fxhash::FxHashMap;

/// Sparse `token -> occurrence count` representation of one paragraph.
///
/// Counts are raw, not normalized. The squared Euclidean norm is computed once
/// at construction; a vector is never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenVector {
    counts: FxHashMap<String, u32>,
    squared_norm: u64,
}

impl TokenVector {
    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no token was counted. Such a vector scores 0 against everything.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrence count of `token`, 0 when absent.
    pub fn get(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Euclidean norm of the count vector.
    pub fn norm(&self) -> f64 {
        (self.squared_norm as f64).sqrt()
    }

    /// Sum of squared counts.
    pub fn squared_norm(&self) -> u64 {
        self.squared_norm
    }

    /// Sum of all counts, i.e. the length of the token sequence it was built from.
    pub fn total_count(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Iterate `(token, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(token, &count)| (token.as_str(), count))
    }

    /// Iterate the distinct tokens, i.e. the token set of the paragraph.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TokenVector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts: FxHashMap<String, u32> = FxHashMap::default();
        for token in iter {
            let token = token.as_ref();
            // Avoid allocating a key for tokens already seen.
            match counts.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(token.to_owned(), 1);
                }
            }
        }
        let squared_norm = counts.values().map(|&c| u64::from(c) * u64::from(c)).sum();
        Self {
            counts,
            squared_norm,
        }
    }
}

/// Count occurrences per token.
///
/// ```rust
/// use similarity::build_vector;
///
/// let vector = build_vector(&["a", "b", "a"]);
/// assert_eq!(vector.get("a"), 2);
/// assert_eq!(vector.get("b"), 1);
/// assert_eq!(vector.len(), 2);
/// ```
pub fn build_vector<S: AsRef<str>>(tokens: &[S]) -> TokenVector {
    tokens.iter().collect()
}
