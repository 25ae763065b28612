//! Whitespace normalization utilities.
//!
//! Paragraph extraction and the candidate filter both reason about text with
//! whitespace collapsed or removed. Unicode's definition of whitespace is used
//! throughout (tabs, newlines, carriage returns, non-breaking and ideographic
//! spaces included).
//!
//! ```rust
//! use canonical::{collapse_whitespace, non_whitespace_len, strip_whitespace};
//!
//! assert_eq!(collapse_whitespace("  hello \n\t world  "), "hello world");
//! assert_eq!(strip_whitespace("a b\u{3000}c"), "abc");
//! assert_eq!(non_whitespace_len("中 文"), 2);
//! ```

/// Collapses repeated whitespace into single ASCII spaces and trims both ends.
///
/// Returns an empty string for empty or whitespace-only input.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Removes every whitespace character.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// Number of non-whitespace characters (chars, not bytes).
///
/// Used for the minimum paragraph length and the candidate filter's length
/// ratio, so a CJK character and a Latin letter weigh the same.
pub fn non_whitespace_len(text: &str) -> usize {
    text.chars().filter(|ch| !ch.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_handles_mixed_whitespace() {
        assert_eq!(collapse_whitespace("hello\r\n\r\nworld"), "hello world");
        assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
        assert_eq!(collapse_whitespace("   \n\t   "), "");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn strip_removes_ideographic_space() {
        assert_eq!(strip_whitespace(" 第一题\u{3000}选择 "), "第一题选择");
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert_eq!(non_whitespace_len("中文 ab"), 4);
        assert_eq!(non_whitespace_len("   "), 0);
    }
}
