use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::config::TokenizeConfig;

/// First code point of the CJK Unified Ideographs range treated as tokens.
pub const CJK_IDEOGRAPH_START: char = '\u{4E00}';
/// Last code point (inclusive) of the CJK range treated as tokens.
pub const CJK_IDEOGRAPH_END: char = '\u{9FA5}';

/// A token with its UTF-8 byte offsets in the tokenized text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The lower-cased token text.
    pub text: String,
    /// Byte offset (inclusive) in the tokenized text.
    pub start: usize,
    /// Byte offset (exclusive) in the tokenized text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Returns true for the CJK ideographs that are compared one character at a time.
#[inline]
pub fn is_cjk_ideograph(ch: char) -> bool {
    (CJK_IDEOGRAPH_START..=CJK_IDEOGRAPH_END).contains(&ch)
}

/// Splits text into comparison units.
///
/// Text is lower-cased, then two disjoint token classes are extracted: each
/// CJK ideograph is its own token, and each maximal run of ASCII letters is
/// one token. Digits, punctuation, symbols, whitespace and letters of other
/// scripts are dropped and act as run boundaries.
///
/// Offsets refer to `text`. A character whose lower-case form expands to
/// several characters contributes its whole byte span to the run it joins.
///
/// ```rust
/// use canonical::tokenize;
///
/// let texts: Vec<String> = tokenize("Rust 2024: 内存安全!")
///     .into_iter()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(texts, vec!["rust", "内", "存", "安", "全"]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity((text.len() / 4).saturating_add(1));
    let mut run: Option<Token> = None;

    for (idx, ch) in text.char_indices() {
        let end = idx + ch.len_utf8();
        for lower in ch.to_lowercase() {
            if lower.is_ascii_lowercase() {
                match run.as_mut() {
                    Some(current) => {
                        current.text.push(lower);
                        current.end = end;
                    }
                    None => {
                        run = Some(Token {
                            text: lower.to_string(),
                            start: idx,
                            end,
                        });
                    }
                }
            } else {
                // Anything that is not a Latin letter closes the current run.
                if let Some(finished) = run.take() {
                    tokens.push(finished);
                }
                if is_cjk_ideograph(lower) {
                    tokens.push(Token {
                        text: lower.to_string(),
                        start: idx,
                        end,
                    });
                }
            }
        }
    }

    if let Some(finished) = run {
        tokens.push(finished);
    }

    tokens
}

/// Tokenizes with an explicit [`TokenizeConfig`].
///
/// When `normalize_unicode` is set the text is NFKC-normalized first and the
/// returned offsets refer to the normalized text, not the input.
pub fn tokenize_with_config(text: &str, cfg: &TokenizeConfig) -> Vec<Token> {
    if cfg.normalize_unicode {
        let normalized: String = text.nfkc().collect();
        tokenize(&normalized)
    } else {
        tokenize(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn latin_runs_are_lowercased() {
        let tokens = tokenize("This is a TEST sentence.");
        assert_eq!(texts(&tokens), vec!["this", "is", "a", "test", "sentence"]);
    }

    #[test]
    fn digits_and_punctuation_split_runs() {
        let tokens = tokenize("abc123def,ghi-jkl");
        assert_eq!(texts(&tokens), vec!["abc", "def", "ghi", "jkl"]);
    }

    #[test]
    fn each_cjk_ideograph_is_a_token() {
        let tokens = tokenize("下列说法正确的是");
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[0].text, "下");
        assert_eq!(tokens[7].text, "是");
    }

    #[test]
    fn cjk_breaks_latin_run() {
        let tokens = tokenize("abc中def");
        assert_eq!(texts(&tokens), vec!["abc", "中", "def"]);
    }

    #[test]
    fn cjk_punctuation_and_other_scripts_are_dropped() {
        // Full-width punctuation, kana and Cyrillic are outside both classes.
        let tokens = tokenize("。，ひらがなпривет！");
        assert!(tokens.is_empty());
    }

    #[test]
    fn accented_letters_end_a_run() {
        let tokens = tokenize("café");
        assert_eq!(texts(&tokens), vec!["caf"]);
    }

    #[test]
    fn empty_and_symbol_only_inputs_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
        assert!(tokenize("1234 %%% ---").is_empty());
    }

    #[test]
    fn offsets_point_into_input() {
        let input = "  Hello 世界 ok";
        let tokens = tokenize(input);
        for token in &tokens {
            assert_eq!(input[token.start..token.end].to_lowercase(), token.text);
        }
        assert_eq!(tokens[0].start, 2);
        assert_eq!(tokens[0].end, 7);
    }

    #[test]
    fn expanding_lowercase_joins_run() {
        // U+0130 lower-cases to "i" followed by a combining dot, which ends the run.
        let tokens = tokenize("\u{0130}x");
        assert_eq!(texts(&tokens), vec!["i", "x"]);
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 2);
    }

    #[test]
    fn tokenization_is_deterministic() {
        let input = "Mixed 中文 and English 文本 123";
        assert_eq!(tokenize(input), tokenize(input));
    }

    #[test]
    fn range_boundaries() {
        assert!(is_cjk_ideograph('\u{4E00}'));
        assert!(is_cjk_ideograph('\u{9FA5}'));
        assert!(!is_cjk_ideograph('\u{4DFF}'));
        assert!(!is_cjk_ideograph('\u{9FA6}'));
    }

    #[test]
    fn nfkc_folds_fullwidth_letters() {
        let plain = tokenize_with_config("ＡＢＣ", &TokenizeConfig::default());
        assert!(plain.is_empty());

        let cfg = TokenizeConfig::new().with_unicode_normalization(true);
        let folded = tokenize_with_config("ＡＢＣ", &cfg);
        assert_eq!(texts(&folded), vec!["abc"]);
    }
}
