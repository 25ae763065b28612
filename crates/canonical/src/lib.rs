//! dupscan canonical text layer.
//!
//! Turns paragraph text into the atomic units that similarity scoring works
//! on. Everything here is a pure function of `(text, config)`.
//!
//! ## What we do
//!
//! - Lower-casing and extraction of two token classes: single CJK ideographs
//!   and maximal runs of ASCII letters
//! - Optional NFKC normalization ahead of tokenization
//! - Whitespace helpers used by paragraph extraction and the candidate filter
//!
//! ## Invariants worth knowing
//!
//! - No I/O, no clock, no locale: same text + same config = same tokens
//! - Digits, punctuation and symbols never produce tokens
//! - Empty input yields an empty token list, never an error
//!
//! ## Example
//!
//! ```rust
//! use canonical::tokenize;
//!
//! let tokens = tokenize("This is a test sentence about history.");
//! assert_eq!(tokens.len(), 7);
//! assert_eq!(tokens[6].text, "history");
//! ```

mod config;
mod error;
mod token;
mod whitespace;

pub use crate::config::TokenizeConfig;
pub use crate::error::CanonicalError;
pub use crate::token::{
    is_cjk_ideograph, tokenize, tokenize_with_config, Token, CJK_IDEOGRAPH_END,
    CJK_IDEOGRAPH_START,
};
pub use crate::whitespace::{collapse_whitespace, non_whitespace_len, strip_whitespace};
