//! Error types produced by paragraph extraction.
//!
//! Every variant names the file it concerns so a caller processing several
//! files can report which one failed without extra bookkeeping. Errors are
//! cloneable and comparable so they can be asserted on in tests and carried
//! through the scan pipeline unchanged.
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`UnsupportedFormat`](ParseError::UnsupportedFormat) | no extractor is registered for the file extension |
//! | [`Io`](ParseError::Io) | the file could not be read |
//! | [`Corrupt`](ParseError::Corrupt) | the bytes do not decode as the claimed format |
//! | [`Encrypted`](ParseError::Encrypted) | the document is password protected |
//! | [`TooLarge`](ParseError::TooLarge) | the file exceeds `max_file_bytes` |
//! | [`NoUsableParagraphs`](ParseError::NoUsableParagraphs) | nothing survives the minimum-length filter |
//!
//! ```rust
//! use ingest::ParseError;
//!
//! let err = ParseError::NoUsableParagraphs { name: "bank.txt".into() };
//! assert_eq!(err.file_name(), "bank.txt");
//! assert!(err.to_string().contains("no usable paragraphs"));
//! ```

use thiserror::Error;

/// Errors raised while turning a source file into paragraphs.
///
/// The engine never produces these itself; they come from extractors and are
/// surfaced to the caller unmodified. The enum is `#[non_exhaustive]` so
/// extractors for new formats can gain variants without breaking callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// No extractor handles this file's extension.
    #[error("unsupported file format for \"{name}\"; supported formats: {supported}")]
    UnsupportedFormat { name: String, supported: String },

    /// Reading the file failed.
    #[error("failed to read \"{name}\": {reason}")]
    Io { name: String, reason: String },

    /// The content is not valid for its format (for text files: not UTF-8).
    #[error("\"{name}\" is corrupt: {reason}")]
    Corrupt { name: String, reason: String },

    /// The document is encrypted and cannot be read.
    #[error("\"{name}\" is encrypted")]
    Encrypted { name: String },

    /// The file is larger than the configured limit.
    #[error("\"{name}\" is {size} bytes, exceeding the limit of {limit} bytes")]
    TooLarge {
        name: String,
        size: usize,
        limit: usize,
    },

    /// Extraction succeeded but no paragraph met the minimum length.
    #[error("no usable paragraphs found in \"{name}\"")]
    NoUsableParagraphs { name: String },
}

impl ParseError {
    /// Name of the file the error concerns.
    pub fn file_name(&self) -> &str {
        match self {
            ParseError::UnsupportedFormat { name, .. }
            | ParseError::Io { name, .. }
            | ParseError::Corrupt { name, .. }
            | ParseError::Encrypted { name }
            | ParseError::TooLarge { name, .. }
            | ParseError::NoUsableParagraphs { name } => name,
        }
    }
}
