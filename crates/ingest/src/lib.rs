//! # dupscan ingest
//!
//! The extraction boundary: turns source files into [`Document`]s, ordered
//! sequences of cleaned paragraphs that the scan engine compares.
//!
//! ## Pipeline
//!
//! 1. [`DocumentParser`] picks a [`ParagraphExtractor`] by file extension and
//!    rejects unknown formats and oversized files.
//! 2. The extractor decodes the file and cuts it into raw blocks.
//! 3. [`clean_paragraphs`] collapses whitespace and drops blocks with fewer
//!    than `min_paragraph_chars` (default 20) non-whitespace characters.
//! 4. A file with no surviving paragraph is a
//!    [`ParseError::NoUsableParagraphs`] error, never an empty document.
//!
//! Extractors report per-file progress as `(message, percent)` pairs. Each
//! parse is wrapped in an `ingest.parse` tracing span and logs
//! `parse_success` / `parse_failure` with `elapsed_micros`.
//!
//! ## Example
//!
//! ```rust
//! use ingest::{ignore_progress, DocumentParser, IngestConfig, SourceFile};
//!
//! # tokio_test_block(async {
//! let parser = DocumentParser::new(IngestConfig::default());
//! let file = SourceFile::new(
//!     "bank.txt",
//!     "Which of the following rivers is the longest?\nok\n",
//! );
//! let doc = parser.parse(&file, &ignore_progress).await.unwrap();
//! assert_eq!(doc.len(), 1);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod config;
mod error;
mod extract;
mod payload;
mod text;
mod types;

pub use crate::config::{
    ConfigError, IngestConfig, ParagraphSplit, DEFAULT_MAX_FILE_BYTES,
    DEFAULT_MIN_PARAGRAPH_CHARS,
};
pub use crate::error::ParseError;
pub use crate::extract::{ignore_progress, DocumentParser, ExtractProgress, ParagraphExtractor};
pub use crate::payload::{clean_paragraphs, decode_text, enforce_size_limit, split_raw_paragraphs};
pub use crate::text::PlainTextExtractor;
pub use crate::types::{Document, Paragraph, SourceFile};
