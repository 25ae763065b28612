//! Extractor trait and the extension-dispatching [`DocumentParser`].
//!
//! Format-specific extractors (plain text ships here; word-processor and PDF
//! extractors live outside this crate) implement [`ParagraphExtractor`]. The
//! parser picks one by file extension, enforces the size limit, times the call
//! and logs the outcome.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn, Level};

use crate::config::IngestConfig;
use crate::error::ParseError;
use crate::payload::enforce_size_limit;
use crate::text::PlainTextExtractor;
use crate::types::{Document, Paragraph, SourceFile};

/// Progress sink for a single file: `(message, percent)` with percent in
/// `0..=100`. Extractors report coarse steps; callers map them into their own
/// range.
pub type ExtractProgress<'a> = &'a (dyn Fn(&str, u8) + Send + Sync);

/// No-op progress sink.
pub fn ignore_progress(_message: &str, _percent: u8) {}

#[async_trait]
pub trait ParagraphExtractor: Send + Sync {
    /// Human-readable format name, e.g. `"Plain text"`.
    fn format_name(&self) -> &'static str;

    /// Lower-case extensions (without the dot) this extractor handles.
    fn extensions(&self) -> &'static [&'static str];

    /// Produces cleaned paragraphs, or an error if none survive.
    async fn extract(
        &self,
        file: &SourceFile,
        progress: ExtractProgress<'_>,
    ) -> Result<Vec<Paragraph>, ParseError>;
}

/// Dispatches source files to the extractor registered for their extension.
#[derive(Clone)]
pub struct DocumentParser {
    cfg: IngestConfig,
    extractors: Vec<Arc<dyn ParagraphExtractor>>,
}

impl DocumentParser {
    /// Parser with no extractors registered.
    pub fn empty(cfg: IngestConfig) -> Self {
        Self {
            cfg,
            extractors: Vec::new(),
        }
    }

    /// Parser with the built-in plain text extractor.
    pub fn new(cfg: IngestConfig) -> Self {
        let text = PlainTextExtractor::new(cfg.clone());
        Self::empty(cfg).with_extractor(text)
    }

    /// Registers an extractor. Later registrations win on extension clashes.
    pub fn with_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ParagraphExtractor + 'static,
    {
        self.extractors.push(Arc::new(extractor));
        self
    }

    pub fn config(&self) -> &IngestConfig {
        &self.cfg
    }

    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut exts: Vec<&'static str> = self
            .extractors
            .iter()
            .flat_map(|e| e.extensions().iter().copied())
            .collect();
        exts.sort_unstable();
        exts.dedup();
        exts
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.extractor_for(&SourceFile::new(name, Vec::new())).is_some()
    }

    fn extractor_for(&self, file: &SourceFile) -> Option<&Arc<dyn ParagraphExtractor>> {
        let ext = file.extension()?;
        self.extractors
            .iter()
            .rev()
            .find(|e| e.extensions().contains(&ext.as_str()))
    }

    /// Turns a source file into a [`Document`].
    ///
    /// # Errors
    ///
    /// - [`ParseError::UnsupportedFormat`] when no extractor matches
    /// - [`ParseError::TooLarge`] when the file exceeds `max_file_bytes`
    /// - whatever the extractor returns, including
    ///   [`ParseError::NoUsableParagraphs`]
    pub async fn parse(
        &self,
        file: &SourceFile,
        progress: ExtractProgress<'_>,
    ) -> Result<Document, ParseError> {
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "ingest.parse",
            file = %file.name,
            size = file.size()
        );

        let result = self.parse_inner(file, progress).await;
        let elapsed_micros = start.elapsed().as_micros();
        let _guard = span.enter();
        match &result {
            Ok(doc) => info!(paragraphs = doc.len(), elapsed_micros, "parse_success"),
            Err(err) => warn!(error = %err, elapsed_micros, "parse_failure"),
        }
        result
    }

    async fn parse_inner(
        &self,
        file: &SourceFile,
        progress: ExtractProgress<'_>,
    ) -> Result<Document, ParseError> {
        let extractor = self
            .extractor_for(file)
            .ok_or_else(|| ParseError::UnsupportedFormat {
                name: file.name.clone(),
                supported: self.supported_extensions().join(", "),
            })?;
        enforce_size_limit(file, &self.cfg)?;

        let paragraphs = extractor.extract(file, progress).await?;
        if paragraphs.is_empty() {
            return Err(ParseError::NoUsableParagraphs {
                name: file.name.clone(),
            });
        }
        Ok(Document {
            name: file.name.clone(),
            paragraphs,
        })
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new(IngestConfig::default())
    }
}

impl std::fmt::Debug for DocumentParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentParser")
            .field("cfg", &self.cfg)
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Pretends every `.docx` is encrypted.
    struct LockedDocx;

    #[async_trait]
    impl ParagraphExtractor for LockedDocx {
        fn format_name(&self) -> &'static str {
            "Word document"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["docx"]
        }

        async fn extract(
            &self,
            file: &SourceFile,
            _progress: ExtractProgress<'_>,
        ) -> Result<Vec<Paragraph>, ParseError> {
            Err(ParseError::Encrypted {
                name: file.name.clone(),
            })
        }
    }

    /// Returns nothing, to check the parser's own empty-result guard.
    struct Hollow;

    #[async_trait]
    impl ParagraphExtractor for Hollow {
        fn format_name(&self) -> &'static str {
            "Hollow"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["hol"]
        }

        async fn extract(
            &self,
            _file: &SourceFile,
            _progress: ExtractProgress<'_>,
        ) -> Result<Vec<Paragraph>, ParseError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn unsupported_extension_lists_supported_formats() {
        let parser = DocumentParser::default();
        let err = parser
            .parse(&SourceFile::new("scan.png", vec![0u8; 4]), &ignore_progress)
            .await
            .unwrap_err();
        match err {
            ParseError::UnsupportedFormat { name, supported } => {
                assert_eq!(name, "scan.png");
                assert_eq!(supported, "md, txt");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn registered_extractor_errors_pass_through() {
        let parser = DocumentParser::default().with_extractor(LockedDocx);
        assert!(parser.is_supported("Exam.DOCX"));
        let err = parser
            .parse(&SourceFile::new("exam.docx", vec![1, 2, 3]), &ignore_progress)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Encrypted {
                name: "exam.docx".into()
            }
        );
    }

    #[tokio::test]
    async fn empty_extractor_output_is_rejected() {
        let parser = DocumentParser::default().with_extractor(Hollow);
        let err = parser
            .parse(&SourceFile::new("x.hol", vec![]), &ignore_progress)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::NoUsableParagraphs { .. }));
    }

    #[tokio::test]
    async fn size_limit_checked_before_extraction() {
        let cfg = IngestConfig::default().with_max_file_bytes(Some(8));
        let parser = DocumentParser::new(cfg);
        let err = parser
            .parse(
                &SourceFile::new("big.txt", "a".repeat(64)),
                &ignore_progress,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::TooLarge { size: 64, limit: 8, .. }));
    }

    #[tokio::test]
    async fn progress_reaches_one_hundred() {
        let seen = Mutex::new(Vec::new());
        let record = |msg: &str, pct: u8| seen.lock().unwrap().push((msg.to_owned(), pct));
        let parser = DocumentParser::default();
        let text = "Which river is the longest river in the world?\n";
        let doc = parser
            .parse(&SourceFile::new("q.txt", text), &record)
            .await
            .unwrap();
        assert_eq!(doc.len(), 1);

        let seen = seen.into_inner().unwrap();
        let percents: Vec<u8> = seen.iter().map(|(_, p)| *p).collect();
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(percents.last(), Some(&100));
    }
}
