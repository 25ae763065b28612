use async_trait::async_trait;

use crate::config::IngestConfig;
use crate::error::ParseError;
use crate::extract::{ExtractProgress, ParagraphExtractor};
use crate::payload::{clean_paragraphs, decode_text, split_raw_paragraphs};
use crate::types::{Paragraph, SourceFile};

/// Extractor for UTF-8 `.txt` and `.md` files.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor {
    cfg: IngestConfig,
}

impl PlainTextExtractor {
    pub fn new(cfg: IngestConfig) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl ParagraphExtractor for PlainTextExtractor {
    fn format_name(&self) -> &'static str {
        "Plain text"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt", "md"]
    }

    async fn extract(
        &self,
        file: &SourceFile,
        progress: ExtractProgress<'_>,
    ) -> Result<Vec<Paragraph>, ParseError> {
        progress("Reading file", 10);
        let text = decode_text(file)?;

        progress("Splitting paragraphs", 30);
        let raw = split_raw_paragraphs(&text, self.cfg.split);

        progress("Cleaning paragraphs", 60);
        let paragraphs = clean_paragraphs(raw, &self.cfg);

        progress("Validating content", 80);
        if paragraphs.is_empty() {
            return Err(ParseError::NoUsableParagraphs {
                name: file.name.clone(),
            });
        }

        progress("Done", 100);
        Ok(paragraphs)
    }
}
