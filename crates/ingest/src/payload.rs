//! Decoding and paragraph cleanup shared by every extractor.
//!
//! ```text
//! bytes ──decode_text──▶ text ──split_raw_paragraphs──▶ raw blocks
//!                                                   │
//!                                   clean_paragraphs ▼
//!                          collapse whitespace, trim, drop short blocks
//! ```

use canonical::{collapse_whitespace, non_whitespace_len};

use crate::config::{IngestConfig, ParagraphSplit};
use crate::error::ParseError;
use crate::types::{Paragraph, SourceFile};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes a file's bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode_text(file: &SourceFile) -> Result<String, ParseError> {
    let bytes = file.bytes.strip_prefix(UTF8_BOM).unwrap_or(&file.bytes);
    String::from_utf8(bytes.to_vec()).map_err(|err| ParseError::Corrupt {
        name: file.name.clone(),
        reason: format!("invalid UTF-8 at byte {}", err.utf8_error().valid_up_to()),
    })
}

/// Rejects files over the configured size limit.
pub fn enforce_size_limit(file: &SourceFile, cfg: &IngestConfig) -> Result<(), ParseError> {
    match cfg.max_file_bytes {
        Some(limit) if file.size() > limit => Err(ParseError::TooLarge {
            name: file.name.clone(),
            size: file.size(),
            limit,
        }),
        _ => Ok(()),
    }
}

/// Cuts text into raw paragraph blocks. Blocks are not yet cleaned.
pub fn split_raw_paragraphs(text: &str, split: ParagraphSplit) -> Vec<String> {
    match split {
        ParagraphSplit::Lines => text.lines().map(str::to_owned).collect(),
        ParagraphSplit::BlankLines => {
            let mut blocks = Vec::new();
            let mut current: Vec<&str> = Vec::new();
            for line in text.lines() {
                if line.trim().is_empty() {
                    if !current.is_empty() {
                        blocks.push(current.join(" "));
                        current.clear();
                    }
                } else {
                    current.push(line);
                }
            }
            if !current.is_empty() {
                blocks.push(current.join(" "));
            }
            blocks
        }
    }
}

/// Normalizes whitespace in each block and keeps those with at least
/// `min_paragraph_chars` non-whitespace characters. Order is preserved.
pub fn clean_paragraphs<I, S>(raw: I, cfg: &IngestConfig) -> Vec<Paragraph>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|block| {
            let text = collapse_whitespace(block.as_ref());
            (non_whitespace_len(&text) >= cfg.min_paragraph_chars).then(|| Paragraph::from(text))
        })
        .collect()
}
