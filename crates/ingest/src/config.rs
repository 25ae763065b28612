//! Configuration types for paragraph extraction.
//!
//! [`IngestConfig`] controls how raw text is cut into paragraphs and which
//! paragraphs are kept. It is cheap to clone and serializable from YAML or
//! JSON.
//!
//! ```rust
//! use ingest::{IngestConfig, ParagraphSplit};
//!
//! let config = IngestConfig::default();
//! assert_eq!(config.min_paragraph_chars, 20);
//! assert_eq!(config.split, ParagraphSplit::Lines);
//! config.validate().expect("default config is valid");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum number of non-whitespace characters per paragraph.
pub const DEFAULT_MIN_PARAGRAPH_CHARS: usize = 20;

/// Default upper bound on source file size (50 MiB).
pub const DEFAULT_MAX_FILE_BYTES: usize = 50 * 1024 * 1024;

/// How plain text is cut into raw paragraphs before cleaning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphSplit {
    /// Every non-empty line is a paragraph (one question per line).
    #[default]
    Lines,
    /// Blocks separated by one or more blank lines are paragraphs; line
    /// breaks inside a block are joined.
    BlankLines,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestConfig {
    /// Configuration schema version. Must be >= 1.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Paragraphs with fewer non-whitespace characters than this are dropped
    /// after whitespace normalization.
    #[serde(default = "default_min_paragraph_chars")]
    pub min_paragraph_chars: usize,

    /// Files larger than this are rejected with `ParseError::TooLarge`.
    /// `None` disables the check.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: Option<usize>,

    #[serde(default)]
    pub split: ParagraphSplit,
}

fn default_version() -> u32 {
    1
}

fn default_min_paragraph_chars() -> usize {
    DEFAULT_MIN_PARAGRAPH_CHARS
}

fn default_max_file_bytes() -> Option<usize> {
    Some(DEFAULT_MAX_FILE_BYTES)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("ingest config version must be >= 1")]
    InvalidVersion,

    #[error("max_file_bytes must be greater than zero when set")]
    ZeroFileLimit,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            max_file_bytes: Some(DEFAULT_MAX_FILE_BYTES),
            split: ParagraphSplit::Lines,
        }
    }
}

impl IngestConfig {
    pub fn with_split(mut self, split: ParagraphSplit) -> Self {
        self.split = split;
        self
    }

    pub fn with_min_paragraph_chars(mut self, chars: usize) -> Self {
        self.min_paragraph_chars = chars;
        self
    }

    pub fn with_max_file_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_file_bytes = limit;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion);
        }
        if self.max_file_bytes == Some(0) {
            return Err(ConfigError::ZeroFileLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_version_rejected() {
        let cfg = IngestConfig {
            version: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidVersion));
    }

    #[test]
    fn zero_file_limit_rejected() {
        let cfg = IngestConfig::default().with_max_file_bytes(Some(0));
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroFileLimit));
        let cfg = IngestConfig::default().with_max_file_bytes(None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let cfg: IngestConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, IngestConfig::default());

        let cfg: IngestConfig =
            serde_json::from_str(r#"{"version": 1, "split": "blank_lines"}"#).unwrap();
        assert_eq!(cfg.split, ParagraphSplit::BlankLines);
    }
}
