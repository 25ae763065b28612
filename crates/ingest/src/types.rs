//! Data model for the extraction boundary.
//!
//! ```text
//! SourceFile { name, bytes }
//!        │
//!        ▼  DocumentParser::parse()
//! Document
//! ├── name: String
//! └── paragraphs: Vec<Paragraph>   (cleaned, >= min_paragraph_chars each)
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One paragraph of text, already whitespace-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paragraph(String);

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Paragraph {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Paragraph {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, ordered sequence of paragraphs. Paragraph indices are positions in
/// `paragraphs` and are what match results refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new<I, P>(name: impl Into<String>, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Paragraph>,
    {
        Self {
            name: name.into(),
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }
}

/// Raw bytes of an input file plus the name used for format dispatch and
/// error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk. The file name (without directories) becomes the
    /// source name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|err| ParseError::Io {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self { name, bytes })
    }

    /// Lower-cased extension after the last `.`, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(SourceFile::new("Bank.TXT", "").extension().as_deref(), Some("txt"));
        assert_eq!(SourceFile::new("a.b.md", "").extension().as_deref(), Some("md"));
        assert_eq!(SourceFile::new("README", "").extension(), None);
        assert_eq!(SourceFile::new(".hidden", "").extension(), None);
        assert_eq!(SourceFile::new("trailing.", "").extension(), None);
    }

    #[test]
    fn from_path_uses_file_name() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "hello").unwrap();
        let source = SourceFile::from_path(file.path()).unwrap();
        assert!(source.name.ends_with(".txt"));
        assert!(!source.name.contains('/'));
        assert_eq!(source.bytes, b"hello");
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = SourceFile::from_path("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io { ref name, .. } if name == "here.txt"));
    }

    #[test]
    fn document_accessors() {
        let doc = Document::new("bank.txt", ["first paragraph", "second paragraph"]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.paragraph(1).map(Paragraph::as_str), Some("second paragraph"));
        assert!(doc.paragraph(2).is_none());
    }
}
