//! Document and normalized text structures

use crate::input::file_detector::DocumentKind;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// Raw uploaded container. Consumed once by text extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    kind: DocumentKind,
    bytes: Vec<u8>,
    source: String,
}

impl Document {
    pub fn new(kind: DocumentKind, bytes: Vec<u8>, source: impl Into<String>) -> Self {
        Self {
            kind,
            bytes,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Where the document came from (file path or upload name)
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Text produced by extraction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-delimited token count
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    /// Length in Unicode scalar values
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for NormalizedText {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let text = NormalizedText::new("  Senior   Rust\tengineer\n résumé ");
        assert_eq!(text.word_count(), 4);
        assert_eq!(text.char_count(), 33);
    }

    #[test]
    fn test_empty_counts() {
        let text = NormalizedText::default();
        assert_eq!(text.word_count(), 0);
        assert_eq!(text.char_count(), 0);
    }

    #[test]
    fn test_document_accessors() {
        let doc = Document::new(DocumentKind::PlainText, b"hello".to_vec(), "resume.txt");
        assert_eq!(doc.kind(), DocumentKind::PlainText);
        assert_eq!(doc.byte_len(), 5);
        assert_eq!(doc.source(), "resume.txt");
    }
}
