//! Input manager for loading documents from disk

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::DocumentKind;
use crate::input::text_extractor;
use crate::processing::document::{Document, NormalizedText};
use log::info;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    max_document_bytes: usize,
}

impl InputManager {
    pub fn new(max_document_bytes: usize) -> Self {
        Self { max_document_bytes }
    }

    /// Read a file into a [`Document`], resolving its kind from the extension
    pub async fn load_document(&self, path: &Path) -> Result<Document> {
        // Reject by kind before touching the file contents
        let kind = DocumentKind::from_path(path)?;

        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        self.check_size(bytes.len())?;

        info!("Loaded {} document: {} ({} bytes)", kind, path.display(), bytes.len());
        Ok(Document::new(kind, bytes, path.to_string_lossy()))
    }

    /// Wrap in-memory bytes with a declared media type
    pub fn document_from_bytes(&self, mime: &str, bytes: Vec<u8>, source: &str) -> Result<Document> {
        let kind = DocumentKind::from_mime(mime)?;
        self.check_size(bytes.len())?;
        Ok(Document::new(kind, bytes, source))
    }

    pub async fn extract_text(&self, path: &Path) -> Result<NormalizedText> {
        let document = self.load_document(path).await?;
        text_extractor::extract(&document)
    }

    /// Job descriptions are always plain UTF-8 text
    pub async fn read_job_description(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        self.check_size(bytes.len())?;
        Ok(String::from_utf8(bytes)?)
    }

    fn check_size(&self, size: usize) -> Result<()> {
        if size > self.max_document_bytes {
            return Err(ResumeAnalyzerError::DocumentTooLarge {
                size,
                limit: self.max_document_bytes,
            });
        }
        Ok(())
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(crate::config::ProcessingConfig::default().max_document_bytes)
    }
}
