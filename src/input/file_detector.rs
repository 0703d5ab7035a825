//! Document kind detection

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";

/// Container kinds the pipeline can turn into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    /// Office Open XML word processing document (.docx)
    RichText,
    PlainText,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::RichText),
            "txt" | "text" => Ok(DocumentKind::PlainText),
            other => Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                "extension .{} (supported: pdf, docx, txt)",
                other
            ))),
        }
    }

    pub fn from_mime(mime: &str) -> Result<Self> {
        // Parameters such as "; charset=utf-8" do not change the kind
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            PDF_MIME => Ok(DocumentKind::Pdf),
            DOCX_MIME => Ok(DocumentKind::RichText),
            TEXT_MIME => Ok(DocumentKind::PlainText),
            _ => Err(ResumeAnalyzerError::UnsupportedFormat(format!("media type {}", mime))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeAnalyzerError::UnsupportedFormat(format!("file has no extension: {}", path.display()))
            })?;

        Self::from_extension(extension)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "PDF"),
            DocumentKind::RichText => write!(f, "DOCX"),
            DocumentKind::PlainText => write!(f, "plain text"),
        }
    }
}
