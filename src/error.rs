//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text is not valid UTF-8: {0}")]
    Decode(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Document is {size} bytes, limit is {limit} bytes")]
    DocumentTooLarge { size: usize, limit: usize },

    #[error("NER model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("NER inference error: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

impl From<std::string::FromUtf8Error> for ResumeAnalyzerError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ResumeAnalyzerError::Decode(err.utf8_error().to_string())
    }
}

/// Tensor errors only surface while running an already loaded model
impl From<candle_core::Error> for ResumeAnalyzerError {
    fn from(err: candle_core::Error) -> Self {
        ResumeAnalyzerError::Inference(err.to_string())
    }
}
