//! Resume analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod ner;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeAnalyzerError};
pub use processing::analyzer::{Analysis, AnalysisResult, ResumeAnalyzer};
pub use processing::document::{Document, NormalizedText};
pub use processing::scorer::CompatibilityScore;
