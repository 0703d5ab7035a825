//! Input processing module
//! Handles document kind detection, text extraction, and loading documents from disk

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use file_detector::DocumentKind;
