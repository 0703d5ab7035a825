//! Text analysis pipeline

pub mod document;
pub mod text_processor;
pub mod patterns;
pub mod entity_extractor;
pub mod scorer;
pub mod analyzer;
