//! Named-entity recognition
//!
//! The pipeline only depends on [`EntityRecognizer`]. The default recogniser is a
//! pretrained BERT token classifier; [`gazetteer::SkillGazetteer`] is a
//! dictionary-based recogniser for skills and doubles as a stand-in in tests.

pub mod bert;
pub mod gazetteer;
pub mod model_manager;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Skill,
    Organization,
    Person,
    Location,
    Misc,
    Other(String),
}

impl EntityLabel {
    /// Map a model tag (without BIO prefix) to a label
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "SKILL" => EntityLabel::Skill,
            "ORG" | "ORGANIZATION" => EntityLabel::Organization,
            "PER" | "PERSON" => EntityLabel::Person,
            "LOC" | "LOCATION" | "GPE" => EntityLabel::Location,
            "MISC" => EntityLabel::Misc,
            _ => EntityLabel::Other(tag.to_string()),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::Skill => write!(f, "SKILL"),
            EntityLabel::Organization => write!(f, "ORG"),
            EntityLabel::Person => write!(f, "PER"),
            EntityLabel::Location => write!(f, "LOC"),
            EntityLabel::Misc => write!(f, "MISC"),
            EntityLabel::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// A labelled span of the input text. `start..end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// Shared read-only across concurrent analyses
pub trait EntityRecognizer: Send + Sync {
    fn extract_entities(&self, text: &str) -> Result<Vec<RecognizedEntity>>;

    fn name(&self) -> &str;
}

/// Runs several recognisers over the same text and concatenates their entities
pub struct CompositeRecognizer {
    recognizers: Vec<Arc<dyn EntityRecognizer>>,
    name: String,
}

impl CompositeRecognizer {
    pub fn new(recognizers: Vec<Arc<dyn EntityRecognizer>>) -> Self {
        let name = recognizers
            .iter()
            .map(|r| r.name().to_string())
            .collect::<Vec<_>>()
            .join("+");
        Self { recognizers, name }
    }
}

impl EntityRecognizer for CompositeRecognizer {
    fn extract_entities(&self, text: &str) -> Result<Vec<RecognizedEntity>> {
        let mut entities = Vec::new();
        for recognizer in &self.recognizers {
            let mut found = recognizer.extract_entities(text)?;
            log::debug!("{} recognised {} entities", recognizer.name(), found.len());
            entities.append(&mut found);
        }
        entities.sort_by_key(|e| (e.start, e.end));
        Ok(entities)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
