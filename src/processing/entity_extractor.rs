//! Entity extraction: statistical NER pass plus pattern pass

use crate::error::Result;
use crate::ner::{EntityLabel, EntityRecognizer};
use crate::processing::patterns::{EducationMatch, PatternExtractor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub skills: BTreeSet<String>,
    pub education: Vec<EducationMatch>,
    pub experience: Vec<String>,
    pub organizations: BTreeSet<String>,
    /// ORG entities mentioning "university". Reported separately, never merged into `education`.
    pub university_mentions: Vec<String>,
}

pub struct EntityExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
    patterns: PatternExtractor,
}

impl EntityExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer,
            patterns: PatternExtractor::new(),
        }
    }

    pub fn recognizer_name(&self) -> &str {
        self.recognizer.name()
    }

    pub fn extract(&self, text: &str) -> Result<ExtractedEntities> {
        let mut entities = ExtractedEntities::default();

        for entity in self.recognizer.extract_entities(text)? {
            match entity.label {
                EntityLabel::Skill => {
                    entities.skills.insert(entity.text);
                }
                EntityLabel::Organization if entity.text.to_lowercase().contains("university") => {
                    entities.university_mentions.push(entity.text);
                }
                EntityLabel::Organization => {
                    entities.organizations.insert(entity.text);
                }
                _ => {}
            }
        }

        // A string labelled SKILL anywhere is a skill, never also an organization
        let skills = &entities.skills;
        entities.organizations.retain(|org| !skills.contains(org));

        entities.experience = self.patterns.experience(text);
        entities.education = self.patterns.education(text);

        log::debug!(
            "Extracted {} skills, {} organizations, {} education, {} experience",
            entities.skills.len(),
            entities.organizations.len(),
            entities.education.len(),
            entities.experience.len()
        );

        Ok(entities)
    }
}
