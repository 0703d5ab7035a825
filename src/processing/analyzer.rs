//! Analysis pipeline: extraction, entity extraction and scoring composed into one result

use crate::error::Result;
use crate::input::text_extractor;
use crate::ner::EntityRecognizer;
use crate::processing::document::{Document, NormalizedText};
use crate::processing::entity_extractor::{EntityExtractor, ExtractedEntities};
use crate::processing::patterns::EducationMatch;
use crate::processing::scorer::{CompatibilityScore, SimilarityScorer};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// Everything surfaced about one résumé
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub skills: BTreeSet<String>,
    pub education: Vec<EducationMatch>,
    pub experience: Vec<String>,
    pub organizations: BTreeSet<String>,
    /// Diagnostic only, see [`ExtractedEntities::university_mentions`]
    pub university_mentions: Vec<String>,
    pub word_count: usize,
    pub char_count: usize,
}

/// Result and score of one analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub compatibility_score: CompatibilityScore,
    pub processing_time_ms: u64,
}

/// Pure composition of extracted entities and text counts
pub fn aggregate(text: &NormalizedText, entities: ExtractedEntities) -> AnalysisResult {
    AnalysisResult {
        skills: entities.skills,
        education: entities.education,
        experience: entities.experience,
        organizations: entities.organizations,
        university_mentions: entities.university_mentions,
        word_count: text.word_count(),
        char_count: text.char_count(),
    }
}

/// Holds only read-only collaborators, so one instance can serve concurrent requests
pub struct ResumeAnalyzer {
    extractor: EntityExtractor,
    scorer: Box<dyn SimilarityScorer>,
}

impl ResumeAnalyzer {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, scorer: Box<dyn SimilarityScorer>) -> Self {
        Self {
            extractor: EntityExtractor::new(recognizer),
            scorer,
        }
    }

    pub fn recognizer_name(&self) -> &str {
        self.extractor.recognizer_name()
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Extract the document and analyse it. Extraction errors stop the pipeline
    /// before any result is built.
    pub fn analyze_document(&self, document: &Document, job_description: &str) -> Result<Analysis> {
        let text = text_extractor::extract(document)?;
        self.analyze_text(&text, job_description)
    }

    pub fn analyze_text(&self, text: &NormalizedText, job_description: &str) -> Result<Analysis> {
        let start_time = Instant::now();

        let entities = self.extractor.extract(text)?;
        let result = aggregate(text, entities);
        let compatibility_score = self.scorer.score(text, job_description);

        let processing_time = start_time.elapsed();
        info!(
            "Analysis complete in {:.2?}: score {}%, {} skills, {} organizations",
            processing_time,
            compatibility_score,
            result.skills.len(),
            result.organizations.len()
        );

        Ok(Analysis {
            result,
            compatibility_score,
            processing_time_ms: processing_time.as_millis() as u64,
        })
    }
}
