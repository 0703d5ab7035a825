//! Report structure handed to the formatters

use crate::processing::analyzer::Analysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Analysis plus the context needed to present it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    pub analysis: Analysis,
    /// Suggestions shown when the score is below the improvement threshold
    pub tips: Vec<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub compatibility_score: f64,
    pub skills_identified: usize,
    pub education_items: usize,
    pub experience_items: usize,
    pub organizations_mentioned: usize,
    pub needs_improvement: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_file: String,
    pub job_source: String,
    pub recognizer: String,
    pub scorer: String,
    pub improvement_threshold: f64,
}

impl AnalysisReport {
    pub fn new(analysis: Analysis, metadata: ReportMetadata) -> Self {
        let needs_improvement = analysis
            .compatibility_score
            .is_below(metadata.improvement_threshold);

        let summary = ReportSummary {
            compatibility_score: analysis.compatibility_score.value(),
            skills_identified: analysis.result.skills.len(),
            education_items: analysis.result.education.len(),
            experience_items: analysis.result.experience.len(),
            organizations_mentioned: analysis.result.organizations.len(),
            needs_improvement,
        };

        let tips = if needs_improvement {
            improvement_tips()
        } else {
            Vec::new()
        };

        Self {
            summary,
            analysis,
            tips,
            metadata,
        }
    }
}

fn improvement_tips() -> Vec<String> {
    [
        "Add more keywords from the job description",
        "Highlight relevant skills and experience",
        "Quantify your achievements with numbers",
        "Ensure your resume is well-structured and easy to read",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
