//! Regular-expression extraction of experience durations and degrees

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One degree mention: `Bachelor of Science in Computer Science` becomes
/// `("Bachelor", "of", "Science in Computer Science")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationMatch {
    pub degree: String,
    /// "in", "of", or empty
    pub connector: String,
    pub field: String,
}

impl EducationMatch {
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.degree, &self.connector, &self.field)
    }
}

pub struct PatternExtractor {
    experience_regex: Regex,
    education_regex: Regex,
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternExtractor {
    pub fn new() -> Self {
        let experience_regex = Regex::new(r"(?i)\b(\d{1,2}\+?\s?years?|\d{1,2}\+?\s?yrs?)\b")
            .expect("Invalid experience regex");

        // Degree keyword is case-insensitive, the field must start upper-case and stays on one line.
        // Up to three lowercase or parenthesised words may sit between the degree and the
        // connector ("degree", "(M.S.)"); the lazy gap lets "in"/"of" bind as the connector.
        let education_regex = Regex::new(concat!(
            r"\b(?i:(Bachelor|Master|Ph\.?D|B\.?S|M\.?S|Diploma))(?:['’]?s)?\b\.?",
            r"(?:[ \t]+(?:[a-z]+|\([^()\n]{1,20}\))){0,3}?",
            r"[,:]?[ \t]+(?:(?i:(in|of))[ \t]+)?",
            r"([A-Z][a-zA-Z]*(?:[ \t]+(?:[a-zA-Z]+|\([^()\n]{1,20}\)))*)",
        ))
        .expect("Invalid education regex");

        Self {
            experience_regex,
            education_regex,
        }
    }

    /// Every duration phrase, left to right, duplicates kept
    pub fn experience(&self, text: &str) -> Vec<String> {
        self.experience_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Every degree mention, left to right, duplicates kept
    pub fn education(&self, text: &str) -> Vec<EducationMatch> {
        self.education_regex
            .captures_iter(text)
            .map(|cap| EducationMatch {
                degree: cap.get(1).map_or("", |m| m.as_str()).to_string(),
                connector: cap.get(2).map_or("", |m| m.as_str()).to_string(),
                field: cap.get(3).map_or("", |m| m.as_str()).to_string(),
            })
            .collect()
    }
}
