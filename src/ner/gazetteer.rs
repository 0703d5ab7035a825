//! Dictionary-based skill recognition

use crate::error::{Result, ResumeAnalyzerError};
use crate::ner::{EntityLabel, EntityRecognizer, RecognizedEntity};
use aho_corasick::{AhoCorasick, MatchKind};

/// Skill names that are also everyday English words ("react quickly",
/// "express interest"). These only match when written with a capital.
const AMBIGUOUS_SKILLS: &[&str] = &[
    "react", "express", "swift", "spark", "git", "bash", "jest", "rust",
];

/// Labels known skill terms as SKILL entities. Matching is ASCII
/// case-insensitive and whole-word; the entity text is the span as written.
pub struct SkillGazetteer {
    matcher: AhoCorasick,
    skills: Vec<String>,
}

impl SkillGazetteer {
    /// Create a gazetteer with the default skill database
    pub fn new() -> Result<Self> {
        Self::with_custom_skills(Vec::new())
    }

    /// Create a gazetteer with additional skills on top of the defaults
    pub fn with_custom_skills(additional_skills: Vec<String>) -> Result<Self> {
        let mut skills = Self::default_skill_database();
        skills.extend(
            additional_skills
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
        );
        skills.sort();
        skills.dedup();

        Self::from_terms(skills)
    }

    /// Build from exactly these terms
    pub fn from_terms(skills: Vec<String>) -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&skills)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { matcher, skills })
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    }

    fn is_capitalised_if_ambiguous(&self, pattern: usize, span: &str) -> bool {
        !AMBIGUOUS_SKILLS.contains(&self.skills[pattern].as_str())
            || span.chars().next().is_some_and(|c| c.is_uppercase())
    }

    fn default_tech_skills() -> Vec<&'static str> {
        vec![
            // Programming Languages
            "rust", "python", "javascript", "typescript", "java", "c++", "c#", "golang", "ruby",
            "php", "swift", "kotlin", "scala", "haskell", "clojure", "matlab", "sql",
            // Web Technologies
            "react", "vue", "angular", "svelte", "html", "css", "sass", "tailwind",
            "bootstrap", "jquery", "webpack", "babel", "node.js", "express",
            "next.js", "graphql", "grpc", "rest api",
            // Backend/Infrastructure
            "docker", "kubernetes", "aws", "azure", "gcp", "terraform", "ansible",
            "jenkins", "gitlab", "github actions", "ci/cd", "devops", "microservices",
            "redis", "elasticsearch", "nginx", "linux", "bash", "git",
            // Databases
            "postgresql", "mysql", "mongodb", "cassandra", "dynamodb", "sqlite", "neo4j",
            // Data Science/ML
            "machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn",
            "pandas", "numpy", "jupyter", "spark", "hadoop", "kafka", "airflow", "nlp",
            // Testing
            "jest", "pytest", "junit", "selenium", "cypress", "tdd",
        ]
    }

    fn default_soft_skills() -> Vec<&'static str> {
        vec![
            "leadership", "communication", "teamwork", "problem solving", "critical thinking",
            "time management", "project management", "mentoring", "negotiation",
            "agile", "scrum", "kanban",
        ]
    }

    fn default_skill_database() -> Vec<String> {
        Self::default_tech_skills()
            .into_iter()
            .chain(Self::default_soft_skills())
            .map(|s| s.to_string())
            .collect()
    }
}

impl EntityRecognizer for SkillGazetteer {
    fn extract_entities(&self, text: &str) -> Result<Vec<RecognizedEntity>> {
        let mut candidates: Vec<(usize, usize)> = self
            .matcher
            .find_overlapping_iter(text)
            .filter(|m| Self::is_word_boundary(text, m.start(), m.end()))
            .filter(|m| {
                self.is_capitalised_if_ambiguous(m.pattern().as_usize(), &text[m.start()..m.end()])
            })
            .map(|m| (m.start(), m.end()))
            .collect();

        // Leftmost, then longest
        candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut entities = Vec::new();
        let mut covered_until = 0;
        for (start, end) in candidates {
            if start < covered_until {
                continue;
            }
            entities.push(RecognizedEntity {
                text: text[start..end].to_string(),
                label: EntityLabel::Skill,
                start,
                end,
            });
            covered_until = end;
        }

        Ok(entities)
    }

    fn name(&self) -> &str {
        "skill-gazetteer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(entities: &[RecognizedEntity]) -> Vec<&str> {
        entities.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_gazetteer_creation() {
        let gazetteer = SkillGazetteer::new().unwrap();
        assert!(gazetteer.skill_count() > 50);
    }

    #[test]
    fn test_matches_keep_original_casing() {
        let gazetteer = SkillGazetteer::new().unwrap();
        let entities = gazetteer
            .extract_entities("Built services in Python and PostgreSQL with Docker.")
            .unwrap();

        assert_eq!(texts(&entities), vec!["Python", "PostgreSQL", "Docker"]);
        assert!(entities.iter().all(|e| e.label == EntityLabel::Skill));
    }

    #[test]
    fn test_whole_word_only() {
        let gazetteer = SkillGazetteer::new().unwrap();
        let entities = gazetteer.extract_entities("Trusted javascripter, Sparkling").unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn test_longest_match_wins() {
        let gazetteer = SkillGazetteer::new().unwrap();
        let entities = gazetteer.extract_entities("Interested in deep learning and Java.").unwrap();
        assert_eq!(texts(&entities), vec!["deep learning", "Java"]);
    }

    #[test]
    fn test_symbol_skills_and_custom_terms() {
        let gazetteer = SkillGazetteer::with_custom_skills(vec!["Zig".to_string()]).unwrap();
        let entities = gazetteer.extract_entities("C++, C# and zig.").unwrap();
        assert_eq!(texts(&entities), vec!["C++", "C#", "zig"]);
    }

    #[test]
    fn test_ambiguous_words_need_capitals() {
        let gazetteer = SkillGazetteer::new().unwrap();
        let entities = gazetteer
            .extract_entities("I react quickly and express interest in Spark, React and git hooks. Ran git via GIT.")
            .unwrap();
        assert_eq!(texts(&entities), vec!["Spark", "React", "GIT"]);
    }

    #[test]
    fn test_offsets_point_into_text() {
        let gazetteer = SkillGazetteer::new().unwrap();
        let text = "Résumé: Kubernetes";
        let entities = gazetteer.extract_entities(text).unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(&text[entities[0].start..entities[0].end], "Kubernetes");
    }
}
