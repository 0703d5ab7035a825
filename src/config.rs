//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models: ModelConfig,
    pub recognizer: RecognizerConfig,
    pub processing: ProcessingConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub ner_repo_id: String,
    pub device: DevicePreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    Auto,
    Cpu,
    Cuda,
    Metal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub use_statistical_model: bool,
    pub use_skill_gazetteer: bool,
    pub extra_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub max_document_bytes: usize,
    pub ner_window_tokens: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub scorer: ScorerKind,
    pub improvement_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    Tfidf,
    TokenOverlap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-analyzer")
            .join("models");

        Self {
            models_dir,
            ner_repo_id: "dslim/bert-base-NER".to_string(),
            device: DevicePreference::Auto,
        }
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            use_statistical_model: true,
            use_skill_gazetteer: true,
            extra_skills: Vec::new(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 10 * 1024 * 1024,
            ner_window_tokens: 512,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::Tfidf,
            improvement_threshold: 70.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    /// Local directory holding the downloaded NER model
    pub fn ner_model_dir(&self) -> PathBuf {
        self.models.models_dir.join(self.models.ner_repo_id.replace('/', "--"))
    }

    fn validate(&self) -> Result<()> {
        // [CLS] and [SEP] take two positions of every window
        if self.processing.ner_window_tokens < 3 {
            return Err(ResumeAnalyzerError::Configuration(
                "processing.ner_window_tokens must be at least 3".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.scoring.improvement_threshold) {
            return Err(ResumeAnalyzerError::Configuration(
                "scoring.improvement_threshold must be within 0..=100".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [scoring]
            scorer = "token_overlap"
            "#,
        )
        .unwrap();

        assert_eq!(config.scoring.scorer, ScorerKind::TokenOverlap);
        assert_eq!(config.scoring.improvement_threshold, 70.0);
        assert!(config.recognizer.use_skill_gazetteer);
        assert_eq!(config.processing.ner_window_tokens, 512);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_invalid_window_rejected() {
        let result = Config::from_toml("[processing]\nner_window_tokens = 2\n");
        assert!(matches!(result, Err(ResumeAnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_ner_model_dir_is_flattened() {
        let config = Config::default();
        let dir = config.ner_model_dir();
        assert!(dir.ends_with("dslim--bert-base-NER"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.recognizer.extra_skills = vec!["Haskell".to_string()];
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.recognizer.extra_skills, vec!["Haskell".to_string()]);
    }
}
