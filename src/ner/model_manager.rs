//! NER model download and local model directory management

use crate::error::{Result, ResumeAnalyzerError};
use crate::ner::bert::REQUIRED_FILES;
use hf_hub::api::tokio::Api;
use log::info;
use std::path::PathBuf;
use tokio::fs;

/// Status of the local copy of a model
#[derive(Debug, Clone, PartialEq)]
pub struct LocalModelInfo {
    pub repo_id: String,
    pub path: PathBuf,
    pub missing_files: Vec<String>,
    pub size_bytes: u64,
}

impl LocalModelInfo {
    pub fn is_complete(&self) -> bool {
        self.missing_files.is_empty()
    }
}

pub struct ModelManager {
    repo_id: String,
    model_dir: PathBuf,
}

impl ModelManager {
    pub fn new(repo_id: impl Into<String>, model_dir: PathBuf) -> Self {
        Self {
            repo_id: repo_id.into(),
            model_dir,
        }
    }

    /// Inspect the local model directory
    pub async fn info(&self) -> Result<LocalModelInfo> {
        let mut missing_files = Vec::new();
        let mut size_bytes = 0;

        for file in REQUIRED_FILES {
            match fs::metadata(self.model_dir.join(file)).await {
                Ok(meta) => size_bytes += meta.len(),
                Err(_) => missing_files.push(file.to_string()),
            }
        }

        Ok(LocalModelInfo {
            repo_id: self.repo_id.clone(),
            path: self.model_dir.clone(),
            missing_files,
            size_bytes,
        })
    }

    /// Download the model files from the Hugging Face Hub into the model directory
    pub async fn download(&self, force: bool) -> Result<PathBuf> {
        if !force && self.info().await?.is_complete() {
            info!("Model already present at {}", self.model_dir.display());
            return Ok(self.model_dir.clone());
        }

        fs::create_dir_all(&self.model_dir).await.map_err(|e| {
            ResumeAnalyzerError::ModelUnavailable(format!("Failed to create model directory: {}", e))
        })?;

        let api = Api::new()
            .map_err(|e| ResumeAnalyzerError::ModelUnavailable(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.repo(hf_hub::Repo::model(self.repo_id.clone()));

        for file in REQUIRED_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                ResumeAnalyzerError::ModelUnavailable(format!("Failed to download {} from {}: {}", file, self.repo_id, e))
            })?;

            fs::copy(&cached, self.model_dir.join(file)).await.map_err(|e| {
                ResumeAnalyzerError::ModelUnavailable(format!("Failed to copy {}: {}", file, e))
            })?;
            info!("Downloaded {}", file);
        }

        Ok(self.model_dir.clone())
    }
}
