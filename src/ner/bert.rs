//! Pretrained BERT token-classification NER running on candle

use crate::config::DevicePreference;
use crate::error::{Result, ResumeAnalyzerError};
use crate::ner::{EntityLabel, EntityRecognizer, RecognizedEntity};
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tokenizers::Tokenizer;

pub const REQUIRED_FILES: [&str; 3] = ["config.json", "tokenizer.json", "model.safetensors"];

/// The parts of config.json the BERT config itself does not expose
#[derive(Debug, Deserialize)]
struct ClassifierConfig {
    hidden_size: usize,
    id2label: HashMap<String, String>,
}

pub struct BertNerModel {
    model: BertModel,
    classifier: Linear,
    tokenizer: Tokenizer,
    id2label: Vec<String>,
    device: Device,
    window_tokens: usize,
    cls_id: u32,
    sep_id: u32,
}

/// Pick a device, honouring `RESUME_ANALYZER_DEVICE` over the configured preference
pub fn select_device(preference: DevicePreference) -> Result<Device> {
    let preference = match std::env::var("RESUME_ANALYZER_DEVICE") {
        Ok(value) => match value.to_lowercase().as_str() {
            "cpu" => DevicePreference::Cpu,
            "cuda" => DevicePreference::Cuda,
            "metal" => DevicePreference::Metal,
            _ => preference,
        },
        Err(_) => preference,
    };

    match preference {
        DevicePreference::Cpu => Ok(Device::Cpu),
        DevicePreference::Cuda => {
            #[cfg(feature = "cuda")]
            {
                Device::new_cuda(0).map_err(|e| {
                    ResumeAnalyzerError::ModelUnavailable(format!("Failed to initialize CUDA: {}", e))
                })
            }
            #[cfg(not(feature = "cuda"))]
            {
                Err(ResumeAnalyzerError::ModelUnavailable(
                    "CUDA support not compiled in".to_string(),
                ))
            }
        }
        DevicePreference::Metal => {
            #[cfg(feature = "metal")]
            {
                Device::new_metal(0).map_err(|e| {
                    ResumeAnalyzerError::ModelUnavailable(format!("Failed to initialize Metal: {}", e))
                })
            }
            #[cfg(not(feature = "metal"))]
            {
                Err(ResumeAnalyzerError::ModelUnavailable(
                    "Metal support not compiled in".to_string(),
                ))
            }
        }
        DevicePreference::Auto => {
            #[cfg(feature = "cuda")]
            {
                if let Ok(device) = Device::new_cuda(0) {
                    return Ok(device);
                }
            }
            #[cfg(feature = "metal")]
            {
                if let Ok(device) = Device::new_metal(0) {
                    return Ok(device);
                }
            }
            Ok(Device::Cpu)
        }
    }
}

fn unavailable(what: &str, e: impl std::fmt::Display) -> ResumeAnalyzerError {
    ResumeAnalyzerError::ModelUnavailable(format!("{}: {}", what, e))
}

impl BertNerModel {
    /// Load tokenizer, config and weights from a local model directory.
    /// Every failure here is reported as [`ResumeAnalyzerError::ModelUnavailable`].
    pub fn load(model_dir: &Path, device: Device, window_tokens: usize) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading NER model from: {}", model_dir.display());

        for file in REQUIRED_FILES {
            if !model_dir.join(file).exists() {
                return Err(ResumeAnalyzerError::ModelUnavailable(format!(
                    "{} missing in {} (run `resume-analyzer models download`)",
                    file,
                    model_dir.display()
                )));
            }
        }

        let tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| unavailable("Failed to load tokenizer", e))?;

        let raw_config = std::fs::read_to_string(model_dir.join("config.json"))
            .map_err(|e| unavailable("Failed to read model config", e))?;
        let bert_config: BertConfig =
            serde_json::from_str(&raw_config).map_err(|e| unavailable("Failed to parse model config", e))?;
        let classifier_config: ClassifierConfig =
            serde_json::from_str(&raw_config).map_err(|e| unavailable("Model config has no label map", e))?;

        let id2label = Self::ordered_labels(&classifier_config.id2label)?;

        let weights = model_dir.join("model.safetensors");
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, &device) }
            .map_err(|e| unavailable("Failed to load weights", e))?;

        // Token classification checkpoints nest the encoder under "bert."
        let model = BertModel::load(vb.pp("bert"), &bert_config)
            .or_else(|_| BertModel::load(vb.clone(), &bert_config))
            .map_err(|e| unavailable("Failed to build BERT encoder", e))?;
        let classifier = candle_nn::linear(classifier_config.hidden_size, id2label.len(), vb.pp("classifier"))
            .map_err(|e| unavailable("Failed to build classifier head", e))?;

        let cls_id = tokenizer
            .token_to_id("[CLS]")
            .ok_or_else(|| unavailable("Tokenizer", "no [CLS] token"))?;
        let sep_id = tokenizer
            .token_to_id("[SEP]")
            .ok_or_else(|| unavailable("Tokenizer", "no [SEP] token"))?;

        info!(
            "NER model loaded in {:.2?} ({} labels)",
            start_time.elapsed(),
            id2label.len()
        );

        Ok(Self {
            model,
            classifier,
            tokenizer,
            id2label,
            device,
            window_tokens,
            cls_id,
            sep_id,
        })
    }

    fn ordered_labels(id2label: &HashMap<String, String>) -> Result<Vec<String>> {
        let mut indexed = id2label
            .iter()
            .map(|(id, label)| {
                id.parse::<usize>()
                    .map(|id| (id, label.clone()))
                    .map_err(|e| unavailable("Bad label id", e))
            })
            .collect::<Result<Vec<_>>>()?;
        indexed.sort_by_key(|(id, _)| *id);

        if indexed.iter().enumerate().any(|(pos, (id, _))| pos != *id) {
            return Err(ResumeAnalyzerError::ModelUnavailable(
                "Label ids are not contiguous".to_string(),
            ));
        }

        Ok(indexed.into_iter().map(|(_, label)| label).collect())
    }

    /// Predict one tag per token for a window of token ids
    fn classify_window(&self, ids: &[u32]) -> Result<Vec<String>> {
        let mut input = Vec::with_capacity(ids.len() + 2);
        input.push(self.cls_id);
        input.extend_from_slice(ids);
        input.push(self.sep_id);

        let input_ids = Tensor::new(input.as_slice(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask = input_ids.ones_like()?;

        let hidden = self.model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let logits = self.classifier.forward(&hidden)?;
        let predictions = logits.argmax(D::Minus1)?.squeeze(0)?.to_vec1::<u32>()?;

        // Drop the [CLS] and [SEP] positions
        Ok(predictions[1..predictions.len() - 1]
            .iter()
            .map(|&p| self.id2label.get(p as usize).cloned().unwrap_or_else(|| "O".to_string()))
            .collect())
    }
}

impl EntityRecognizer for BertNerModel {
    fn extract_entities(&self, text: &str) -> Result<Vec<RecognizedEntity>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| ResumeAnalyzerError::Inference(format!("Tokenization failed: {}", e)))?;

        let ids = encoding.get_ids();
        let offsets = encoding.get_offsets();
        let window = self.window_tokens.saturating_sub(2).max(1);

        let mut tags = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(window) {
            tags.extend(self.classify_window(chunk)?);
        }
        debug!("Classified {} tokens in {} windows", ids.len(), ids.len().div_ceil(window));

        Ok(decode_entities(text, offsets, &tags))
    }

    fn name(&self) -> &str {
        "bert-ner"
    }
}

/// Merge BIO-tagged tokens into entity spans over `text`
pub fn decode_entities(text: &str, offsets: &[(usize, usize)], tags: &[String]) -> Vec<RecognizedEntity> {
    let mut entities = Vec::new();
    let mut current: Option<(String, usize, usize)> = None;

    let mut flush = |current: &mut Option<(String, usize, usize)>| {
        if let Some((tag, start, end)) = current.take() {
            if let Some(span) = text.get(start..end) {
                entities.push(RecognizedEntity {
                    text: span.to_string(),
                    label: EntityLabel::from_tag(&tag),
                    start,
                    end,
                });
            }
        }
    };

    for (&(start, end), tag) in offsets.iter().zip(tags) {
        if start == end {
            continue;
        }

        let (begins, kind) = match tag.split_once('-') {
            Some(("B", kind)) => (true, kind),
            Some((_, kind)) => (false, kind),
            None if tag == "O" => {
                flush(&mut current);
                continue;
            }
            None => (false, tag.as_str()),
        };

        match current.as_mut() {
            Some((current_kind, _, current_end)) if !begins && current_kind == kind => {
                *current_end = end;
            }
            _ => {
                flush(&mut current);
                current = Some((kind.to_string(), start, end));
            }
        }
    }
    flush(&mut current);

    entities
}
