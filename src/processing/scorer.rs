//! Résumé / job description compatibility scoring

use crate::config::ScorerKind;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Percentage in `[0, 100]`, rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatibilityScore(f64);

impl CompatibilityScore {
    /// Scale a `[0, 1]` similarity to a rounded percentage
    pub fn from_similarity(similarity: f64) -> Self {
        let similarity = if similarity.is_finite() {
            similarity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self((similarity * 100.0 * 100.0).round() / 100.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_below(&self, threshold: f64) -> bool {
        self.0 < threshold
    }
}

impl fmt::Display for CompatibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

pub trait SimilarityScorer: Send + Sync {
    fn score(&self, text_a: &str, text_b: &str) -> CompatibilityScore;

    fn name(&self) -> &'static str;
}

pub fn scorer_for(kind: ScorerKind) -> Box<dyn SimilarityScorer> {
    match kind {
        ScorerKind::Tfidf => Box::new(TfidfScorer::new()),
        ScorerKind::TokenOverlap => Box::new(TokenOverlapScorer::new()),
    }
}

/// TF-IDF over exactly the two input documents, cosine similarity of the vectors
pub struct TfidfScorer {
    processor: TextProcessor,
}

impl Default for TfidfScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfScorer {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    /// L2-normalised tf * smoothed-idf vectors for both documents
    fn vectorize<'a>(&self, docs: [&'a [String]; 2]) -> [HashMap<&'a str, f64>; 2] {
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for tokens in docs {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = docs.len() as f64;
        docs.map(|tokens| {
            let mut vector: HashMap<&str, f64> = HashMap::new();
            for term in tokens {
                *vector.entry(term.as_str()).or_insert(0.0) += 1.0;
            }
            for (term, weight) in vector.iter_mut() {
                let df = document_frequency[term] as f64;
                *weight *= ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
            }

            let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for weight in vector.values_mut() {
                    *weight /= norm;
                }
            }
            vector
        })
    }

    /// Cosine similarity in `[0, 1]`; a zero vector on either side gives 0
    pub fn cosine_similarity(&self, text_a: &str, text_b: &str) -> f64 {
        let tokens_a = self.processor.tokenize(text_a);
        let tokens_b = self.processor.tokenize(text_b);
        if tokens_a.is_empty() || tokens_b.is_empty() {
            return 0.0;
        }

        let [vec_a, vec_b] = self.vectorize([tokens_a.as_slice(), tokens_b.as_slice()]);
        vec_a
            .iter()
            .filter_map(|(term, weight)| vec_b.get(term).map(|other| weight * other))
            .sum()
    }
}

impl SimilarityScorer for TfidfScorer {
    fn score(&self, text_a: &str, text_b: &str) -> CompatibilityScore {
        CompatibilityScore::from_similarity(self.cosine_similarity(text_a, text_b))
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

/// Jaccard overlap of the two stop-word-filtered vocabularies
pub struct TokenOverlapScorer {
    processor: TextProcessor,
}

impl Default for TokenOverlapScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenOverlapScorer {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }
}

impl SimilarityScorer for TokenOverlapScorer {
    fn score(&self, text_a: &str, text_b: &str) -> CompatibilityScore {
        CompatibilityScore::from_similarity(self.processor.text_similarity(text_a, text_b))
    }

    fn name(&self) -> &'static str {
        "token_overlap"
    }
}
