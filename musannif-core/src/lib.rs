//! Naive Bayes Classification Core
//!
//! Multinomial Naive Bayes over the Arabic preprocessing pipeline:
//! training from labeled documents, smoothed log-probability scoring,
//! and evaluation metrics over held-out corpora.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod eval;
mod model;
mod service;

pub use eval::{evaluate, EvaluationMetrics, MacroAverages};
pub use model::NaiveBayesClassifier;
pub use service::ClassifierService;

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("model has not been trained yet")]
    NotTrained,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// A labeled document, consumed once by training or evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingDocument {
    pub category: String,
    pub content: String,
    /// Source path recorded by the loader, for diagnostics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl TrainingDocument {
    pub fn new(category: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            content: content.into(),
            path: None,
        }
    }
}

/// Outcome of a single classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub predicted_category: String,
    /// Probability assigned to the predicted category, in [0, 1].
    pub confidence: f64,
    /// Per-category probabilities, summing to 1.0.
    pub probabilities: BTreeMap<String, f64>,
    /// Number of stems in the query, duplicates included.
    pub total_tokens: usize,
    /// Number of distinct stems in the query.
    pub unique_tokens: usize,
}

/// Read-only snapshot of a model's trained state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelStats {
    pub trained: bool,
    pub total_documents: usize,
    pub vocabulary_size: usize,
    pub categories: Vec<String>,
    pub documents_per_category: BTreeMap<String, usize>,
    pub words_per_category: BTreeMap<String, usize>,
}
