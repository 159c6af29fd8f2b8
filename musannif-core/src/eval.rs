//! Evaluation Engine
//!
//! Runs a trained classifier against labeled held-out documents and
//! aggregates accuracy, per-category precision/recall/F1, and a confusion
//! matrix over the sorted true-label set.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ClassifierError, NaiveBayesClassifier, TrainingDocument};

/// Aggregated evaluation metrics over a labeled test set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationMetrics {
    /// Fraction of exact matches across all test documents.
    pub accuracy: f64,
    pub precision: BTreeMap<String, f64>,
    pub recall: BTreeMap<String, f64>,
    pub f1_score: BTreeMap<String, f64>,
    /// `confusion_matrix[i][j]` counts documents whose true category is
    /// `categories[i]` and predicted category is `categories[j]`.
    pub confusion_matrix: Vec<Vec<usize>>,
    /// Sorted set of true labels observed in the test set.
    pub categories: Vec<String>,
}

/// Unweighted per-category means.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MacroAverages {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl EvaluationMetrics {
    /// Macro-averaged precision, recall, and F1 across categories.
    pub fn macro_avg(&self) -> MacroAverages {
        let count = self.categories.len() as f64;
        MacroAverages {
            precision: self.precision.values().sum::<f64>() / count,
            recall: self.recall.values().sum::<f64>() / count,
            f1_score: self.f1_score.values().sum::<f64>() / count,
        }
    }
}

/// Evaluate a trained model against labeled test documents.
///
/// True labels are taken from the test set, not restricted to the model's
/// trained categories; a prediction outside the true-label set still
/// counts as a miss for its true category but has no confusion-matrix
/// column. Zero denominators yield 0.0, never NaN. Fails with
/// [`ClassifierError::InvalidInput`] on an empty test set and propagates
/// [`ClassifierError::NotTrained`] from classification.
pub fn evaluate(
    model: &NaiveBayesClassifier,
    test_documents: &[TrainingDocument],
) -> Result<EvaluationMetrics, ClassifierError> {
    if test_documents.is_empty() {
        return Err(ClassifierError::InvalidInput(
            "evaluation requires a non-empty test set".to_string(),
        ));
    }

    // Classification is read-only on the model, so the held-out documents
    // are scored in parallel; collect preserves input order.
    let pairs: Vec<(String, String)> = test_documents
        .par_iter()
        .map(|doc| {
            model
                .classify(&doc.content)
                .map(|result| (doc.category.clone(), result.predicted_category))
        })
        .collect::<Result<_, _>>()?;

    let categories: Vec<String> = pairs
        .iter()
        .map(|(truth, _)| truth.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| (category.as_str(), i))
        .collect();

    let n = categories.len();
    let mut confusion_matrix = vec![vec![0usize; n]; n];
    let mut true_positives = vec![0usize; n];
    let mut false_positives = vec![0usize; n];
    let mut false_negatives = vec![0usize; n];

    for (truth, predicted) in &pairs {
        let i = index[truth.as_str()];
        if let Some(&j) = index.get(predicted.as_str()) {
            confusion_matrix[i][j] += 1;
        }
        if truth == predicted {
            true_positives[i] += 1;
        } else {
            false_negatives[i] += 1;
            if let Some(&j) = index.get(predicted.as_str()) {
                false_positives[j] += 1;
            }
        }
    }

    let matches: usize = true_positives.iter().sum();
    let accuracy = matches as f64 / pairs.len() as f64;

    let mut precision = BTreeMap::new();
    let mut recall = BTreeMap::new();
    let mut f1_score = BTreeMap::new();
    for (i, category) in categories.iter().enumerate() {
        let p = ratio(true_positives[i], true_positives[i] + false_positives[i]);
        let r = ratio(true_positives[i], true_positives[i] + false_negatives[i]);
        let f1 = if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 };
        precision.insert(category.clone(), p);
        recall.insert(category.clone(), r);
        f1_score.insert(category.clone(), f1);
    }

    info!(
        "evaluated {} documents across {} categories: accuracy {:.4}",
        pairs.len(),
        n,
        accuracy
    );

    Ok(EvaluationMetrics {
        accuracy,
        precision,
        recall,
        f1_score,
        confusion_matrix,
        categories,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
