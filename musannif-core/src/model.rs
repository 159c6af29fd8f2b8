//! Multinomial Naive Bayes Model
//!
//! Per-category document and stem counts with Laplace-smoothed log-space
//! scoring. Training fully rewrites the count tables; classification only
//! reads them.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{info, warn};

use musannif_analyzer::ArabicPipeline;

use crate::{ClassificationResult, ClassifierError, ModelStats, TrainingDocument};

/// Naive Bayes classifier over the Arabic preprocessing pipeline.
///
/// The classifier exclusively owns its count tables. `train` discards all
/// prior state and rebuilds from the supplied corpus; there is no
/// incremental update path. Callers mixing concurrent `train` and
/// `classify` must serialize access externally (see [`ClassifierService`]).
///
/// Category maps are `BTreeMap`, so category iteration is always in
/// lexicographic order: score ties and the default result for empty
/// queries resolve to the smallest category name.
///
/// [`ClassifierService`]: crate::ClassifierService
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    pipeline: ArabicPipeline,
    category_doc_count: BTreeMap<String, usize>,
    category_word_count: BTreeMap<String, HashMap<String, usize>>,
    category_total_words: BTreeMap<String, usize>,
    vocabulary: HashSet<String>,
    total_documents: usize,
    trained: bool,
}

impl NaiveBayesClassifier {
    /// Create an untrained classifier.
    pub fn new(pipeline: ArabicPipeline) -> Self {
        Self {
            pipeline,
            category_doc_count: BTreeMap::new(),
            category_word_count: BTreeMap::new(),
            category_total_words: BTreeMap::new(),
            vocabulary: HashSet::new(),
            total_documents: 0,
            trained: false,
        }
    }

    /// Get the preprocessing pipeline.
    pub fn pipeline(&self) -> &ArabicPipeline {
        &self.pipeline
    }

    /// Whether a successful `train` call has completed.
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Train the model from scratch on the supplied corpus.
    ///
    /// Any previously trained state is discarded first. Documents whose
    /// preprocessing yields no stems are skipped with a warning and do not
    /// count towards any total. An empty corpus is legal and produces a
    /// model with zero categories, which `classify` rejects as untrained.
    pub fn train(&mut self, documents: &[TrainingDocument]) -> Result<(), ClassifierError> {
        if let Some(doc) = documents.iter().find(|doc| doc.category.is_empty()) {
            return Err(ClassifierError::InvalidInput(format!(
                "training document with empty category (content starts {:?})",
                doc.content.chars().take(20).collect::<String>()
            )));
        }

        self.reset();

        let mut skipped = 0usize;
        for doc in documents {
            let stems = self.pipeline.preprocess(&doc.content);
            if stems.is_empty() {
                warn!("skipping empty document for category {:?}", doc.category);
                skipped += 1;
                continue;
            }

            *self.category_doc_count.entry(doc.category.clone()).or_insert(0) += 1;
            let word_counts = self.category_word_count.entry(doc.category.clone()).or_default();
            let total_words = self.category_total_words.entry(doc.category.clone()).or_insert(0);

            for stem in stems {
                *word_counts.entry(stem.clone()).or_insert(0) += 1;
                *total_words += 1;
                self.vocabulary.insert(stem);
            }

            self.total_documents += 1;
        }

        self.trained = true;
        info!(
            "training complete: {} documents ({} skipped), {} categories, vocabulary of {} stems",
            self.total_documents,
            skipped,
            self.category_doc_count.len(),
            self.vocabulary.len()
        );

        Ok(())
    }

    /// Classify a text.
    ///
    /// Fails with [`ClassifierError::NotTrained`] before a successful
    /// `train` call, or when training saw no usable documents. A query
    /// whose preprocessing yields no stems gets a uniform-probability
    /// default result instead of an error.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        if !self.trained || self.category_doc_count.is_empty() {
            return Err(ClassifierError::NotTrained);
        }

        let stems = self.pipeline.preprocess(text);
        if stems.is_empty() {
            return Ok(self.default_result());
        }

        let mut scores: Vec<(String, f64)> = Vec::with_capacity(self.category_doc_count.len());
        for category in self.category_doc_count.keys() {
            scores.push((category.clone(), self.log_score(category, &stems)));
        }

        // Strictly-greater comparison over sorted categories: ties go to
        // the lexicographically smallest name.
        let mut predicted = scores[0].0.clone();
        let mut best_score = scores[0].1;
        for (category, score) in scores.iter().skip(1) {
            if *score > best_score {
                predicted = category.clone();
                best_score = *score;
            }
        }

        let probabilities = normalize_log_scores(scores);
        let confidence = probabilities.get(&predicted).copied().unwrap_or(0.0);
        let unique_tokens = stems.iter().collect::<HashSet<_>>().len();

        Ok(ClassificationResult {
            predicted_category: predicted,
            confidence,
            probabilities,
            total_tokens: stems.len(),
            unique_tokens,
        })
    }

    /// Log prior plus add-one-smoothed log likelihood of the stems.
    ///
    /// Stems outside the vocabulary still contribute through the smoothed
    /// formula with count zero; they are never skipped.
    fn log_score(&self, category: &str, stems: &[String]) -> f64 {
        let doc_count = self.category_doc_count.get(category).copied().unwrap_or(0);
        let mut score = (doc_count as f64 / self.total_documents as f64).ln();

        let word_counts = self.category_word_count.get(category);
        let total_words = self.category_total_words.get(category).copied().unwrap_or(0);
        let denominator = (total_words + self.vocabulary.len()) as f64;

        for stem in stems {
            let count = word_counts
                .and_then(|counts| counts.get(stem))
                .copied()
                .unwrap_or(0);
            score += ((count + 1) as f64 / denominator).ln();
        }

        score
    }

    /// Uniform result for queries with no usable stems: the first category
    /// in sorted order wins with probability `1 / |categories|`.
    fn default_result(&self) -> ClassificationResult {
        let uniform = 1.0 / self.category_doc_count.len() as f64;
        let probabilities: BTreeMap<String, f64> = self
            .category_doc_count
            .keys()
            .map(|category| (category.clone(), uniform))
            .collect();
        let predicted = self
            .category_doc_count
            .keys()
            .next()
            .cloned()
            .unwrap_or_default();

        ClassificationResult {
            predicted_category: predicted,
            confidence: uniform,
            probabilities,
            total_tokens: 0,
            unique_tokens: 0,
        }
    }

    /// Read-only snapshot of the trained state.
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            trained: self.trained,
            total_documents: self.total_documents,
            vocabulary_size: self.vocabulary.len(),
            categories: self.category_doc_count.keys().cloned().collect(),
            documents_per_category: self.category_doc_count.clone(),
            words_per_category: self.category_total_words.clone(),
        }
    }

    /// Per-category prior probabilities. Empty before training.
    pub fn priors(&self) -> BTreeMap<String, f64> {
        if self.total_documents == 0 {
            return BTreeMap::new();
        }
        self.category_doc_count
            .iter()
            .map(|(category, count)| {
                (category.clone(), *count as f64 / self.total_documents as f64)
            })
            .collect()
    }

    fn reset(&mut self) {
        self.category_doc_count.clear();
        self.category_word_count.clear();
        self.category_total_words.clear();
        self.vocabulary.clear();
        self.total_documents = 0;
        self.trained = false;
    }
}

/// Max-shift the log scores before exponentiating, then normalize to a
/// distribution summing to 1.0. The shift keeps long documents from
/// underflowing to zero across the board.
fn normalize_log_scores(scores: Vec<(String, f64)>) -> BTreeMap<String, f64> {
    let max_score = scores
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);

    let exponentiated: Vec<(String, f64)> = scores
        .into_iter()
        .map(|(category, score)| (category, (score - max_score).exp()))
        .collect();
    let sum: f64 = exponentiated.iter().map(|(_, value)| value).sum();

    exponentiated
        .into_iter()
        .map(|(category, value)| (category, value / sum))
        .collect()
}
