//! Preprocessing Pipeline
//!
//! Composes tokenization, stop-word filtering, and stemming into a single
//! `text -> stems` function shared by training and classification.

use serde::Serialize;

use crate::stemmer::LightStemmer;
use crate::stop_words::StopWords;
use crate::tokenizer::ArabicTokenizer;

/// Read-only snapshot of the pipeline configuration.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    pub tokenizer: &'static str,
    pub stemmer: &'static str,
    pub stop_words: usize,
}

/// Arabic preprocessing pipeline.
///
/// Pure given a fixed stop-word set: the same text always yields the same
/// stem sequence.
#[derive(Debug, Clone)]
pub struct ArabicPipeline {
    tokenizer: ArabicTokenizer,
    stemmer: LightStemmer,
    stop_words: StopWords,
}

impl Default for ArabicPipeline {
    fn default() -> Self {
        Self::new(StopWords::arabic())
    }
}

impl ArabicPipeline {
    /// Create a pipeline with the given stop-word set.
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            tokenizer: ArabicTokenizer::new(),
            stemmer: LightStemmer::new(),
            stop_words,
        }
    }

    /// Replace the stop-word set.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Get the stop-word set.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Tokenize, drop stop words, and stem.
    ///
    /// Stop words contribute no stem; output order mirrors token order.
    /// Empty or non-Arabic input yields an empty vector, which callers
    /// must handle explicitly.
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| self.stemmer.stem(&token))
            .collect()
    }

    /// Snapshot of the pipeline configuration.
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            tokenizer: "arabic-block",
            stemmer: "light-suffix",
            stop_words: self.stop_words.len(),
        }
    }
}
