//! Arabic Text Analysis
//!
//! Lightweight preprocessing for Arabic document classification:
//! - Tokenization over the Arabic Unicode block
//! - Configurable stop words with a built-in fallback list
//! - Heuristic light stemming (suffix stripping)

mod pipeline;
mod stemmer;
mod stop_words;
mod tokenizer;

pub use pipeline::{ArabicPipeline, PipelineStats};
pub use stemmer::LightStemmer;
pub use stop_words::{StopWords, DEFAULT_ARABIC_STOP_WORDS};
pub use tokenizer::ArabicTokenizer;
