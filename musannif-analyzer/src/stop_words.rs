//! Configurable Stop Words
//!
//! Membership set for high-frequency Arabic function words, loadable from
//! a newline-delimited file with a built-in fallback list.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

/// Built-in Arabic stop words, used when no stop-word file is available.
pub static DEFAULT_ARABIC_STOP_WORDS: &[&str] = &[
    // Definite article forms
    "ال", "الـ",
    // Pronouns
    "هو", "هي", "هم", "هن", "أنت", "أنتم", "أنتن", "أنا", "نحن",
    // Demonstratives
    "هذا", "هذه", "ذلك", "تلك", "هؤلاء", "أولئك",
    // Prepositions
    "في", "من", "إلى", "على", "عن", "مع", "ب", "ل", "ك",
    // Conjunctions and negation particles
    "و", "أو", "لكن", "ثم", "أم", "إما", "لا",
    // Auxiliary verbs and tense particles
    "كان", "يكون", "ليس", "قد", "لم", "لن",
    // Question words
    "ما", "ماذا", "متى", "أين", "كيف", "لماذا", "هل",
    // Quantifiers and other function words
    "كل", "بعض", "غير", "عند", "حتى", "بين", "أن", "إن",
    // Relative pronouns
    "التي", "الذي", "اللذان", "اللتان", "الذين", "اللاتي",
];

/// Stop-word collection.
///
/// Loaded once at service initialization and immutable afterwards; none of
/// the query methods mutate the set.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::arabic()
    }
}

impl StopWords {
    /// Create an empty collection.
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Create from a slice of words.
    pub fn from_slice(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create with the built-in Arabic stop words.
    pub fn arabic() -> Self {
        Self::from_slice(DEFAULT_ARABIC_STOP_WORDS)
    }

    /// Load stop words from a file, one word per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let content = fs::read_to_string(path)?;
        let words: HashSet<String> = content
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|s| s.to_string())
            .collect();

        Ok(Self { words })
    }

    /// Load from a file when one is given, falling back to the built-in
    /// Arabic list when the path is absent or unreadable. Load failures are
    /// logged, never surfaced to the caller.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::from_file(path) {
                Ok(words) => {
                    info!("loaded {} stop words from {:?}", words.len(), path);
                    words
                }
                Err(err) => {
                    warn!(
                        "failed to read stop-word file {:?}, using built-in list: {}",
                        path, err
                    );
                    Self::arabic()
                }
            },
            None => Self::arabic(),
        }
    }

    /// Check if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Filter stop words out of a token sequence, preserving order.
    pub fn filter(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|token| !self.contains(token))
            .cloned()
            .collect()
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
