//! Arabic Light Stemming
//!
//! Strips at most one trailing morphological suffix per token using a
//! fixed, ordered rule list. Deliberately heuristic: no root extraction,
//! no pattern analysis.

/// Candidate suffixes, most specific first. Order is significant: the
/// first match wins and at most one suffix is removed.
static SUFFIXES: &[&str] = &[
    // Plural and dual endings
    "ون", "ين", "ات", "ان",
    // Attached pronouns
    "ها", "هم", "هن", "كم", "كن", "ني",
    // Single-letter endings
    "ه", "ة", "ي",
];

/// Suffix-stripping stemmer for Arabic tokens.
#[derive(Debug, Default, Clone)]
pub struct LightStemmer;

impl LightStemmer {
    /// Create a new stemmer.
    pub fn new() -> Self {
        Self
    }

    /// Stem a single token.
    ///
    /// A suffix is only stripped when the token is strictly longer than the
    /// suffix length plus two characters, so the surviving stem keeps at
    /// least three characters. Tokens matching no rule pass through
    /// unchanged.
    pub fn stem(&self, token: &str) -> String {
        let token_len = token.chars().count();

        for suffix in SUFFIXES {
            let suffix_len = suffix.chars().count();
            if token_len > suffix_len + 2 && token.ends_with(suffix) {
                return token
                    .chars()
                    .take(token_len - suffix_len)
                    .collect();
            }
        }

        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_plural_suffix() {
        let stemmer = LightStemmer::new();
        // 8 chars ending in ون
        assert_eq!(stemmer.stem("اللاعبون"), "اللاعب");
    }

    #[test]
    fn strips_taa_marbuta() {
        let stemmer = LightStemmer::new();
        assert_eq!(stemmer.stem("مدرسة"), "مدرس");
        assert_eq!(stemmer.stem("رياضة"), "رياض");
    }

    #[test]
    fn short_token_passes_through() {
        let stemmer = LightStemmer::new();
        // 3 chars ending in ة: 3 is not > 1 + 2, so no strip
        assert_eq!(stemmer.stem("كرة"), "كرة");
        // 4 chars ending in ها: 4 is not > 2 + 2
        assert_eq!(stemmer.stem("بيها"), "بيها");
    }

    #[test]
    fn no_matching_suffix_passes_through() {
        let stemmer = LightStemmer::new();
        assert_eq!(stemmer.stem("القدم"), "القدم");
        assert_eq!(stemmer.stem("وزير"), "وزير");
    }

    #[test]
    fn first_match_wins_and_only_one_suffix_is_removed() {
        let stemmer = LightStemmer::new();
        // كتابها ends in ها; strips to كتاب, which still ends in a rule
        // letter but is not stripped again
        assert_eq!(stemmer.stem("كتابها"), "كتاب");
        // معلمات ends in ات before the single-letter rules are reached
        assert_eq!(stemmer.stem("معلمات"), "معلم");
    }

    #[test]
    fn boundary_length_is_exclusive() {
        let stemmer = LightStemmer::new();
        // 5 chars ending in a 2-char suffix: 5 > 4, stripped
        assert_eq!(stemmer.stem("كتبها"), "كتب");
        // 4 chars ending in a 1-char suffix: 4 > 3, stripped
        assert_eq!(stemmer.stem("دولة"), "دول");
    }
}
