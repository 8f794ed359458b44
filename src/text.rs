//! Sentence and word segmentation
//!
//! Deliberately naive. Sentences are whatever sits between literal `.`
//! characters, so abbreviations ("Dr."), decimals ("3.5") and ellipses all
//! produce extra segments. The metrics are calibrated against this behaviour,
//! so don't make it smarter without re-checking the fact density numbers.

/// Split text into sentences on `.`.
///
/// Empty input yields no sentences. Otherwise every segment is kept,
/// including the empty one after a trailing period.
pub fn sentences(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('.').collect()
}

/// Split text into words on runs of whitespace.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Words lower-cased for dictionary lookups.
pub fn folded_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(sentences("").is_empty());
        assert!(words("").is_empty());
        assert!(words("   \n\t ").is_empty());
        assert!(folded_words("").is_empty());
    }

    #[test]
    fn test_sentences_keep_trailing_segment() {
        assert_eq!(
            sentences("I have 3 cats. I like cats."),
            vec!["I have 3 cats", " I like cats", ""]
        );
    }

    #[test]
    fn test_sentences_split_decimals() {
        // Known limitation: decimals are sentence boundaries too
        assert_eq!(sentences("Pi is 3.14"), vec!["Pi is 3", "14"]);
    }

    #[test]
    fn test_whitespace_only_is_one_sentence() {
        assert_eq!(sentences("   "), vec!["   "]);
    }

    #[test]
    fn test_words_collapse_whitespace() {
        assert_eq!(words("  one\ttwo \n three  "), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_folded_words_keep_punctuation() {
        assert_eq!(folded_words("The BEST, day!"), vec!["the", "best,", "day!"]);
    }
}
