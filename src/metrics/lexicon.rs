//! Word dictionaries for the bias and emotion metrics
//!
//! A lexicon maps a category name to a set of lower-case terms. The two
//! categories the metrics read are [`POLARIZING`] and [`EMOTIONAL`]; the user
//! config can replace either one or add new categories.

use rustc_hash::{FxHashMap, FxHashSet};

/// Category read by the bias metric
pub const POLARIZING: &str = "polarizing";
/// Category read by the emotional intensity metric
pub const EMOTIONAL: &str = "emotional";

const DEFAULT_POLARIZING: &[&str] = &[
    "best",
    "worst",
    "amazing",
    "terrible",
    "awful",
    "horrible",
    "incredible",
    "outrageous",
    "disgraceful",
    "ridiculous",
    "radical",
    "extreme",
    "corrupt",
    "evil",
    "perfect",
    "pathetic",
    "disastrous",
    "brilliant",
    "stupid",
    "insane",
];

const DEFAULT_EMOTIONAL: &[&str] = &[
    "angry",
    "anger",
    "fear",
    "afraid",
    "scared",
    "hate",
    "love",
    "outrage",
    "furious",
    "shocking",
    "shocked",
    "devastating",
    "heartbreaking",
    "tragic",
    "terrifying",
    "horrifying",
    "panic",
    "disgusting",
    "joy",
    "sad",
    "grief",
    "rage",
    "alarming",
    "crisis",
];

/// Category → term set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    categories: FxHashMap<String, FxHashSet<String>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::empty()
            .with_category(POLARIZING, DEFAULT_POLARIZING.iter().copied())
            .with_category(EMOTIONAL, DEFAULT_EMOTIONAL.iter().copied())
    }
}

impl Lexicon {
    /// A lexicon with no categories; every lookup misses.
    pub fn empty() -> Self {
        Self {
            categories: FxHashMap::default(),
        }
    }

    pub fn with_category<I, S>(mut self, category: &str, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_category(category, terms);
        self
    }

    /// Replace a category's terms. Terms are lower-cased and trimmed.
    pub fn set_category<I, S>(&mut self, category: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self.categories.insert(category.to_string(), set);
    }

    pub fn terms(&self, category: &str) -> Option<&FxHashSet<String>> {
        self.categories.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Exact match of an already case-folded word.
    pub fn contains(&self, category: &str, folded_word: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|terms| terms.contains(folded_word))
    }

    pub fn count_matches(&self, category: &str, folded_words: &[String]) -> usize {
        let Some(terms) = self.categories.get(category) else {
            return 0;
        };
        folded_words
            .iter()
            .filter(|w| terms.contains(w.as_str()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let lexicon = Lexicon::default();
        assert!(lexicon.contains(POLARIZING, "best"));
        assert!(lexicon.contains(POLARIZING, "worst"));
        assert!(lexicon.contains(EMOTIONAL, "outrage"));
        assert!(!lexicon.contains(EMOTIONAL, "table"));
    }

    #[test]
    fn test_terms_are_folded() {
        let lexicon = Lexicon::empty().with_category("custom", [" Epic ", "LEGENDARY", ""]);
        assert!(lexicon.contains("custom", "epic"));
        assert!(lexicon.contains("custom", "legendary"));
        assert_eq!(lexicon.terms("custom").map(|t| t.len()), Some(2));
    }

    #[test]
    fn test_set_category_replaces() {
        let mut lexicon = Lexicon::default();
        lexicon.set_category(POLARIZING, ["fantastic"]);
        assert!(!lexicon.contains(POLARIZING, "best"));
        assert!(lexicon.contains(POLARIZING, "fantastic"));
    }

    #[test]
    fn test_count_matches_unknown_category() {
        let lexicon = Lexicon::default();
        let words = vec!["best".to_string()];
        assert_eq!(lexicon.count_matches("nope", &words), 0);
        assert_eq!(lexicon.count_matches(POLARIZING, &words), 1);
    }
}
