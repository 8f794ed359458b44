//! Source credibility lookup
//!
//! An ordered list of URL substring rules. The first rule whose pattern
//! occurs in the lower-cased URL decides the score, so order matters: a URL
//! mentioning both "nytimes" and "cnn" scores as nytimes.

use serde::{Deserialize, Serialize};

/// Score given to a URL no rule matches
pub const DEFAULT_FALLBACK: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRule {
    pub pattern: String,
    pub score: f64,
}

impl SourceRule {
    pub fn new(pattern: impl Into<String>, score: f64) -> Self {
        Self {
            pattern: pattern.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceRegistry {
    rules: Vec<SourceRule>,
    fallback: f64,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new(
            vec![
                SourceRule::new("nytimes", 95.0),
                SourceRule::new("bbc", 90.0),
                SourceRule::new("wikipedia", 85.0),
                SourceRule::new("cnn", 80.0),
            ],
            DEFAULT_FALLBACK,
        )
    }
}

impl SourceRegistry {
    /// Rules are checked in the given order. Patterns are lower-cased; rules
    /// with an empty pattern are dropped since they would match everything.
    pub fn new(rules: Vec<SourceRule>, fallback: f64) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| SourceRule {
                pattern: r.pattern.trim().to_lowercase(),
                score: r.score,
            })
            .filter(|r| !r.pattern.is_empty())
            .collect();
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[SourceRule] {
        &self.rules
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Raw rule score for a URL. A blank URL has no source and scores 0.
    pub fn lookup(&self, url: &str) -> f64 {
        if url.trim().is_empty() {
            return 0.0;
        }
        let url = url.to_lowercase();
        self.rules
            .iter()
            .find(|r| url.contains(&r.pattern))
            .map_or(self.fallback, |r| r.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let registry = SourceRegistry::default();
        assert_eq!(registry.lookup("https://www.nytimes.com/2024/a"), 95.0);
        assert_eq!(registry.lookup("https://www.bbc.co.uk/news"), 90.0);
        assert_eq!(registry.lookup("https://en.wikipedia.org/wiki/Rust"), 85.0);
        assert_eq!(registry.lookup("https://edition.cnn.com/"), 80.0);
        assert_eq!(registry.lookup("https://example.com/"), 70.0);
    }

    #[test]
    fn test_first_match_wins() {
        let registry = SourceRegistry::default();
        assert_eq!(registry.lookup("https://cnn.example/nytimes-mirror"), 95.0);
    }

    #[test]
    fn test_case_insensitive() {
        let registry = SourceRegistry::default();
        assert_eq!(registry.lookup("HTTPS://WWW.BBC.COM/"), 90.0);
    }

    #[test]
    fn test_blank_url() {
        let registry = SourceRegistry::default();
        assert_eq!(registry.lookup(""), 0.0);
        assert_eq!(registry.lookup("   "), 0.0);
    }

    #[test]
    fn test_custom_rules_drop_empty_patterns() {
        let registry = SourceRegistry::new(
            vec![SourceRule::new("", 1.0), SourceRule::new("Reuters", 92.0)],
            60.0,
        );
        assert_eq!(registry.rules().len(), 1);
        assert_eq!(registry.lookup("https://www.reuters.com/x"), 92.0);
        assert_eq!(registry.lookup("https://blog.example/"), 60.0);
    }
}
