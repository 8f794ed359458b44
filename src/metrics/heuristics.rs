//! Local heuristic metrics
//!
//! Every function here is total: any string in, a finite score in [0, 100]
//! out, rounded to two decimals. Empty input scores 0.

use super::lexicon::{Lexicon, EMOTIONAL, POLARIZING};
use super::sources::SourceRegistry;
use crate::models::{normalize_score, MetricVector, PageContent};
use crate::text;
use rustc_hash::FxHashSet;
use tracing::debug;

const BIAS_SCALE: f64 = 500.0;
const EMOTION_SCALE: f64 = 300.0;
const COMPLEXITY_BASELINE_CHARS: f64 = 3.0;
const COMPLEXITY_SCALE: f64 = 20.0;
const DIVERSITY_DIVISOR: f64 = 10.0;

/// Whether a character counts as a digit for fact density.
///
/// Unicode-aware: fullwidth (`１`) and Arabic-Indic (`٣`) digits count, as do
/// other numeric characters such as superscripts, Roman numeral letters and
/// vulgar fractions. All of them mark a number in prose.
fn is_digit(c: char) -> bool {
    c.is_numeric()
}

/// Percentage of sentences containing at least one digit.
pub fn fact_density(text: &str) -> f64 {
    let sentences = text::sentences(text);
    if sentences.is_empty() {
        return 0.0;
    }
    let with_digits = sentences
        .iter()
        .filter(|s| s.chars().any(is_digit))
        .count();
    normalize_score(with_digits as f64 / sentences.len() as f64 * 100.0)
}

/// Share of polarizing words, scaled ×500.
pub fn bias_level(text: &str, lexicon: &Lexicon) -> f64 {
    dictionary_score(text, lexicon, POLARIZING, BIAS_SCALE)
}

/// Share of emotion words, scaled ×300.
pub fn emotional_intensity(text: &str, lexicon: &Lexicon) -> f64 {
    dictionary_score(text, lexicon, EMOTIONAL, EMOTION_SCALE)
}

fn dictionary_score(text: &str, lexicon: &Lexicon, category: &str, scale: f64) -> f64 {
    let words = text::folded_words(text);
    if words.is_empty() {
        return 0.0;
    }
    let hits = lexicon.count_matches(category, &words);
    normalize_score(hits as f64 / words.len() as f64 * scale)
}

/// `(average word length - 3) × 20`.
///
/// Word length counts characters including attached punctuation. Short
/// words push the raw value below zero; it is floored at 0 along with the
/// usual cap at 100.
pub fn complexity(text: &str) -> f64 {
    let words = text::words(text);
    if words.is_empty() {
        return 0.0;
    }
    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let average = total_chars as f64 / words.len() as f64;
    normalize_score((average - COMPLEXITY_BASELINE_CHARS) * COMPLEXITY_SCALE)
}

/// Distinct case-folded words divided by 10.
pub fn perspective_diversity(text: &str) -> f64 {
    let distinct: FxHashSet<String> = text::folded_words(text).into_iter().collect();
    normalize_score(distinct.len() as f64 / DIVERSITY_DIVISOR)
}

/// Credibility of the page's origin, first matching rule wins.
pub fn source_credibility(url: &str, sources: &SourceRegistry) -> f64 {
    normalize_score(sources.lookup(url))
}

/// Computes the full metric vector from page text and URL.
///
/// Holds only read-only configuration, so one instance can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct HeuristicAnalyzer {
    lexicon: Lexicon,
    sources: SourceRegistry,
}

impl HeuristicAnalyzer {
    pub fn new(lexicon: Lexicon, sources: SourceRegistry) -> Self {
        Self { lexicon, sources }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn analyze(&self, page: &PageContent) -> MetricVector {
        let metrics = MetricVector {
            fact_density: fact_density(&page.text),
            bias_level: bias_level(&page.text, &self.lexicon),
            emotional_manipulation: emotional_intensity(&page.text, &self.lexicon),
            diversity: perspective_diversity(&page.text),
            complexity: complexity(&page.text),
            source_credibility: source_credibility(&page.url, &self.sources),
        };
        debug!(
            "Heuristic metrics for '{}': fact={:.2} bias={:.2} emotion={:.2} diversity={:.2} complexity={:.2} source={:.2}",
            page.title,
            metrics.fact_density,
            metrics.bias_level,
            metrics.emotional_manipulation,
            metrics.diversity,
            metrics.complexity,
            metrics.source_credibility
        );
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        " ",
        "\n\t  \n",
        ".",
        "....",
        "I have 3 cats. I like cats.",
        "this is the best and worst day",
        "a b c d e f g",
        "Supercalifragilisticexpialidocious antidisestablishmentarianism",
        "日本語のテキストです。数字は１２３。",
        "Émotions fortes 🔥🔥 — love hate fear!!!",
        "best best best best",
    ];

    fn all_scores(text: &str, analyzer: &HeuristicAnalyzer) -> [f64; 6] {
        [
            fact_density(text),
            bias_level(text, analyzer.lexicon()),
            emotional_intensity(text, analyzer.lexicon()),
            perspective_diversity(text),
            complexity(text),
            source_credibility(text, analyzer.sources()),
        ]
    }

    #[test]
    fn test_scores_always_in_range() {
        let analyzer = HeuristicAnalyzer::default();
        let long = "The 42 outrageous claims were best ignored. ".repeat(500);
        for text in SAMPLES.iter().copied().chain([long.as_str()]) {
            for score in all_scores(text, &analyzer) {
                assert!(score.is_finite(), "non-finite score for {:?}", text);
                assert!((0.0..=100.0).contains(&score), "{} out of range for {:?}", score, text);
            }
        }
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let analyzer = HeuristicAnalyzer::default();
        assert_eq!(all_scores("", &analyzer), [0.0; 6]);
    }

    #[test]
    fn test_repeated_calls_identical() {
        let analyzer = HeuristicAnalyzer::default();
        for text in SAMPLES {
            assert_eq!(all_scores(text, &analyzer), all_scores(text, &analyzer));
        }
    }

    #[test]
    fn test_fact_density_counts_trailing_segment() {
        assert_eq!(fact_density("I have 3 cats. I like cats."), 33.33);
    }

    #[test]
    fn test_fact_density_values() {
        assert_eq!(fact_density("No digits here"), 0.0);
        assert_eq!(fact_density("In 2020. In 2021"), 100.0);
        assert_eq!(fact_density("   "), 0.0);
    }

    #[test]
    fn test_fact_density_non_ascii_digits() {
        assert_eq!(fact_density("Population １２３ people"), 100.0);
        assert_eq!(fact_density("Population ٣ people"), 100.0);
        assert_eq!(fact_density("No numbers here. Population ٣ people"), 50.0);
        assert_eq!(fact_density("Population many people"), 0.0);
    }

    #[test]
    fn test_bias_level_clamps() {
        let lexicon = Lexicon::default();
        // 2 of 7 words, 142.86 before the cap
        assert_eq!(bias_level("this is the best and worst day", &lexicon), 100.0);
    }

    #[test]
    fn test_bias_level_scaled() {
        let lexicon = Lexicon::default();
        let text = "the best option we have considered in all these long years";
        assert_eq!(bias_level(text, &lexicon), 45.45);
    }

    #[test]
    fn test_bias_level_is_case_insensitive_exact_match() {
        let lexicon = Lexicon::default();
        assert_eq!(bias_level("BEST one two three four five six seven eight nine", &lexicon), 50.0);
        // Attached punctuation means no match: no stemming or stripping
        assert_eq!(bias_level("best, one two three four", &lexicon), 0.0);
    }

    #[test]
    fn test_emotional_intensity() {
        let lexicon = Lexicon::default();
        assert_eq!(
            emotional_intensity("we felt fear on the road home that cold night", &lexicon),
            30.0
        );
        assert_eq!(emotional_intensity("love hate", &lexicon), 100.0);
        assert_eq!(emotional_intensity("plain words only", &lexicon), 0.0);
    }

    #[test]
    fn test_custom_lexicon_is_used() {
        let lexicon = Lexicon::empty().with_category(POLARIZING, ["meh"]);
        assert_eq!(bias_level("meh one two three four five six seven eight nine", &lexicon), 50.0);
        assert_eq!(bias_level("best worst", &lexicon), 0.0);
        assert_eq!(emotional_intensity("love hate", &lexicon), 0.0);
    }

    #[test]
    fn test_complexity() {
        // average length 4 → (4 - 3) × 20
        assert_eq!(complexity("The quick brown fox"), 20.0);
        assert_eq!(complexity("Supercalifragilisticexpialidocious"), 100.0);
    }

    #[test]
    fn test_complexity_floors_short_words() {
        assert_eq!(complexity("a b c d e f g"), 0.0);
    }

    #[test]
    fn test_complexity_counts_punctuation() {
        // "cat." is 4 characters
        assert_eq!(complexity("cat."), 20.0);
    }

    #[test]
    fn test_perspective_diversity() {
        assert_eq!(perspective_diversity("the The THE cat"), 0.2);
        let many: String = (0..2000).map(|i| format!("w{} ", i)).collect();
        assert_eq!(perspective_diversity(&many), 100.0);
    }

    #[test]
    fn test_source_credibility() {
        let sources = SourceRegistry::default();
        assert_eq!(source_credibility("https://www.bbc.co.uk/news/1", &sources), 90.0);
        assert_eq!(source_credibility("https://example.org", &sources), 70.0);
        assert_eq!(source_credibility("https://nytimes.cnn.test/", &sources), 95.0);
        assert_eq!(source_credibility("", &sources), 0.0);
    }

    #[test]
    fn test_source_credibility_clamps_configured_scores() {
        let sources = SourceRegistry::new(vec![crate::metrics::SourceRule::new("x", 250.0)], -5.0);
        assert_eq!(source_credibility("https://x.com", &sources), 100.0);
        assert_eq!(source_credibility("https://y.com", &sources), 0.0);
    }

    #[test]
    fn test_analyzer_builds_vector() {
        let analyzer = HeuristicAnalyzer::default();
        let page = PageContent::new(
            "I have 3 cats. I like cats.",
            "https://www.nytimes.com/cats",
            "Cats",
        );
        let metrics = analyzer.analyze(&page);
        assert_eq!(metrics.fact_density, 33.33);
        assert_eq!(metrics.source_credibility, 95.0);
        assert_eq!(metrics.bias_level, 0.0);
        assert_eq!(metrics.diversity, 0.5);
    }
}
