//! Core data models for nutrilabel
//!
//! These models flow through the whole pipeline: a [`PageContent`] comes in
//! from the page scraper, the analyzers turn it into a [`MetricVector`], and
//! the CLI hands an [`Analysis`] to the reporters.

use crate::scoring::{summarize, Summary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text captured from a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl PageContent {
    /// Pages shorter than this are skipped by the scraper; scores on them are noise.
    pub const MIN_SUBSTANTIAL_CHARS: usize = 250;

    pub fn new(text: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            title: title.into(),
        }
    }

    pub fn is_substantial(&self) -> bool {
        self.text.chars().count() > Self::MIN_SUBSTANTIAL_CHARS
    }
}

/// The six nutrition metrics.
///
/// Different producers have used different names for the same six concepts.
/// The canonical name is what we emit; the aliases are accepted on input
/// (remote payloads, persisted settings, older JSON files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    FactDensity,
    BiasLevel,
    EmotionalManipulation,
    Diversity,
    Complexity,
    SourceCredibility,
}

impl MetricName {
    pub const ALL: [MetricName; 6] = [
        MetricName::FactDensity,
        MetricName::BiasLevel,
        MetricName::EmotionalManipulation,
        MetricName::Diversity,
        MetricName::Complexity,
        MetricName::SourceCredibility,
    ];

    pub fn canonical(&self) -> &'static str {
        match self {
            MetricName::FactDensity => "factDensity",
            MetricName::BiasLevel => "biasLevel",
            MetricName::EmotionalManipulation => "emotionalManipulation",
            MetricName::Diversity => "diversity",
            MetricName::Complexity => "complexity",
            MetricName::SourceCredibility => "sourceCredibility",
        }
    }

    /// Display name used on the nutrition label
    pub fn label(&self) -> &'static str {
        match self {
            MetricName::FactDensity => "Fact Density",
            MetricName::BiasLevel => "Bias Content",
            MetricName::EmotionalManipulation => "Emotional Calories",
            MetricName::Diversity => "Perspective Vitamins",
            MetricName::Complexity => "Complexity Index",
            MetricName::SourceCredibility => "Source Minerals",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            MetricName::FactDensity => &["fact_density"],
            MetricName::BiasLevel => &["bias_level", "biasContent", "bias_content"],
            MetricName::EmotionalManipulation => &[
                "emotional_manipulation",
                "emotionalCalories",
                "emotional_calories",
            ],
            MetricName::Diversity => &["perspectiveVitamins", "perspective_vitamins"],
            MetricName::Complexity => &["complexityIndex", "complexity_index"],
            MetricName::SourceCredibility => &[
                "source_credibility",
                "sourceMinerals",
                "source_minerals",
            ],
        }
    }

    /// Resolve a canonical name or alias (exact match).
    pub fn from_key(key: &str) -> Option<MetricName> {
        MetricName::ALL
            .into_iter()
            .find(|m| m.canonical() == key || m.aliases().contains(&key))
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical())
    }
}

/// Round to two decimals and force into [0, 100]. Non-finite input becomes 0.
pub fn normalize_score(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let clamped = value.clamp(0.0, 100.0);
    (clamped * 100.0).round() / 100.0
}

/// Six nutrition scores, each in [0, 100] with two-decimal precision.
///
/// Serde aliases mirror [`MetricName::aliases`]. Every key is required on
/// input, so a payload missing one of the six metrics fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricVector {
    #[serde(alias = "fact_density")]
    pub fact_density: f64,
    #[serde(alias = "bias_level", alias = "biasContent", alias = "bias_content")]
    pub bias_level: f64,
    #[serde(
        alias = "emotional_manipulation",
        alias = "emotionalCalories",
        alias = "emotional_calories"
    )]
    pub emotional_manipulation: f64,
    #[serde(alias = "perspectiveVitamins", alias = "perspective_vitamins")]
    pub diversity: f64,
    #[serde(alias = "complexityIndex", alias = "complexity_index")]
    pub complexity: f64,
    #[serde(
        alias = "source_credibility",
        alias = "sourceMinerals",
        alias = "source_minerals"
    )]
    pub source_credibility: f64,
}

impl MetricVector {
    pub fn get(&self, metric: MetricName) -> f64 {
        match metric {
            MetricName::FactDensity => self.fact_density,
            MetricName::BiasLevel => self.bias_level,
            MetricName::EmotionalManipulation => self.emotional_manipulation,
            MetricName::Diversity => self.diversity,
            MetricName::Complexity => self.complexity,
            MetricName::SourceCredibility => self.source_credibility,
        }
    }

    /// Set a metric, normalizing the value into range.
    pub fn set(&mut self, metric: MetricName, value: f64) {
        let value = normalize_score(value);
        match metric {
            MetricName::FactDensity => self.fact_density = value,
            MetricName::BiasLevel => self.bias_level = value,
            MetricName::EmotionalManipulation => self.emotional_manipulation = value,
            MetricName::Diversity => self.diversity = value,
            MetricName::Complexity => self.complexity = value,
            MetricName::SourceCredibility => self.source_credibility = value,
        }
    }

    /// Values in canonical order
    pub fn values(&self) -> [f64; 6] {
        MetricName::ALL.map(|m| self.get(m))
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricName, f64)> + '_ {
        MetricName::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Copy with every field normalized into [0, 100].
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for metric in MetricName::ALL {
            out.set(metric, self.get(metric));
        }
        out
    }
}

/// A qualitative label earned by a metric vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Where a metric vector came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalysisSource {
    Heuristic,
    Remote { backend: String, model: String },
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisSource::Heuristic => write!(f, "heuristic"),
            AnalysisSource::Remote { backend, model } => write!(f, "{} ({})", backend, model),
        }
    }
}

/// Result of analyzing one page.
///
/// Passed explicitly from the analyzer to whoever displays it; nothing is
/// kept around between requests.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub title: String,
    pub url: String,
    pub source: AnalysisSource,
    pub metrics: MetricVector,
    pub summary: Summary,
}

impl Analysis {
    pub fn new(page: &PageContent, source: AnalysisSource, metrics: MetricVector) -> Self {
        let metrics = metrics.clamped();
        Self {
            id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            title: page.title.clone(),
            url: page.url.clone(),
            source,
            summary: summarize(&metrics),
            metrics,
        }
    }
}
