//! Remote (LLM) analysis
//!
//! Sends page text to a language model and reads back the six metrics.
//! One request per call, no retries. On failure the error is returned as-is;
//! falling back to the local heuristics is the caller's decision.

use crate::ai::client::{AiClient, TextGenerator};
use crate::ai::prompts::analysis_prompt;
use crate::ai::RemoteAnalysisError;
use crate::models::{AnalysisSource, MetricName, MetricVector};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Analyzes text through a [`TextGenerator`]
pub struct RemoteAnalyzer<G = AiClient> {
    generator: G,
}

impl<G: TextGenerator> RemoteAnalyzer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn source(&self) -> AnalysisSource {
        AnalysisSource::Remote {
            backend: self.generator.backend().to_string(),
            model: self.generator.model().to_string(),
        }
    }

    /// Analyze text with exactly one model call.
    pub fn analyze(&self, text: &str) -> Result<MetricVector, RemoteAnalysisError> {
        info!(
            "Requesting remote analysis from {} ({} chars)",
            self.generator.backend(),
            text.chars().count()
        );
        let prompt = analysis_prompt(text);
        let reply = self.generator.generate(&prompt)?;
        debug!("Remote reply: {}", reply);
        parse_metric_payload(&reply)
    }
}

/// Strip a surrounding markdown code fence, if any.
fn unfence(reply: &str) -> &str {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| {
        Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").expect("valid regex")
    });
    let trimmed = reply.trim();
    fence
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map_or(trimmed, |m| m.as_str())
}

/// Parse a model reply into a metric vector.
///
/// The reply must be a JSON object containing all six metrics (canonical
/// names or their aliases) as numbers. Values are clamped into [0, 100].
/// Anything else is an error; a partial vector is never returned.
pub fn parse_metric_payload(reply: &str) -> Result<MetricVector, RemoteAnalysisError> {
    let payload = unfence(reply);
    if payload.is_empty() {
        return Err(RemoteAnalysisError::MissingPayload);
    }

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| RemoteAnalysisError::InvalidPayload(format!("not valid JSON: {}", e)))?;

    let Some(object) = value.as_object() else {
        return Err(RemoteAnalysisError::InvalidPayload(
            "expected a JSON object".to_string(),
        ));
    };

    for metric in MetricName::ALL {
        let present = object.contains_key(metric.canonical())
            || metric.aliases().iter().any(|a| object.contains_key(*a));
        if !present {
            return Err(RemoteAnalysisError::InvalidPayload(format!(
                "missing key '{}'",
                metric.canonical()
            )));
        }
    }

    let metrics: MetricVector = serde_json::from_value(value)
        .map_err(|e| RemoteAnalysisError::InvalidPayload(e.to_string()))?;

    Ok(metrics.clamped())
}
