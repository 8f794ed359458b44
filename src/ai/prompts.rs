//! Prompt construction for remote analysis

use crate::models::MetricName;

/// Build the single user prompt sent for one analysis.
///
/// The page text is embedded verbatim; the reply is expected to be a bare
/// JSON object keyed by the canonical metric names.
pub fn analysis_prompt(text: &str) -> String {
    let fields = MetricName::ALL
        .iter()
        .map(|m| m.canonical())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Analyze the following content and return a JSON with fields: {}. \
         Each field is a number from 0 to 100. Reply with the JSON object only. \
         Content: \"{}\"",
        fields, text
    )
}
