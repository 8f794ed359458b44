//! JSON reporter
//!
//! One analysis renders as an object, several as an array.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::Analysis;
use anyhow::Result;

/// Render analyses as pretty-printed JSON
pub fn render(analyses: &[Analysis]) -> Result<String> {
    match analyses {
        [single] => Ok(serde_json::to_string_pretty(single)?),
        many => Ok(serde_json::to_string_pretty(many)?),
    }
}
