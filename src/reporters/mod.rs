//! Output reporters for nutrilabel analysis results
//!
//! Supports two output formats:
//! - `text` - Nutrition label for the terminal, values coloured by band
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::Analysis;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render analyses in the specified format.
///
/// `color` only affects the text format.
pub fn report(analyses: &[Analysis], format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(analyses, color)),
        OutputFormat::Json => json::render(analyses),
    }
}
