//! Remote language-model analysis
//!
//! An alternative to the local heuristics: the page text goes to an LLM which
//! returns the six nutrition metrics as JSON. Uses BYOK (bring your own key):
//! API keys come from the environment or the user config file.
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY`: Required for the Gemini backend (default)
//! - `OPENAI_API_KEY`: Required for the OpenAI backend
//! - `OLLAMA_MODEL`: Optional model override for a local Ollama
//!
//! # Example
//!
//! ```rust,ignore
//! use nutrilabel::ai::{AiClient, AiConfig, LlmBackend, RemoteAnalyzer};
//!
//! let config = AiConfig { backend: LlmBackend::Gemini, ..Default::default() };
//! let client = AiClient::from_env_with_config(config)?;
//! let metrics = RemoteAnalyzer::new(client).analyze(&page.text)?;
//! ```

mod client;
mod prompts;
mod remote;

pub use client::{AiClient, AiConfig, LlmBackend, TextGenerator};
pub use prompts::analysis_prompt;
pub use remote::{parse_metric_payload, RemoteAnalyzer};

use thiserror::Error;

/// Errors that can occur talking to an LLM backend
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Missing API key: {env_var} not set. Get your key at {signup_url}")]
    MissingApiKey { env_var: String, signup_url: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API response contained no candidates")]
    EmptyResponse,

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type AiResult<T> = Result<T, AiError>;

/// Why a remote analysis produced no metric vector
#[derive(Error, Debug)]
pub enum RemoteAnalysisError {
    /// Network, HTTP status, credentials or client configuration
    #[error("remote analysis request failed: {0}")]
    Transport(#[source] AiError),

    /// The response carried no result text
    #[error("remote analysis returned no usable result")]
    MissingPayload,

    /// The result text is not a six-metric JSON object
    #[error("remote analysis result is not a metric vector: {0}")]
    InvalidPayload(String),
}

impl From<AiError> for RemoteAnalysisError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::EmptyResponse | AiError::ParseError(_) => RemoteAnalysisError::MissingPayload,
            other => RemoteAnalysisError::Transport(other),
        }
    }
}
