//! User-level configuration for nutrilabel
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/nutrilabel/config.toml

use crate::ai::{AiConfig, LlmBackend};
use crate::metrics::{HeuristicAnalyzer, Lexicon, SourceRegistry, SourceRule, DEFAULT_FALLBACK};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    /// Score for URLs no `[[sources]]` rule matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_fallback: Option<f64>,

    #[serde(default)]
    pub ai: AiSection,

    /// Category → terms. A listed category replaces the built-in list.
    #[serde(default)]
    pub lexicon: BTreeMap<String, Vec<String>>,

    /// Ordered credibility rules. When present, replaces the built-in list.
    #[serde(default)]
    pub sources: Vec<SourceRule>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AiSection {
    /// "gemini" (default), "openai" or "ollama"
    pub backend: Option<String>,

    /// Model name (default depends on backend)
    pub model: Option<String>,

    /// Endpoint root override, e.g. a remote Ollama
    pub base_url: Option<String>,

    /// Whole-request timeout in seconds (default: 120)
    pub timeout_secs: Option<u64>,

    pub gemini_api_key: Option<String>,

    pub openai_api_key: Option<String>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/nutrilabel/config.toml)
    pub fn load() -> Result<Self> {
        let path = Self::user_config_path();
        Self::load_from(path.as_deref())
    }

    /// Same as [`UserConfig::load`] with an explicit file location.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = path.filter(|p| p.exists()) {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file_config: UserConfig = toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            debug!("Loaded user config from {}", path.display());
            config.merge(file_config);
        }

        // Environment variables override everything
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.ai.gemini_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.ai.openai_api_key = Some(key);
        }

        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nutrilabel").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.source_fallback.is_some() {
            self.source_fallback = other.source_fallback;
        }
        if other.ai.backend.is_some() {
            self.ai.backend = other.ai.backend;
        }
        if other.ai.model.is_some() {
            self.ai.model = other.ai.model;
        }
        if other.ai.base_url.is_some() {
            self.ai.base_url = other.ai.base_url;
        }
        if other.ai.timeout_secs.is_some() {
            self.ai.timeout_secs = other.ai.timeout_secs;
        }
        if other.ai.gemini_api_key.is_some() {
            self.ai.gemini_api_key = other.ai.gemini_api_key;
        }
        if other.ai.openai_api_key.is_some() {
            self.ai.openai_api_key = other.ai.openai_api_key;
        }
        self.lexicon.extend(other.lexicon);
        if !other.sources.is_empty() {
            self.sources = other.sources;
        }
    }

    /// Configured backend, defaulting to Gemini
    pub fn ai_backend(&self) -> Result<LlmBackend> {
        match self.ai.backend.as_deref() {
            Some(name) => Ok(name.parse()?),
            None => Ok(LlmBackend::default()),
        }
    }

    /// API key configured for a backend, if any
    pub fn api_key_for(&self, backend: LlmBackend) -> Option<&str> {
        match backend {
            LlmBackend::Gemini => self.ai.gemini_api_key.as_deref(),
            LlmBackend::OpenAi => self.ai.openai_api_key.as_deref(),
            LlmBackend::Ollama => None,
        }
    }

    /// Client settings, with CLI overrides applied on top of the file
    pub fn ai_config(&self, backend: Option<LlmBackend>, model: Option<String>) -> Result<AiConfig> {
        let backend = match backend {
            Some(b) => b,
            None => self.ai_backend()?,
        };
        let defaults = AiConfig::default();
        Ok(AiConfig {
            backend,
            model: model.or_else(|| self.ai.model.clone()),
            base_url: self.ai.base_url.clone(),
            timeout_secs: self.ai.timeout_secs.unwrap_or(defaults.timeout_secs),
            ..defaults
        })
    }

    /// Built-in lexicon with configured categories swapped in
    pub fn lexicon(&self) -> Lexicon {
        let mut lexicon = Lexicon::default();
        for (category, terms) in &self.lexicon {
            if terms.is_empty() {
                warn!("Lexicon category '{}' is empty; nothing will match it", category);
            }
            lexicon.set_category(category, terms);
        }
        lexicon
    }

    /// Configured credibility rules, or the built-in list
    pub fn source_registry(&self) -> SourceRegistry {
        let fallback = self.source_fallback.unwrap_or(DEFAULT_FALLBACK);
        if self.sources.is_empty() {
            let defaults = SourceRegistry::default();
            SourceRegistry::new(defaults.rules().to_vec(), fallback)
        } else {
            SourceRegistry::new(self.sources.clone(), fallback)
        }
    }

    pub fn heuristic_analyzer(&self) -> HeuristicAnalyzer {
        HeuristicAnalyzer::new(self.lexicon(), self.source_registry())
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        Self::init_user_config_at(Self::user_config_path())
    }

    /// Like [`UserConfig::init_user_config`], at an explicit path when given.
    /// An existing file is left untouched.
    pub fn init_user_config_at(path: Option<PathBuf>) -> Result<PathBuf> {
        let config_path =
            path.ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        if !config_path.exists() {
            let example = r#"# nutrilabel user configuration

# Score for URLs that match no [[sources]] rule
# source_fallback = 70

[ai]
# Backend: "gemini" (default), "openai", or "ollama" (free, local)
# backend = "gemini"
# model = "gemini-1.5-flash"
# timeout_secs = 120

# Get a Gemini key from: https://aistudio.google.com/app/apikey
# gemini_api_key = "..."
# openai_api_key = "sk-..."

# For a remote Ollama
# base_url = "http://localhost:11434/v1"

# Word lists. A category listed here replaces the built-in one.
[lexicon]
# polarizing = ["best", "worst", "amazing", "terrible"]
# emotional = ["fear", "outrage", "love", "hate"]

# Credibility rules, checked in order, first match wins.
# Listing any rule replaces the built-in list.
# [[sources]]
# pattern = "nytimes"
# score = 95
"#;
            std::fs::write(&config_path, example)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
        }

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{EMOTIONAL, POLARIZING};

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert_eq!(config.ai_backend().unwrap(), LlmBackend::Gemini);
        assert!(config.api_key_for(LlmBackend::Ollama).is_none());
        assert_eq!(config.source_registry(), SourceRegistry::default());
        assert_eq!(config.lexicon(), Lexicon::default());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = UserConfig::load_from(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(config.sources.is_empty());
        assert!(config.lexicon.is_empty());
    }

    #[test]
    fn test_load_invalid_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [[ not valid toml {{{}}}").unwrap();
        assert!(UserConfig::load_from(Some(&path)).is_err());
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml_str = r#"
source_fallback = 60

[ai]
backend = "ollama"
model = "qwen2.5"
base_url = "http://gpu-box:11434/v1"
timeout_secs = 30

[lexicon]
polarizing = ["Fantastic", "dreadful"]

[[sources]]
pattern = "reuters"
score = 92

[[sources]]
pattern = "apnews"
score = 91
"#;
        let config: UserConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ai_backend().unwrap(), LlmBackend::Ollama);

        let ai = config.ai_config(None, None).unwrap();
        assert_eq!(ai.model(), "qwen2.5");
        assert_eq!(ai.timeout_secs, 30);
        assert_eq!(ai.endpoint(), "http://gpu-box:11434/v1/chat/completions");

        let lexicon = config.lexicon();
        assert!(lexicon.contains(POLARIZING, "fantastic"));
        assert!(!lexicon.contains(POLARIZING, "best"));
        // Unlisted categories keep their defaults
        assert!(lexicon.contains(EMOTIONAL, "outrage"));

        let registry = config.source_registry();
        assert_eq!(registry.lookup("https://www.reuters.com/a"), 92.0);
        assert_eq!(registry.lookup("https://www.nytimes.com/a"), 60.0);
    }

    #[test]
    fn test_fallback_without_rules_keeps_default_rules() {
        let config: UserConfig = toml::from_str("source_fallback = 50").unwrap();
        let registry = config.source_registry();
        assert_eq!(registry.lookup("https://bbc.com"), 90.0);
        assert_eq!(registry.lookup("https://blog.example"), 50.0);
    }

    #[test]
    fn test_cli_overrides_win() {
        let config: UserConfig = toml::from_str("[ai]\nmodel = \"file-model\"").unwrap();
        let ai = config
            .ai_config(Some(LlmBackend::OpenAi), Some("cli-model".to_string()))
            .unwrap();
        assert_eq!(ai.backend, LlmBackend::OpenAi);
        assert_eq!(ai.model(), "cli-model");
    }

    #[test]
    fn test_unknown_backend_is_an_error() {
        let config: UserConfig = toml::from_str("[ai]\nbackend = \"claude\"").unwrap();
        assert!(config.ai_backend().is_err());
    }

    #[test]
    fn test_merge_overrides_set_fields() {
        let mut base = UserConfig::default();
        base.lexicon.insert("custom".into(), vec!["a".into()]);
        let other = UserConfig {
            source_fallback: Some(40.0),
            ai: AiSection {
                backend: Some("openai".to_string()),
                gemini_api_key: Some("g-key".to_string()),
                ..Default::default()
            },
            lexicon: BTreeMap::from([(POLARIZING.to_string(), vec!["x".to_string()])]),
            sources: vec![SourceRule::new("example", 10.0)],
        };
        base.merge(other);
        assert_eq!(base.source_fallback, Some(40.0));
        assert_eq!(base.api_key_for(LlmBackend::Gemini), Some("g-key"));
        assert_eq!(base.ai_backend().unwrap(), LlmBackend::OpenAi);
        assert_eq!(base.lexicon.len(), 2);
        assert_eq!(base.sources.len(), 1);
    }

    #[test]
    fn test_init_writes_loadable_example() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let written = UserConfig::init_user_config_at(Some(path.clone())).unwrap();
        assert_eq!(written, path);
        let config = UserConfig::load_from(Some(&path)).unwrap();
        assert!(config.sources.is_empty());
        assert!(config.ai.backend.is_none());

        std::fs::write(&path, "source_fallback = 10").unwrap();
        UserConfig::init_user_config_at(Some(path.clone())).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "source_fallback = 10");
    }

    #[test]
    fn test_user_config_path_returns_some() {
        if let Some(p) = UserConfig::user_config_path() {
            assert!(p.ends_with("nutrilabel/config.toml"));
        }
    }
}
