//! Configuration module for nutrilabel
//!
//! This module handles:
//! - User configuration (~/.config/nutrilabel/config.toml): AI backend,
//!   lexicon word lists, source credibility rules
//! - Persisted preferences (~/.config/nutrilabel/settings.json)

mod settings;
mod user_config;

pub use settings::{
    coerce_preference, Settings, SettingsError, SettingsStore, Theme, DEFAULT_PREFERENCE,
    THEME_KEY,
};
pub use user_config::{AiSection, UserConfig};
