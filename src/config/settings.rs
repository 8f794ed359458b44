//! Persisted user preferences
//!
//! A flat JSON object of key → value, stored at
//! `~/.config/nutrilabel/settings.json`:
//!
//! ```json
//! { "factDensity": 80, "biasLevel": 20, "preferredTheme": "dark" }
//! ```
//!
//! Metric keys may use any name from the alias table (older stores used
//! `biasContent`, `sourceMinerals`, ...). Bad values never fail a load: a
//! non-numeric preference becomes 50 and an out-of-range one is clamped.
//! Writes read the current file first and keep keys they don't own; the
//! last write wins.

use crate::models::{normalize_score, MetricName, MetricVector};
use crate::scoring::{summarize, Summary};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const THEME_KEY: &str = "preferredTheme";

/// Value used for a missing or unreadable preference
pub const DEFAULT_PREFERENCE: f64 = 50.0;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings file {0} must contain a JSON object")]
    NotAnObject(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'. Valid themes: light, dark", other)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Manual preference values for the six metrics plus the UI theme
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub preferences: MetricVector,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        let mut preferences = MetricVector::default();
        for metric in MetricName::ALL {
            preferences.set(metric, DEFAULT_PREFERENCE);
        }
        Self {
            preferences,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// Read settings out of a key-value map, tolerating bad values.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut settings = Settings::default();

        for metric in MetricName::ALL {
            let found = std::iter::once(metric.canonical())
                .chain(metric.aliases().iter().copied())
                .find_map(|key| map.get(key).map(|v| (key, v)));
            if let Some((key, value)) = found {
                settings.preferences.set(metric, coerce_preference(key, value));
            }
        }

        if let Some(value) = map.get(THEME_KEY) {
            match value.as_str().map(str::parse::<Theme>) {
                Some(Ok(theme)) => settings.theme = theme,
                _ => warn!("Ignoring invalid {} value {}", THEME_KEY, value),
            }
        }

        settings
    }

    /// Canonical key-value form
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for (metric, value) in self.preferences.iter() {
            map.insert(metric.canonical().to_string(), Value::from(value));
        }
        map.insert(THEME_KEY.to_string(), Value::from(self.theme.to_string()));
        map
    }

    pub fn preference(&self, metric: MetricName) -> f64 {
        self.preferences.get(metric)
    }

    pub fn set_preference(&mut self, metric: MetricName, value: f64) {
        self.preferences.set(metric, value);
    }

    /// Badges earned by the preference values themselves
    pub fn summary(&self) -> Summary {
        summarize(&self.preferences)
    }
}

/// Turn a stored value into a preference in [0, 100].
///
/// Numbers are clamped. Numeric strings are accepted since browser storage
/// only holds strings. Anything else falls back to [`DEFAULT_PREFERENCE`].
pub fn coerce_preference(key: &str, value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed.filter(|v| v.is_finite()) {
        Some(v) => {
            if !(0.0..=100.0).contains(&v) {
                warn!("Setting {} = {} is out of range; clamping", key, v);
            }
            normalize_score(v)
        }
        None => {
            warn!(
                "Setting {} = {} is not a number; using {}",
                key, value, DEFAULT_PREFERENCE
            );
            DEFAULT_PREFERENCE
        }
    }
}

/// File-backed settings store
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/nutrilabel/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nutrilabel").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw key-value contents; a missing file is an empty map.
    pub fn read_map(&self) -> Result<Map<String, Value>, SettingsError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}", self.path.display());
                return Ok(Map::new());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&content).map_err(|source| SettingsError::Json {
            path: self.path.clone(),
            source,
        })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(SettingsError::NotAnObject(self.path.clone())),
        }
    }

    pub fn load(&self) -> Result<Settings, SettingsError> {
        Ok(Settings::from_map(&self.read_map()?))
    }

    /// Write settings, keeping unrelated keys already in the file.
    ///
    /// Alias keys for the metrics are dropped so the file converges on
    /// canonical names.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let mut map = self.read_map()?;
        for metric in MetricName::ALL {
            for alias in metric.aliases() {
                map.remove(*alias);
            }
        }
        map.extend(settings.to_map());
        self.write_map(&map)
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(map).map_err(|source| SettingsError::Json {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.preferences.values(), [50.0; 6]);
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.summary().badges.is_empty());
    }

    #[test]
    fn test_from_map_canonical_and_alias_keys() {
        let settings = Settings::from_map(&map(json!({
            "factDensity": 85,
            "perspectiveVitamins": 90,
            "source_minerals": 75.5,
            "preferredTheme": "dark"
        })));
        assert_eq!(settings.preference(MetricName::FactDensity), 85.0);
        assert_eq!(settings.preference(MetricName::Diversity), 90.0);
        assert_eq!(settings.preference(MetricName::SourceCredibility), 75.5);
        assert_eq!(settings.preference(MetricName::BiasLevel), 50.0);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn test_canonical_key_beats_alias() {
        let settings = Settings::from_map(&map(json!({"biasLevel": 10, "biasContent": 90})));
        assert_eq!(settings.preference(MetricName::BiasLevel), 10.0);
    }

    #[test]
    fn test_invalid_values_clamp_or_default() {
        let settings = Settings::from_map(&map(json!({
            "factDensity": 250,
            "biasLevel": -10,
            "emotionalManipulation": "lots",
            "diversity": "72",
            "complexity": null,
            "sourceCredibility": "64%",
            "preferredTheme": "neon"
        })));
        assert_eq!(
            settings.preferences.values(),
            [100.0, 0.0, 50.0, 72.0, 50.0, 64.0]
        );
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_store_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_store_round_trip_keeps_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"biasContent": 12, "lastSeenVersion": "1.2"}"#).unwrap();

        let store = SettingsStore::new(&path);
        let mut settings = store.load().unwrap();
        assert_eq!(settings.preference(MetricName::BiasLevel), 12.0);

        settings.set_preference(MetricName::FactDensity, 95.0);
        settings.theme = Theme::Dark;
        store.save(&settings).unwrap();

        let raw = store.read_map().unwrap();
        assert_eq!(raw["lastSeenVersion"], "1.2");
        assert_eq!(raw["biasLevel"], 12.0);
        assert!(raw.get("biasContent").is_none());
        assert_eq!(raw[THEME_KEY], "dark");
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_store_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let mut first = Settings::default();
        first.set_preference(MetricName::Complexity, 10.0);
        let mut second = Settings::default();
        second.set_preference(MetricName::Complexity, 20.0);
        store.save(&first).unwrap();
        store.save(&second).unwrap();
        assert_eq!(store.load().unwrap().preference(MetricName::Complexity), 20.0);
    }

    #[test]
    fn test_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            SettingsStore::new(&path).load(),
            Err(SettingsError::Json { .. })
        ));
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            SettingsStore::new(&path).load(),
            Err(SettingsError::NotAnObject(_))
        ));
    }
}
