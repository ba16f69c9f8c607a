//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Suggestion engine tunables
//! - List limits used by the CLI
//! - Daily targets for the stats view
//! - Log level and format
//!
//! Configuration is stored at `~/.config/babycare/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::care::DailyTargets;
use crate::error::{ConfigError, CoreError, Result};
use crate::suggest::SuggestionConfig;

/// How many rows each view fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Activities handed to the suggestion engine
    #[serde(default = "default_recent_activities")]
    pub recent_activities: usize,
    #[serde(default = "default_timeline_activities")]
    pub timeline_activities: usize,
    #[serde(default = "default_completed_reminders_shown")]
    pub completed_reminders_shown: usize,
    #[serde(default = "default_cry_history")]
    pub cry_history: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/babycare/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub daily_targets: DailyTargets,
    #[serde(default)]
    pub logging: LoggingConfig,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_recent_activities() -> usize {
    50
}
fn default_timeline_activities() -> usize {
    20
}
fn default_completed_reminders_shown() -> usize {
    5
}
fn default_cry_history() -> usize {
    10
}
fn default_log_level() -> String {
    "warn".into()
}
fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            recent_activities: default_recent_activities(),
            timeline_activities: default_timeline_activities(),
            completed_reminders_shown: default_completed_reminders_shown(),
            cry_history: default_cry_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(unknown());
            }
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("set the individual keys of this section".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Location of the config file inside [`data_dir`].
    ///
    /// # Errors
    /// Fails when the data directory cannot be created.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Like [`Config::load`] for an explicit file.
    ///
    /// # Errors
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// # Errors
    /// See [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Every leaf key with its current value, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not fit it.
    /// On error the config is left unchanged.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    /// Names the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        if self.suggestions.max_suggestions == 0 {
            return Err(invalid("suggestions.max_suggestions", "must be at least 1"));
        }
        if self.suggestions.feeding_sample_size < 2 {
            return Err(invalid("suggestions.feeding_sample_size", "must be at least 2"));
        }
        if self.suggestions.min_feedings > self.suggestions.feeding_sample_size {
            return Err(invalid(
                "suggestions.min_feedings",
                "must not exceed suggestions.feeding_sample_size",
            ));
        }
        if self.limits.recent_activities == 0 {
            return Err(invalid("limits.recent_activities", "must be at least 1"));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(invalid("logging.level", "expected one of trace, debug, info, warn, error"));
        }
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[suggestions]\nmax_suggestions = 2\n").unwrap();
        assert_eq!(parsed.suggestions.max_suggestions, 2);
        assert_eq!(parsed.suggestions.feeding_sample_size, 10);
        assert_eq!(parsed.limits, LimitsConfig::default());
        assert_eq!(parsed.logging.format, LogFormat::Compact);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("suggestions.max_suggestions").as_deref(), Some("3"));
        assert_eq!(cfg.get("daily_targets.sleep_minutes").as_deref(), Some("720"));
        assert_eq!(cfg.get("logging.level").as_deref(), Some("warn"));
        assert_eq!(cfg.get("logging.format").as_deref(), Some("compact"));
        assert!(cfg.get("suggestions.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_value_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set_value("limits.timeline_activities", "40").unwrap();
        assert_eq!(cfg.limits.timeline_activities, 40);
    }

    #[test]
    fn set_value_updates_enum_through_string() {
        let mut cfg = Config::default();
        cfg.set_value("logging.format", "pretty").unwrap();
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
        assert!(matches!(
            cfg.set_value("logging.format", "fancy"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("suggestions.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set_value("nope.key", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_value_rejects_invalid_type_and_range() {
        let mut cfg = Config::default();
        assert!(cfg.set_value("suggestions.max_suggestions", "many").is_err());
        assert!(cfg.set_value("suggestions.max_suggestions", "0").is_err());
        assert!(cfg.set_value("logging.level", "loud").is_err());
        assert!(cfg.set_value("suggestions", "1").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn validate_rejects_min_feedings_above_sample_size() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("suggestions.min_feedings", "11"),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "suggestions.min_feedings"
        ));
        assert_eq!(cfg, Config::default());

        cfg.set_value("suggestions.min_feedings", "10").unwrap();
        assert!(cfg.set_value("suggestions.feeding_sample_size", "9").is_err());
        assert_eq!(cfg.suggestions.feeding_sample_size, 10);
    }

    #[test]
    fn entries_lists_every_leaf() {
        let entries = Config::default().entries();
        assert!(entries.contains(&("suggestions.vitamin_d_min_age_days".to_string(), "60".to_string())));
        assert!(entries.contains(&("limits.cry_history".to_string(), "10".to_string())));
        assert!(entries.contains(&("daily_targets.diapers".to_string(), "6".to_string())));
        assert!(entries.contains(&("logging.level".to_string(), "warn".to_string())));
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set_value("daily_targets.feedings", "10").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().daily_targets.feedings, 10);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "suggestions = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }
}
