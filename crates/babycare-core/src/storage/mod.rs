mod config;
pub mod database;

pub use config::{Config, LimitsConfig, LogFormat, LoggingConfig};
pub use database::CareDb;

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::care::{BabyProfile, CareActivity, Reminder, ReminderDraft};
use crate::error::{ConfigError, Result};
use crate::suggest::{Suggestion, SuggestionContext, SuggestionEngine};

/// Returns `~/.config/babycare[-dev]/` based on BABYCARE_ENV.
///
/// Set BABYCARE_ENV=dev to use development data directory.
/// BABYCARE_DATA_DIR, when set, wins over both.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("BABYCARE_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("BABYCARE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("babycare-dev")
            } else {
                base_dir.join("babycare")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Read side the suggestion engine needs, plus the one write it triggers.
pub trait CareStore {
    /// Oldest profile first.
    fn babies(&self) -> Result<Vec<BabyProfile>>;

    /// # Errors
    /// `NotFound` when no baby has this id.
    fn baby(&self, baby_id: &str) -> Result<BabyProfile>;

    /// Newest first, at most `limit`.
    fn recent_activities(&self, baby_id: &str, limit: usize) -> Result<Vec<CareActivity>>;

    fn reminders(&self, baby_id: &str) -> Result<Vec<Reminder>>;

    fn create_reminder(&self, draft: ReminderDraft, now: DateTime<Utc>) -> Result<Reminder>;
}

/// One baby's data, fetched once and handed to the engine as a
/// [`SuggestionContext`].
#[derive(Debug, Clone)]
pub struct CareSnapshot {
    pub baby: BabyProfile,
    pub activities: Vec<CareActivity>,
    pub reminders: Vec<Reminder>,
}

impl CareSnapshot {
    /// # Errors
    /// Propagates store failures, including an unknown baby id.
    pub fn load(store: &impl CareStore, baby_id: &str, limits: &LimitsConfig) -> Result<Self> {
        Ok(Self {
            baby: store.baby(baby_id)?,
            activities: store.recent_activities(baby_id, limits.recent_activities)?,
            reminders: store.reminders(baby_id)?,
        })
    }

    pub fn context(&self, now: DateTime<Utc>) -> SuggestionContext<'_> {
        SuggestionContext::new(&self.baby, &self.activities, &self.reminders, now)
    }

    /// # Errors
    /// See [`SuggestionEngine::suggest`].
    pub fn suggestions(&self, engine: &SuggestionEngine, now: DateTime<Utc>) -> Result<Vec<Suggestion>> {
        Ok(engine.suggest(&self.context(now))?)
    }
}
