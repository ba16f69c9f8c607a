//! Smart suggestion engine.
//!
//! Derives reminder candidates from a baby's age and recent care log.
//! Everything here is a pure function of its inputs, `now` included: no
//! I/O, no hidden state, no randomness. Identical inputs give identical
//! output.
//!
//! Rules are evaluated in a fixed order, which is also the output order:
//!
//! 1. feeding-interval prediction
//! 2. age-window milestone checks
//! 3. vitamin D nudge
//! 4. sleep-tracking nudge
//!
//! The list is then cut to the configured maximum. Priority is a display
//! hint only and never reorders anything.

mod context;
mod engine;
mod feeding;
mod milestone;
mod nudge;

pub use context::SuggestionContext;
pub use engine::SuggestionEngine;
pub use feeding::{predict_next_feeding, FeedingPrediction};
pub use milestone::{MilestoneBand, MILESTONE_BANDS};
pub use nudge::{sleep_tracking_nudge, vitamin_d_nudge};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::care::ReminderType;

/// Display priority of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn name(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Why a suggestion was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SuggestionReason {
    /// Average gap between recent feedings projects the next one
    FeedingPattern {
        samples: usize,
        average_interval_minutes: i64,
    },
    /// Baby's age falls inside a milestone band
    AgeWindow { min_days: u32, max_days: u32 },
    /// Old enough for vitamin D and no open medicine reminder
    VitaminD { age_in_days: u32 },
    /// Too few sleeps logged to see a pattern
    SleepTracking { logged_sleeps: usize },
}

/// An unpersisted reminder candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: ReminderType,
    pub title: String,
    pub message: String,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub reason: SuggestionReason,
}

/// Tunables of the suggestion engine. Defaults are the shipped rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Suggestions kept after ranking
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Most recent feedings considered by the interval predictor
    #[serde(default = "default_feeding_sample_size")]
    pub feeding_sample_size: usize,
    /// Fewer feedings than this means no prediction (never below 2)
    #[serde(default = "default_min_feedings")]
    pub min_feedings: usize,
    /// Fewer logged sleeps than this triggers the tracking nudge
    #[serde(default = "default_sleep_sample_threshold")]
    pub sleep_sample_threshold: usize,
    /// Age from which the vitamin D nudge applies
    #[serde(default = "default_vitamin_d_min_age_days")]
    pub vitamin_d_min_age_days: u32,
}

fn default_max_suggestions() -> usize {
    3
}
fn default_feeding_sample_size() -> usize {
    10
}
fn default_min_feedings() -> usize {
    2
}
fn default_sleep_sample_threshold() -> usize {
    3
}
fn default_vitamin_d_min_age_days() -> u32 {
    60
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            feeding_sample_size: default_feeding_sample_size(),
            min_feedings: default_min_feedings(),
            sleep_sample_threshold: default_sleep_sample_threshold(),
            vitamin_d_min_age_days: default_vitamin_d_min_age_days(),
        }
    }
}
