//! # Babycare Core Library
//!
//! This library provides the core logic for Babycare, a care log for
//! newborns and infants. Every operation is available through the
//! standalone `babycare` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Care model**: babies, logged activities, reminders, daily summaries
//!   and the day-grouped timeline
//! - **Suggestion engine**: pure, deterministic rules that turn a baby's
//!   age and recent log into at most a handful of reminder candidates
//! - **Tips**: a static, age-banded tip catalog with a session-owned
//!   rotation cursor
//! - **Cry analysis**: the classifier contract and stored assessments
//! - **Storage**: SQLite-based care log and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SuggestionEngine`]: ranks the rule outputs for one baby
//! - [`TipCursor`]: per-session position in the tip catalog
//! - [`CareDb`]: care log persistence
//! - [`Config`]: application configuration management

pub mod age;
pub mod care;
pub mod cry;
pub mod error;
pub mod storage;
pub mod suggest;
pub mod tips;

pub use age::{age_in_days, duration_minutes, human_age_label, AgeLabel, AgeUnit};
pub use care::{
    ActivityCategory, ActivityDetails, BabyProfile, CareActivity, DailySummary, DailyTargets,
    DiaperCondition, DiaperKind, FeedingMethod, Reminder, ReminderDraft, ReminderType,
};
pub use cry::{CryAnalysis, CryAssessment, CryClassifier, CryNeed};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use storage::{CareDb, CareSnapshot, CareStore, Config};
pub use suggest::{Priority, Suggestion, SuggestionConfig, SuggestionContext, SuggestionEngine, SuggestionReason};
pub use tips::{tips_for_age, Tip, TipCursor, TipView};
