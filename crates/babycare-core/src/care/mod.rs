//! Care log model: babies, logged activities and their typed details.
//!
//! These are read-only snapshots as far as the suggestion engine is
//! concerned; only the storage layer creates or edits them.

pub mod reminder;
pub mod summary;
pub mod timeline;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::age::{self, AgeLabel};
use crate::error::ValidationError;

pub use reminder::{DueStatus, Reminder, ReminderBoard, ReminderDraft, ReminderPreset, ReminderType};
pub use summary::{DailySummary, DailyTargets, StatProgress};
pub use timeline::{group_by_day, DayGroup};

/// A baby whose care is being tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabyProfile {
    pub id: String,
    pub name: String,
    /// Calendar date only; age is always derived from it.
    pub birth_date: NaiveDate,
    pub gender: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BabyProfile {
    /// Create a new profile with a fresh id.
    ///
    /// # Errors
    /// Rejects an empty name or a birth date after `now`.
    pub fn new(
        name: &str,
        birth_date: NaiveDate,
        gender: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::invalid("name", "must not be empty"));
        }
        age::age_in_days(birth_date, now)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            birth_date,
            gender,
            created_at: now,
        })
    }

    pub fn age_in_days(&self, now: DateTime<Utc>) -> Result<u32, ValidationError> {
        age::age_in_days(self.birth_date, now)
    }

    pub fn age_label(&self, now: DateTime<Utc>) -> Result<AgeLabel, ValidationError> {
        Ok(age::human_age_label(self.age_in_days(now)?))
    }
}

/// Kind of logged care event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Feeding,
    Sleep,
    Diaper,
    Play,
    Medicine,
    Other,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 6] = [
        ActivityCategory::Feeding,
        ActivityCategory::Sleep,
        ActivityCategory::Diaper,
        ActivityCategory::Play,
        ActivityCategory::Medicine,
        ActivityCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Feeding => "feeding",
            ActivityCategory::Sleep => "sleep",
            ActivityCategory::Diaper => "diaper",
            ActivityCategory::Play => "play",
            ActivityCategory::Medicine => "medicine",
            ActivityCategory::Other => "other",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::invalid("activity_type", format!("unknown category '{s}'")))
    }
}

/// How a feeding was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedingMethod {
    Breast,
    Bottle,
    Solid,
}

impl FromStr for FeedingMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breast" => Ok(FeedingMethod::Breast),
            "bottle" => Ok(FeedingMethod::Bottle),
            "solid" => Ok(FeedingMethod::Solid),
            other => Err(ValidationError::invalid("method", format!("unknown feeding method '{other}'"))),
        }
    }
}

/// What a diaper contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiaperKind {
    Wet,
    Dirty,
    Both,
}

impl FromStr for DiaperKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wet" => Ok(DiaperKind::Wet),
            "dirty" => Ok(DiaperKind::Dirty),
            "both" => Ok(DiaperKind::Both),
            other => Err(ValidationError::invalid("kind", format!("unknown diaper kind '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiaperCondition {
    Normal,
    Loose,
    Hard,
    Unusual,
}

impl FromStr for DiaperCondition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(DiaperCondition::Normal),
            "loose" => Ok(DiaperCondition::Loose),
            "hard" => Ok(DiaperCondition::Hard),
            "unusual" => Ok(DiaperCondition::Unusual),
            other => Err(ValidationError::invalid(
                "condition",
                format!("unknown diaper condition '{other}'"),
            )),
        }
    }
}

/// Category-specific annotations on an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ActivityDetails {
    Feeding {
        #[serde(default)]
        method: Option<FeedingMethod>,
        /// Amount as entered (ml or oz).
        #[serde(default)]
        amount: Option<f64>,
    },
    Diaper {
        #[serde(default)]
        kind: Option<DiaperKind>,
        #[serde(default)]
        condition: Option<DiaperCondition>,
    },
    Medicine {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        dosage: Option<String>,
    },
}

impl ActivityDetails {
    /// The only activity category these details may annotate.
    pub fn category(&self) -> ActivityCategory {
        match self {
            ActivityDetails::Feeding { .. } => ActivityCategory::Feeding,
            ActivityDetails::Diaper { .. } => ActivityCategory::Diaper,
            ActivityDetails::Medicine { .. } => ActivityCategory::Medicine,
        }
    }
}

/// A logged care event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareActivity {
    pub id: String,
    pub baby_id: String,
    pub category: ActivityCategory,
    pub start_time: DateTime<Utc>,
    /// `None` while ongoing, or for instantaneous events.
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub details: Option<ActivityDetails>,
}

impl CareActivity {
    /// Create a new activity with a fresh id.
    ///
    /// # Errors
    /// See [`CareActivity::validate`].
    pub fn new(
        baby_id: &str,
        category: ActivityCategory,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
        notes: Option<String>,
        details: Option<ActivityDetails>,
    ) -> Result<Self, ValidationError> {
        let activity = Self {
            id: Uuid::new_v4().to_string(),
            baby_id: baby_id.to_string(),
            category,
            start_time,
            end_time,
            notes,
            details,
        };
        activity.validate()?;
        Ok(activity)
    }

    /// Check the activity's own invariants: end not before start, details
    /// matching the category.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        age::duration_minutes(self.start_time, self.end_time)?;
        if let Some(details) = &self.details {
            let expected = details.category();
            if expected != self.category {
                return Err(ValidationError::DetailsMismatch {
                    category: self.category.as_str(),
                    details: expected.as_str(),
                });
            }
        }
        Ok(())
    }

    pub fn is_ongoing(&self) -> bool {
        self.end_time.is_none()
    }

    /// Whole minutes, or `None` while ongoing.
    pub fn duration_minutes(&self) -> Result<Option<i64>, ValidationError> {
        age::duration_minutes(self.start_time, self.end_time)
    }

    pub fn duration_label(&self) -> Result<String, ValidationError> {
        age::duration_label(self.start_time, self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn baby_profile_rejects_blank_name_and_future_birth() {
        let birth = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert!(BabyProfile::new("  ", birth, None, now()).is_err());

        let future = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert!(matches!(
            BabyProfile::new("Mia", future, None, now()),
            Err(ValidationError::BirthDateInFuture { .. })
        ));

        let baby = BabyProfile::new(" Mia ", birth, None, now()).unwrap();
        assert_eq!(baby.name, "Mia");
        assert_eq!(baby.age_in_days(now()).unwrap(), 30);
        assert_eq!(baby.age_label(now()).unwrap().to_string(), "4 weeks old");
    }

    #[test]
    fn category_parses_round_trip() {
        for category in ActivityCategory::ALL {
            assert_eq!(category.as_str().parse::<ActivityCategory>().unwrap(), category);
        }
        assert!("nap".parse::<ActivityCategory>().is_err());
    }

    #[test]
    fn activity_rejects_mismatched_details() {
        let details = ActivityDetails::Medicine {
            name: Some("Vitamin D".into()),
            dosage: Some("1 drop".into()),
        };
        let err = CareActivity::new("b", ActivityCategory::Feeding, now(), None, None, Some(details))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DetailsMismatch {
                category: "feeding",
                details: "medicine"
            }
        );
    }

    #[test]
    fn activity_rejects_end_before_start() {
        let result = CareActivity::new(
            "b",
            ActivityCategory::Sleep,
            now(),
            Some(now() - Duration::minutes(5)),
            None,
            None,
        );
        assert!(matches!(result, Err(ValidationError::InvalidTimeRange { .. })));
    }

    #[test]
    fn details_serialize_with_category_tag() {
        let details = ActivityDetails::Diaper {
            kind: Some(DiaperKind::Both),
            condition: Some(DiaperCondition::Loose),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["category"], "diaper");
        assert_eq!(json["kind"], "both");
        assert_eq!(json["condition"], "loose");

        let parsed: ActivityDetails =
            serde_json::from_str(r#"{"category":"feeding","method":"bottle"}"#).unwrap();
        assert_eq!(
            parsed,
            ActivityDetails::Feeding {
                method: Some(FeedingMethod::Bottle),
                amount: None
            }
        );
    }
}
