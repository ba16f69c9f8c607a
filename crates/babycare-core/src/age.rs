//! Age and duration arithmetic.
//!
//! Every rule in the suggestion engine, the tip catalog and the display
//! helpers works off whole-day ages and whole-minute durations computed
//! here. All conversions floor; nothing rounds up a partial unit.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Whole days elapsed between midnight (UTC) of `birth_date` and `now`.
///
/// # Errors
/// Returns [`ValidationError::BirthDateInFuture`] when the birth date falls
/// after the calendar date of `now`.
pub fn age_in_days(birth_date: NaiveDate, now: DateTime<Utc>) -> Result<u32, ValidationError> {
    let today = now.date_naive();
    if birth_date > today {
        return Err(ValidationError::BirthDateInFuture { birth_date, today });
    }

    let born_at = birth_date.and_time(NaiveTime::MIN).and_utc();
    let days = (now - born_at).num_days();
    u32::try_from(days).map_err(|_| ValidationError::invalid("birth_date", "age out of range"))
}

/// Whole minutes between `start` and `end`.
///
/// `None` means the activity has no end yet; callers exclude it from
/// duration aggregates.
///
/// # Errors
/// Returns [`ValidationError::InvalidTimeRange`] when `end` precedes `start`.
pub fn duration_minutes(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<Option<i64>, ValidationError> {
    let Some(end) = end else {
        return Ok(None);
    };
    if end < start {
        return Err(ValidationError::InvalidTimeRange { start, end });
    }
    Ok(Some((end - start).num_milliseconds() / MS_PER_MINUTE))
}

/// Unit chosen for a human-readable age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Days,
    Weeks,
    Months,
}

impl AgeUnit {
    /// Plural unit name.
    pub fn name(&self) -> &'static str {
        match self {
            AgeUnit::Days => "days",
            AgeUnit::Weeks => "weeks",
            AgeUnit::Months => "months",
        }
    }

    fn singular(&self) -> &'static str {
        match self {
            AgeUnit::Days => "day",
            AgeUnit::Weeks => "week",
            AgeUnit::Months => "month",
        }
    }
}

/// Display-only age, e.g. "3 weeks old".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeLabel {
    pub value: u32,
    pub unit: AgeUnit,
}

impl fmt::Display for AgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.value == 1 {
            self.unit.singular()
        } else {
            self.unit.name()
        };
        write!(f, "{} {} old", self.value, unit)
    }
}

/// Pick the display unit for an age: days below 7, weeks below 60,
/// months (30-day) from there on.
pub fn human_age_label(age_in_days: u32) -> AgeLabel {
    if age_in_days < 7 {
        AgeLabel {
            value: age_in_days,
            unit: AgeUnit::Days,
        }
    } else if age_in_days < 60 {
        AgeLabel {
            value: age_in_days / 7,
            unit: AgeUnit::Weeks,
        }
    } else {
        AgeLabel {
            value: age_in_days / 30,
            unit: AgeUnit::Months,
        }
    }
}

/// Whole months in the 30-day sense used by the tip panel footer.
pub fn age_in_months(age_in_days: u32) -> u32 {
    age_in_days / 30
}

/// Render minutes as "{h}h {m}m".
pub fn format_hours_minutes(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Duration of an activity for the timeline: "Ongoing", "45m" or "1h 30m".
///
/// # Errors
/// Returns [`ValidationError::InvalidTimeRange`] when `end` precedes `start`.
pub fn duration_label(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<String, ValidationError> {
    Ok(match duration_minutes(start, end)? {
        None => "Ongoing".to_string(),
        Some(minutes) if minutes < 60 => format!("{minutes}m"),
        Some(minutes) => format_hours_minutes(minutes),
    })
}

/// Relative age of a past event: "5m ago", "3h ago", "2d ago".
///
/// Timestamps after `now` are treated as happening just now.
pub fn time_ago_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_ms = (now - at).num_milliseconds().max(0);
    let hours = elapsed_ms / MS_PER_HOUR;

    if hours < 1 {
        format!("{}m ago", elapsed_ms / MS_PER_MINUTE)
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", hours / 24)
    }
}

/// Signed whole hours from `now` until `at`, floored toward negative
/// infinity so that anything overdue reports at least one hour.
pub(crate) fn hours_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (at - now).num_milliseconds().div_euclid(MS_PER_HOUR)
}
