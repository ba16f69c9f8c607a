//! Input snapshot for one suggestion pass.

use chrono::{DateTime, Utc};

use crate::care::{BabyProfile, CareActivity, Reminder};

/// Everything the engine looks at, already fetched and scoped to one baby.
///
/// Activities are expected newest first and capped by the caller; the
/// feeding predictor re-sorts its own sample so ordering mistakes cannot
/// skew the interval.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionContext<'a> {
    pub baby: &'a BabyProfile,
    pub activities: &'a [CareActivity],
    pub reminders: &'a [Reminder],
    pub now: DateTime<Utc>,
}

impl<'a> SuggestionContext<'a> {
    pub fn new(
        baby: &'a BabyProfile,
        activities: &'a [CareActivity],
        reminders: &'a [Reminder],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            baby,
            activities,
            reminders,
            now,
        }
    }
}
