//! Today's care summary: feedings, sleep and diaper changes against targets.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ActivityCategory, CareActivity};
use crate::age::format_hours_minutes;
use crate::error::ValidationError;

/// Daily goals the summary measures progress against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTargets {
    #[serde(default = "default_feedings")]
    pub feedings: u64,
    #[serde(default = "default_sleep_minutes")]
    pub sleep_minutes: u64,
    #[serde(default = "default_diapers")]
    pub diapers: u64,
}

fn default_feedings() -> u64 {
    8
}
fn default_sleep_minutes() -> u64 {
    720
}
fn default_diapers() -> u64 {
    6
}

impl Default for DailyTargets {
    fn default() -> Self {
        Self {
            feedings: default_feedings(),
            sleep_minutes: default_sleep_minutes(),
            diapers: default_diapers(),
        }
    }
}

/// One metric with its target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatProgress {
    pub label: &'static str,
    pub value: u64,
    pub target: u64,
    /// 0.0..=100.0
    pub percent: f64,
}

impl StatProgress {
    fn new(label: &'static str, value: u64, target: u64) -> Self {
        let percent = if target == 0 {
            100.0
        } else {
            (value as f64 / target as f64 * 100.0).min(100.0)
        };
        Self {
            label,
            value,
            target,
            percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Every activity that started today, any category.
    pub total_activities: usize,
    pub feedings: StatProgress,
    /// Minutes of finished sleep; ongoing sleep is not counted.
    pub sleep: StatProgress,
    pub diapers: StatProgress,
}

impl DailySummary {
    /// Summarize the activities that started on the UTC calendar day of `now`.
    ///
    /// # Errors
    /// Fails on a sleep activity whose end precedes its start.
    pub fn compute(
        activities: &[CareActivity],
        now: DateTime<Utc>,
        targets: &DailyTargets,
    ) -> Result<Self, ValidationError> {
        let date = now.date_naive();
        let today: Vec<&CareActivity> = activities
            .iter()
            .filter(|a| a.start_time.date_naive() == date)
            .collect();

        let count = |category: ActivityCategory| {
            today.iter().filter(|a| a.category == category).count() as u64
        };

        let mut sleep_minutes: u64 = 0;
        for activity in today.iter().filter(|a| a.category == ActivityCategory::Sleep) {
            if let Some(minutes) = activity.duration_minutes()? {
                sleep_minutes += minutes as u64;
            }
        }

        Ok(Self {
            date,
            total_activities: today.len(),
            feedings: StatProgress::new("Feedings Today", count(ActivityCategory::Feeding), targets.feedings),
            sleep: StatProgress::new("Sleep Today", sleep_minutes, targets.sleep_minutes),
            diapers: StatProgress::new("Diaper Changes", count(ActivityCategory::Diaper), targets.diapers),
        })
    }

    pub fn sleep_label(&self) -> String {
        format_hours_minutes(self.sleep.value as i64)
    }

    pub fn is_empty(&self) -> bool {
        self.total_activities == 0
    }
}
