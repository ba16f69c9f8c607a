//! Recurring-care nudges not tied to a narrow age band.

use tracing::debug;

use super::{Priority, Suggestion, SuggestionConfig, SuggestionReason};
use crate::care::{ActivityCategory, CareActivity, Reminder, ReminderType};

/// Vitamin D supplement prompt.
///
/// Fires from `vitamin_d_min_age_days` on, unless an incomplete medicine
/// reminder already exists. Deduplication is against the reminders passed
/// in, not against earlier suggestions.
pub fn vitamin_d_nudge(
    age_in_days: u32,
    reminders: &[Reminder],
    config: &SuggestionConfig,
) -> Option<Suggestion> {
    if age_in_days < config.vitamin_d_min_age_days {
        return None;
    }

    let has_open_medicine = reminders
        .iter()
        .any(|r| r.reminder_type == ReminderType::Medicine && !r.is_completed);
    if has_open_medicine {
        debug!("open medicine reminder exists, skipping vitamin D nudge");
        return None;
    }

    Some(Suggestion {
        kind: ReminderType::Medicine,
        title: "Vitamin D Supplement".to_string(),
        message: "Daily vitamin D drops for breastfed babies".to_string(),
        scheduled_for: None,
        priority: Priority::Medium,
        reason: SuggestionReason::VitaminD { age_in_days },
    })
}

/// Prompt to log sleep when fewer than `sleep_sample_threshold` sleeps
/// appear in the recent window.
pub fn sleep_tracking_nudge(
    activities: &[CareActivity],
    config: &SuggestionConfig,
) -> Option<Suggestion> {
    let logged_sleeps = activities
        .iter()
        .filter(|a| a.category == ActivityCategory::Sleep)
        .count();
    if logged_sleeps >= config.sleep_sample_threshold {
        return None;
    }

    Some(Suggestion {
        kind: ReminderType::Tip,
        title: "Sleep Tracking Tip".to_string(),
        message: "Track sleep patterns to identify your baby's natural rhythm".to_string(),
        scheduled_for: None,
        priority: Priority::Low,
        reason: SuggestionReason::SleepTracking { logged_sleeps },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::care::ReminderDraft;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, 20, 0, 0).unwrap()
    }

    fn reminder(reminder_type: ReminderType, completed: bool) -> Reminder {
        let mut reminder = ReminderDraft::new("b", reminder_type, "r", "", None)
            .unwrap()
            .into_reminder(now());
        reminder.is_completed = completed;
        reminder
    }

    fn sleep(hours_ago: i64) -> CareActivity {
        CareActivity::new(
            "b",
            ActivityCategory::Sleep,
            now() - Duration::hours(hours_ago),
            None,
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn vitamin_d_starts_at_sixty_days() {
        let config = SuggestionConfig::default();
        assert!(vitamin_d_nudge(59, &[], &config).is_none());
        let nudge = vitamin_d_nudge(60, &[], &config).unwrap();
        assert_eq!(nudge.kind, ReminderType::Medicine);
        assert_eq!(nudge.title, "Vitamin D Supplement");
    }

    #[test]
    fn vitamin_d_suppressed_by_open_medicine_reminder_only() {
        let config = SuggestionConfig::default();
        let open = [reminder(ReminderType::Medicine, false)];
        assert!(vitamin_d_nudge(60, &open, &config).is_none());

        let done = [reminder(ReminderType::Medicine, true)];
        assert!(vitamin_d_nudge(60, &done, &config).is_some());

        let other = [reminder(ReminderType::Feeding, false)];
        assert!(vitamin_d_nudge(60, &other, &config).is_some());
    }

    #[test]
    fn sleep_nudge_below_three_logged_sleeps() {
        let config = SuggestionConfig::default();
        assert!(sleep_tracking_nudge(&[], &config).is_some());

        let two = [sleep(1), sleep(5)];
        let nudge = sleep_tracking_nudge(&two, &config).unwrap();
        assert_eq!(nudge.priority, Priority::Low);
        assert_eq!(nudge.reason, SuggestionReason::SleepTracking { logged_sleeps: 2 });

        let three = [sleep(1), sleep(5), sleep(9)];
        assert!(sleep_tracking_nudge(&three, &config).is_none());
    }
}
