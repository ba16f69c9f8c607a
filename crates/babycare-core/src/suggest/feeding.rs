//! Feeding-interval prediction.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::{Priority, Suggestion, SuggestionConfig, SuggestionReason};
use crate::care::{ActivityCategory, CareActivity, ReminderType};

/// When the next feeding is expected, from the recent rhythm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedingPrediction {
    pub last_feeding: DateTime<Utc>,
    /// Mean gap between consecutive sampled feedings
    pub average_interval: Duration,
    pub next_feeding: DateTime<Utc>,
    /// Feedings that went into the average
    pub samples: usize,
}

impl FeedingPrediction {
    /// A suggestion for this prediction, only if it still lies ahead of `now`.
    pub fn suggestion(&self, now: DateTime<Utc>) -> Option<Suggestion> {
        if self.next_feeding <= now {
            debug!(
                next_feeding = %self.next_feeding,
                %now,
                "predicted feeding already passed, suppressing"
            );
            return None;
        }

        Some(Suggestion {
            kind: ReminderType::Feeding,
            title: "Next Feeding Reminder".to_string(),
            message: format!(
                "Based on recent patterns, next feeding is due around {}",
                self.next_feeding.format("%H:%M")
            ),
            scheduled_for: Some(self.next_feeding),
            priority: Priority::High,
            reason: SuggestionReason::FeedingPattern {
                samples: self.samples,
                average_interval_minutes: self.average_interval.num_minutes(),
            },
        })
    }
}

/// Project the next feeding from the most recent feedings.
///
/// Takes the newest `feeding_sample_size` feedings, averages the gaps
/// between neighbours (in milliseconds) and adds that to the newest one.
/// Returns `None` with fewer than `min_feedings` (at least 2) samples.
pub fn predict_next_feeding(
    activities: &[CareActivity],
    config: &SuggestionConfig,
) -> Option<FeedingPrediction> {
    let mut starts: Vec<DateTime<Utc>> = activities
        .iter()
        .filter(|a| a.category == ActivityCategory::Feeding)
        .map(|a| a.start_time)
        .collect();
    starts.sort_by(|a, b| b.cmp(a));
    starts.truncate(config.feeding_sample_size);

    let required = config.min_feedings.max(2);
    if starts.len() < required {
        debug!(found = starts.len(), required, "not enough feedings to predict");
        return None;
    }

    let total_ms: i64 = starts
        .windows(2)
        .map(|pair| (pair[0] - pair[1]).num_milliseconds())
        .sum();
    let average_interval = Duration::milliseconds(total_ms / (starts.len() as i64 - 1));
    let last_feeding = starts[0];

    Some(FeedingPrediction {
        last_feeding,
        average_interval,
        next_feeding: last_feeding + average_interval,
        samples: starts.len(),
    })
}
