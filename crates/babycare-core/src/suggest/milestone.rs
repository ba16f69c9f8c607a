//! Age-window developmental checks.
//!
//! A band fires on every evaluation while the baby's age is inside it.
//! Nothing remembers that a band was already shown, so the same check is
//! offered again on each visit for the whole window.

use super::{Priority, Suggestion, SuggestionReason};
use crate::care::ReminderType;

/// Closed interval of ages (in days) with the prompt it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneBand {
    pub min_days: u32,
    pub max_days: u32,
    pub title: &'static str,
    pub message: &'static str,
}

/// Milestone bands, ascending and non-overlapping.
pub const MILESTONE_BANDS: &[MilestoneBand] = &[
    MilestoneBand {
        min_days: 30,
        max_days: 35,
        title: "1-Month Milestone Check",
        message: "Time to check if baby is lifting their head during tummy time",
    },
    MilestoneBand {
        min_days: 60,
        max_days: 70,
        title: "2-Month Milestone Check",
        message: "Look for social smiles and better head control",
    },
];

impl MilestoneBand {
    /// Inclusive on both ends.
    pub fn contains(&self, age_in_days: u32) -> bool {
        (self.min_days..=self.max_days).contains(&age_in_days)
    }

    pub fn suggestion(&self) -> Suggestion {
        Suggestion {
            kind: ReminderType::Milestone,
            title: self.title.to_string(),
            message: self.message.to_string(),
            scheduled_for: None,
            priority: Priority::Medium,
            reason: SuggestionReason::AgeWindow {
                min_days: self.min_days,
                max_days: self.max_days,
            },
        }
    }
}

/// Suggestions for every band containing `age_in_days`, in table order.
pub(crate) fn milestone_suggestions(age_in_days: u32) -> Vec<Suggestion> {
    MILESTONE_BANDS
        .iter()
        .filter(|band| band.contains(age_in_days))
        .map(MilestoneBand::suggestion)
        .collect()
}
