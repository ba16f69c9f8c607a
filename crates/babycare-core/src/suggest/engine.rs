//! Suggestion ranking.
//!
//! Runs the rules in their fixed order and keeps the first
//! `max_suggestions` that fire.

use tracing::debug;

use super::context::SuggestionContext;
use super::feeding::predict_next_feeding;
use super::milestone::milestone_suggestions;
use super::nudge::{sleep_tracking_nudge, vitamin_d_nudge};
use super::{Suggestion, SuggestionConfig};
use crate::error::ValidationError;

/// Rule-based suggestion engine.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    config: SuggestionConfig,
}

impl SuggestionEngine {
    pub fn new(config: SuggestionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Suggestions for the baby in `context`, in rule order, at most
    /// `max_suggestions` long. An empty list means nothing applies.
    ///
    /// # Errors
    /// Rejects a birth date after `now` and any activity ending before it
    /// starts; a bad input never yields a partial list.
    pub fn suggest(&self, context: &SuggestionContext<'_>) -> Result<Vec<Suggestion>, ValidationError> {
        let age_in_days = context.baby.age_in_days(context.now)?;
        for activity in context.activities {
            activity.validate()?;
        }

        let mut suggestions = Vec::new();

        if let Some(prediction) = predict_next_feeding(context.activities, &self.config) {
            suggestions.extend(prediction.suggestion(context.now));
        }
        suggestions.extend(milestone_suggestions(age_in_days));
        suggestions.extend(vitamin_d_nudge(age_in_days, context.reminders, &self.config));
        suggestions.extend(sleep_tracking_nudge(context.activities, &self.config));

        let fired = suggestions.len();
        suggestions.truncate(self.config.max_suggestions);
        debug!(
            baby_id = %context.baby.id,
            age_in_days,
            fired,
            kept = suggestions.len(),
            "suggestions evaluated"
        );

        Ok(suggestions)
    }
}
