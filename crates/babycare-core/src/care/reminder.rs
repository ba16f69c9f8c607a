//! Reminders: persisted, user-facing care prompts.
//!
//! The suggestion engine only reads reminders (to avoid duplicate medicine
//! nudges). Turning a suggestion into a reminder goes through a
//! [`ReminderDraft`] handed to the storage layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::age::hours_until;
use crate::error::ValidationError;
use crate::suggest::Suggestion;

/// Reminder type: every activity category plus appointment, milestone and tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    Feeding,
    Sleep,
    Diaper,
    Play,
    Medicine,
    Other,
    Appointment,
    Milestone,
    Tip,
}

impl ReminderType {
    pub const ALL: [ReminderType; 9] = [
        ReminderType::Feeding,
        ReminderType::Sleep,
        ReminderType::Diaper,
        ReminderType::Play,
        ReminderType::Medicine,
        ReminderType::Other,
        ReminderType::Appointment,
        ReminderType::Milestone,
        ReminderType::Tip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::Feeding => "feeding",
            ReminderType::Sleep => "sleep",
            ReminderType::Diaper => "diaper",
            ReminderType::Play => "play",
            ReminderType::Medicine => "medicine",
            ReminderType::Other => "other",
            ReminderType::Appointment => "appointment",
            ReminderType::Milestone => "milestone",
            ReminderType::Tip => "tip",
        }
    }

    /// Default title and message offered when the user picks this type.
    pub fn preset(&self) -> Option<ReminderPreset> {
        let (title, message) = match self {
            ReminderType::Feeding => ("Feeding Time", "Time for baby's next feeding session"),
            ReminderType::Sleep => ("Nap Time", "Put baby down for their scheduled nap"),
            ReminderType::Medicine => ("Medicine Time", "Give baby their prescribed medication"),
            ReminderType::Appointment => ("Doctor Appointment", "Upcoming pediatrician visit"),
            ReminderType::Milestone => ("Development Milestone", "Check baby's developmental progress"),
            ReminderType::Tip => ("Parenting Tip", "Remember to practice tummy time daily"),
            ReminderType::Diaper | ReminderType::Play | ReminderType::Other => return None,
        };
        Some(ReminderPreset { title, message })
    }
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::invalid("reminder_type", format!("unknown reminder type '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPreset {
    pub title: &'static str,
    pub message: &'static str,
}

/// A persisted reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub baby_id: String,
    pub title: String,
    pub message: String,
    pub reminder_type: ReminderType,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn due_status(&self, now: DateTime<Utc>) -> DueStatus {
        DueStatus::of(self.scheduled_for, now)
    }

    /// Scheduled strictly before `now`. Unscheduled reminders are never overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_for.is_some_and(|at| at < now)
    }
}

/// Input of the reminder-creation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderDraft {
    pub baby_id: String,
    pub title: String,
    pub message: String,
    pub reminder_type: ReminderType,
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl ReminderDraft {
    /// Build a draft from user-entered fields.
    ///
    /// # Errors
    /// Rejects an empty title.
    pub fn new(
        baby_id: &str,
        reminder_type: ReminderType,
        title: &str,
        message: &str,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::invalid("title", "must not be empty"));
        }
        Ok(Self {
            baby_id: baby_id.to_string(),
            title: title.to_string(),
            message: message.trim().to_string(),
            reminder_type,
            scheduled_for: scheduled_for.map(truncate_to_minute),
        })
    }

    /// Build a draft prefilled from the type's preset.
    ///
    /// # Errors
    /// Fails for types without a preset.
    pub fn from_preset(
        baby_id: &str,
        reminder_type: ReminderType,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        let preset = reminder_type.preset().ok_or_else(|| {
            ValidationError::invalid(
                "reminder_type",
                format!("no preset for '{reminder_type}', a title is required"),
            )
        })?;
        Self::new(baby_id, reminder_type, preset.title, preset.message, scheduled_for)
    }

    /// Materialize an engine suggestion. The schedule is cut to the minute.
    pub fn from_suggestion(baby_id: &str, suggestion: &Suggestion) -> Self {
        Self {
            baby_id: baby_id.to_string(),
            title: suggestion.title.clone(),
            message: suggestion.message.clone(),
            reminder_type: suggestion.kind,
            scheduled_for: suggestion.scheduled_for.map(truncate_to_minute),
        }
    }

    /// Turn the draft into a new, incomplete reminder.
    pub fn into_reminder(self, now: DateTime<Utc>) -> Reminder {
        Reminder {
            id: Uuid::new_v4().to_string(),
            baby_id: self.baby_id,
            title: self.title,
            message: self.message,
            reminder_type: self.reminder_type,
            scheduled_for: self.scheduled_for,
            is_completed: false,
            created_at: now,
        }
    }
}

fn truncate_to_minute(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

/// When a reminder is due relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DueStatus {
    NoDueDate,
    Overdue { hours: i64 },
    DueIn { hours: i64 },
    Scheduled { date: NaiveDate },
}

impl DueStatus {
    pub fn of(scheduled_for: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(at) = scheduled_for else {
            return DueStatus::NoDueDate;
        };
        let hours = hours_until(at, now);
        if hours < 0 {
            DueStatus::Overdue { hours: -hours }
        } else if hours < 24 {
            DueStatus::DueIn { hours }
        } else {
            DueStatus::Scheduled {
                date: at.date_naive(),
            }
        }
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueStatus::NoDueDate => f.write_str("No due date"),
            DueStatus::Overdue { hours } => write!(f, "Overdue by {hours}h"),
            DueStatus::DueIn { hours } => write!(f, "Due in {hours}h"),
            DueStatus::Scheduled { date } => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Reminders split the way the reminder list shows them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReminderBoard {
    /// Incomplete, soonest first, unscheduled last.
    pub pending: Vec<Reminder>,
    /// The first `completed_limit` completed reminders, in input order.
    pub completed: Vec<Reminder>,
}

impl ReminderBoard {
    pub fn build(reminders: &[Reminder], completed_limit: usize) -> Self {
        let mut pending: Vec<Reminder> = reminders
            .iter()
            .filter(|r| !r.is_completed)
            .cloned()
            .collect();
        pending.sort_by_key(|r| (r.scheduled_for.is_none(), r.scheduled_for));

        let completed = reminders
            .iter()
            .filter(|r| r.is_completed)
            .take(completed_limit)
            .cloned()
            .collect();

        Self { pending, completed }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }
}
