//! Reminder management commands for CLI.

use babycare_core::care::ReminderBoard;
use babycare_core::storage::CareStore;
use babycare_core::{CareDb, Config, Reminder, ReminderDraft, ReminderType};
use chrono::{DateTime, Utc};
use clap::Subcommand;

use super::{parse_time, resolve_baby, CommandResult};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Add a reminder
    Add {
        /// feeding, sleep, medicine, appointment, milestone, tip, diaper, play or other
        #[arg(long = "type")]
        reminder_type: String,
        /// Baby id or name (optional with a single baby)
        #[arg(long)]
        baby: Option<String>,
        /// Title (defaults to the type's preset)
        #[arg(long)]
        title: Option<String>,
        /// Message (defaults to the type's preset)
        #[arg(long)]
        message: Option<String>,
        /// When it is due: -30m, "YYYY-MM-DD HH:MM" (UTC), ...
        #[arg(long, allow_hyphen_values = true)]
        at: Option<String>,
    },
    /// List pending and recently completed reminders
    List {
        #[arg(long)]
        baby: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Mark a reminder as done
    Done {
        /// Reminder ID
        id: String,
    },
    /// Mark a reminder as not done
    Undo {
        /// Reminder ID
        id: String,
    },
    /// Delete a reminder
    Remove {
        /// Reminder ID
        id: String,
    },
}

fn print_reminder(reminder: &Reminder, now: DateTime<Utc>) {
    let mark = if reminder.is_completed { "x" } else { " " };
    println!(
        "[{mark}] {}  {} ({})  {}",
        reminder.id,
        reminder.title,
        reminder.reminder_type,
        reminder.due_status(now)
    );
    if !reminder.message.is_empty() {
        println!("      {}", reminder.message);
    }
}

pub fn run(action: ReminderAction) -> CommandResult {
    let db = CareDb::open()?;
    let now = Utc::now();

    match action {
        ReminderAction::Add {
            reminder_type,
            baby,
            title,
            message,
            at,
        } => {
            let baby = resolve_baby(&db, baby.as_deref())?;
            let reminder_type: ReminderType = reminder_type.parse()?;
            let scheduled_for = at.as_deref().map(|a| parse_time(a, now)).transpose()?;
            let draft = match title {
                Some(title) => {
                    let message = message
                        .or_else(|| reminder_type.preset().map(|p| p.message.to_string()))
                        .unwrap_or_default();
                    ReminderDraft::new(&baby.id, reminder_type, &title, &message, scheduled_for)?
                }
                None => {
                    let mut draft = ReminderDraft::from_preset(&baby.id, reminder_type, scheduled_for)?;
                    if let Some(message) = message {
                        draft.message = message;
                    }
                    draft
                }
            };
            let reminder = db.create_reminder(draft, now)?;
            println!("Reminder created: {}", reminder.id);
            print_reminder(&reminder, now);
        }
        ReminderAction::List { baby, json } => {
            let config = Config::load()?;
            let baby = resolve_baby(&db, baby.as_deref())?;
            let board = ReminderBoard::build(
                &db.list_reminders(&baby.id)?,
                config.limits.completed_reminders_shown,
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else if board.is_empty() {
                println!("No reminders for {}.", baby.name);
            } else {
                println!("Pending");
                for reminder in &board.pending {
                    print_reminder(reminder, now);
                }
                if !board.completed.is_empty() {
                    println!("Completed");
                    for reminder in &board.completed {
                        print_reminder(reminder, now);
                    }
                }
            }
        }
        ReminderAction::Done { id } => {
            db.set_reminder_completed(&id, true)?;
            println!("Reminder completed: {id}");
        }
        ReminderAction::Undo { id } => {
            db.set_reminder_completed(&id, false)?;
            println!("Reminder reopened: {id}");
        }
        ReminderAction::Remove { id } => {
            db.delete_reminder(&id)?;
            println!("Reminder deleted: {id}");
        }
    }
    Ok(())
}
