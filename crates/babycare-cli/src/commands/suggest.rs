//! Smart suggestions and turning one into a reminder.

use babycare_core::care::ReminderDraft;
use babycare_core::storage::{CareSnapshot, CareStore};
use babycare_core::{CareDb, Config, Suggestion, SuggestionEngine};
use chrono::Utc;
use clap::Args;

use super::{format_time, resolve_baby, CommandResult};

#[derive(Args)]
pub struct SuggestArgs {
    /// Baby id or name (optional with a single baby)
    #[arg(long)]
    baby: Option<String>,
    /// Create a reminder from the n-th suggestion (1-based)
    #[arg(long, value_name = "N")]
    create: Option<usize>,
    #[arg(long)]
    json: bool,
}

fn print_suggestion(index: usize, suggestion: &Suggestion) {
    println!(
        "[{}] ({}) {}",
        index + 1,
        suggestion.priority.name(),
        suggestion.title
    );
    println!("    {}", suggestion.message);
    if let Some(at) = suggestion.scheduled_for {
        println!("    due {}", format_time(at));
    }
}

pub fn run(args: SuggestArgs) -> CommandResult {
    let config = Config::load()?;
    let db = CareDb::open()?;
    let now = Utc::now();
    let baby = resolve_baby(&db, args.baby.as_deref())?;

    let snapshot = CareSnapshot::load(&db, &baby.id, &config.limits)?;
    let engine = SuggestionEngine::new(config.suggestions.clone());
    let suggestions = snapshot.suggestions(&engine, now)?;

    if let Some(n) = args.create {
        let suggestion = n
            .checked_sub(1)
            .and_then(|i| suggestions.get(i))
            .ok_or_else(|| format!("no suggestion #{n}, there are {}", suggestions.len()))?;
        let reminder = db.create_reminder(ReminderDraft::from_suggestion(&baby.id, suggestion), now)?;
        println!("Reminder created: {}", reminder.id);
        println!("{}", serde_json::to_string_pretty(&reminder)?);
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else if suggestions.is_empty() {
        println!("No suggestions for {} right now.", baby.name);
    } else {
        for (i, suggestion) in suggestions.iter().enumerate() {
            print_suggestion(i, suggestion);
        }
    }
    Ok(())
}
