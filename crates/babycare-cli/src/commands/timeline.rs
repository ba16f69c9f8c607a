//! Day-grouped activity timeline.

use babycare_core::age::time_ago_label;
use babycare_core::care::{group_by_day, ActivityDetails};
use babycare_core::{CareActivity, CareDb, Config};
use chrono::Utc;
use clap::Args;

use super::{resolve_baby, CommandResult};

#[derive(Args)]
pub struct TimelineArgs {
    /// Baby id or name (optional with a single baby)
    #[arg(long)]
    baby: Option<String>,
    /// How many recent activities to show (default from config)
    #[arg(long)]
    limit: Option<usize>,
    #[arg(long)]
    json: bool,
}

fn describe(details: &ActivityDetails) -> String {
    match details {
        ActivityDetails::Feeding { method, amount } => {
            let mut parts = Vec::new();
            if let Some(m) = method {
                parts.push(format!("{m:?}").to_lowercase());
            }
            if let Some(a) = amount {
                parts.push(a.to_string());
            }
            parts.join(" ")
        }
        ActivityDetails::Diaper { kind, condition } => [
            kind.map(|k| format!("{k:?}").to_lowercase()),
            condition.map(|c| format!("{c:?}").to_lowercase()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", "),
        ActivityDetails::Medicine { name, dosage } => [name.clone(), dosage.clone()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn line(activity: &CareActivity, now: chrono::DateTime<Utc>) -> Result<String, Box<dyn std::error::Error>> {
    let mut out = format!(
        "  {}  {:<9} {:>8}  {}",
        activity.start_time.format("%H:%M"),
        activity.category.as_str(),
        activity.duration_label()?,
        time_ago_label(activity.start_time, now)
    );
    if let Some(details) = &activity.details {
        let text = describe(details);
        if !text.is_empty() {
            out.push_str(&format!("  [{text}]"));
        }
    }
    if let Some(notes) = &activity.notes {
        out.push_str(&format!("  {notes}"));
    }
    Ok(out)
}

pub fn run(args: TimelineArgs) -> CommandResult {
    let config = Config::load()?;
    let db = CareDb::open()?;
    let now = Utc::now();
    let baby = resolve_baby(&db, args.baby.as_deref())?;

    let limit = args.limit.unwrap_or(config.limits.timeline_activities);
    let activities = db.recent_activities(&baby.id, limit)?;
    let groups = group_by_day(&activities, now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }
    if groups.is_empty() {
        println!("No activities logged for {} yet.", baby.name);
        return Ok(());
    }
    for group in groups {
        println!("{}", group.label);
        for activity in &group.activities {
            println!("{}", line(activity, now)?);
        }
    }
    Ok(())
}
