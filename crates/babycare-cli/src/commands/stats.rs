use babycare_core::age::format_hours_minutes;
use babycare_core::care::StatProgress;
use babycare_core::{CareDb, Config, DailySummary};
use chrono::{NaiveTime, Utc};
use clap::Subcommand;

use super::{resolve_baby, CommandResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today {
        /// Baby id or name (optional with a single baby)
        #[arg(long)]
        baby: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

fn progress_line(stat: &StatProgress, render: impl Fn(u64) -> String) -> String {
    format!(
        "{:<16} {} / {} ({:.0}%)",
        stat.label,
        render(stat.value),
        render(stat.target),
        stat.percent
    )
}

pub fn run(action: StatsAction) -> CommandResult {
    let config = Config::load()?;
    let db = CareDb::open()?;
    let now = Utc::now();

    match action {
        StatsAction::Today { baby, json } => {
            let baby = resolve_baby(&db, baby.as_deref())?;
            let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
            let activities = db.activities_since(&baby.id, midnight)?;
            let summary = DailySummary::compute(&activities, now, &config.daily_targets)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }
            println!("{} on {}", baby.name, summary.date);
            println!("{}", progress_line(&summary.feedings, |v| v.to_string()));
            println!(
                "{}",
                progress_line(&summary.sleep, |v| format_hours_minutes(v as i64))
            );
            println!("{}", progress_line(&summary.diapers, |v| v.to_string()));
            println!("{:<16} {}", "Total Activities", summary.total_activities);
        }
    }
    Ok(())
}
