use babycare_core::{CareDb, TipCursor};
use chrono::Utc;
use clap::Args;

use super::{resolve_baby, CommandResult};

#[derive(Args)]
pub struct TipsArgs {
    /// Baby id or name (optional with a single baby)
    #[arg(long)]
    baby: Option<String>,
    /// Advance this many tips before showing one
    #[arg(long, default_value_t = 0)]
    next: usize,
    #[arg(long)]
    json: bool,
}

pub fn run(args: TipsArgs) -> CommandResult {
    let db = CareDb::open()?;
    let now = Utc::now();
    let baby = resolve_baby(&db, args.baby.as_deref())?;
    let age = baby.age_in_days(now)?;

    // The cursor lives for this invocation only.
    let mut cursor = TipCursor::new();
    cursor.select_baby(&baby.id);
    for _ in 0..args.next {
        cursor.next(age);
    }
    let view = cursor.current(age);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{view}");
    }
    Ok(())
}
