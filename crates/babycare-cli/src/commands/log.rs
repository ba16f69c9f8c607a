//! Activity logging.

use babycare_core::care::{DiaperCondition, DiaperKind, FeedingMethod};
use babycare_core::{ActivityCategory, ActivityDetails, CareActivity, CareDb};
use chrono::Utc;
use clap::Args;

use super::{format_time, parse_time, resolve_baby, CommandResult};

#[derive(Args)]
pub struct LogArgs {
    /// feeding, sleep, diaper, play, medicine or other
    category: String,
    /// Baby id or name (optional with a single baby)
    #[arg(long)]
    baby: Option<String>,
    /// Start time: now, -30m, "YYYY-MM-DD HH:MM" (UTC)
    #[arg(long, default_value = "now", allow_hyphen_values = true)]
    start: String,
    /// End time; leave out for ongoing or instant events
    #[arg(long, allow_hyphen_values = true)]
    end: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// Feeding: breast, bottle or solid
    #[arg(long)]
    method: Option<String>,
    /// Feeding: amount in ml or oz
    #[arg(long)]
    amount: Option<f64>,
    /// Diaper: wet, dirty or both
    #[arg(long)]
    kind: Option<String>,
    /// Diaper: normal, loose, hard or unusual
    #[arg(long)]
    condition: Option<String>,
    /// Medicine: name
    #[arg(long)]
    medicine: Option<String>,
    /// Medicine: dosage
    #[arg(long)]
    dosage: Option<String>,
}

impl LogArgs {
    fn details(&self, category: ActivityCategory) -> Result<Option<ActivityDetails>, Box<dyn std::error::Error>> {
        let feeding = self.method.is_some() || self.amount.is_some();
        let diaper = self.kind.is_some() || self.condition.is_some();
        let medicine = self.medicine.is_some() || self.dosage.is_some();

        let details = match category {
            ActivityCategory::Feeding if feeding => Some(ActivityDetails::Feeding {
                method: self.method.as_deref().map(str::parse::<FeedingMethod>).transpose()?,
                amount: self.amount,
            }),
            ActivityCategory::Diaper if diaper => Some(ActivityDetails::Diaper {
                kind: self.kind.as_deref().map(str::parse::<DiaperKind>).transpose()?,
                condition: self
                    .condition
                    .as_deref()
                    .map(str::parse::<DiaperCondition>)
                    .transpose()?,
            }),
            ActivityCategory::Medicine if medicine => Some(ActivityDetails::Medicine {
                name: self.medicine.clone(),
                dosage: self.dosage.clone(),
            }),
            _ => None,
        };

        let stray = match category {
            ActivityCategory::Feeding => diaper || medicine,
            ActivityCategory::Diaper => feeding || medicine,
            ActivityCategory::Medicine => feeding || diaper,
            _ => feeding || diaper || medicine,
        };
        if stray {
            return Err(format!("detail flags given do not apply to a {category} activity").into());
        }
        Ok(details)
    }
}

pub fn run(args: LogArgs) -> CommandResult {
    let db = CareDb::open()?;
    let now = Utc::now();
    let baby = resolve_baby(&db, args.baby.as_deref())?;

    let category: ActivityCategory = args.category.parse()?;
    let start = parse_time(&args.start, now)?;
    let end = args.end.as_deref().map(|e| parse_time(e, now)).transpose()?;
    let details = args.details(category)?;

    let activity = CareActivity::new(&baby.id, category, start, end, args.notes.clone(), details)?;
    db.log_activity(&activity)?;

    println!("Logged {} for {}: {}", category, baby.name, activity.id);
    println!(
        "  started {}  duration {}",
        format_time(activity.start_time),
        activity.duration_label()?
    );
    Ok(())
}
