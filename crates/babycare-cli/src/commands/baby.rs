//! Baby profile commands.

use babycare_core::{BabyProfile, CareDb};
use chrono::Utc;
use clap::Subcommand;

use super::{parse_date, CommandResult};

#[derive(Subcommand)]
pub enum BabyAction {
    /// Add a baby
    Add {
        /// Baby's name
        name: String,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: String,
        #[arg(long)]
        gender: Option<String>,
    },
    /// List babies
    List {
        #[arg(long)]
        json: bool,
    },
    /// Update a baby's profile
    Update {
        /// Baby id or name
        baby: String,
        #[arg(long)]
        name: Option<String>,
        /// New birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long)]
        gender: Option<String>,
    },
    /// Remove a baby and everything logged for them
    Remove {
        /// Baby id or name
        baby: String,
    },
}

pub fn run(action: BabyAction) -> CommandResult {
    let db = CareDb::open()?;
    let now = Utc::now();

    match action {
        BabyAction::Add {
            name,
            birth_date,
            gender,
        } => {
            let baby = BabyProfile::new(&name, parse_date(&birth_date)?, gender, now)?;
            db.add_baby(&baby)?;
            println!("Baby added: {}", baby.id);
            println!("{} ({})", baby.name, baby.age_label(now)?);
        }
        BabyAction::List { json } => {
            let babies = db.list_babies()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&babies)?);
            } else if babies.is_empty() {
                println!("No babies yet.");
            } else {
                for baby in babies {
                    println!(
                        "{}  {}  born {}  {}",
                        baby.id,
                        baby.name,
                        baby.birth_date,
                        baby.age_label(now)?
                    );
                }
            }
        }
        BabyAction::Update {
            baby,
            name,
            birth_date,
            gender,
        } => {
            let mut profile = db.find_baby(&baby)?;
            if let Some(n) = name {
                let n = n.trim();
                if n.is_empty() {
                    return Err("name must not be empty".into());
                }
                profile.name = n.to_string();
            }
            if let Some(d) = birth_date {
                profile.birth_date = parse_date(&d)?;
                profile.age_in_days(now)?;
            }
            if let Some(g) = gender {
                profile.gender = Some(g);
            }
            db.update_baby(&profile)?;
            println!("Baby updated:");
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        BabyAction::Remove { baby } => {
            let profile = db.find_baby(&baby)?;
            db.delete_baby(&profile.id)?;
            println!("Baby removed: {}", profile.name);
        }
    }
    Ok(())
}
