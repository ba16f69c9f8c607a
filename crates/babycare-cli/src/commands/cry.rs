use babycare_core::age::time_ago_label;
use babycare_core::{CareDb, Config, CryAnalysis, CryAssessment, CryNeed};
use chrono::Utc;
use clap::Subcommand;

use super::{resolve_baby, CommandResult};

#[derive(Subcommand)]
pub enum CryAction {
    /// Record the result of a cry classification
    Record {
        /// hunger, sleep, discomfort, attention or pain
        #[arg(long)]
        need: String,
        /// Classifier confidence, 0.0 to 1.0
        #[arg(long)]
        confidence: f64,
        /// Baby id or name (optional with a single baby)
        #[arg(long)]
        baby: Option<String>,
    },
    /// Recent analyses, newest first
    History {
        #[arg(long)]
        baby: Option<String>,
        /// Defaults to limits.cry_history
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CryAction) -> CommandResult {
    let db = CareDb::open()?;
    let now = Utc::now();

    match action {
        CryAction::Record {
            need,
            confidence,
            baby,
        } => {
            let baby = resolve_baby(&db, baby.as_deref())?;
            let need: CryNeed = need.parse()?;
            let analysis = CryAnalysis::new(&baby.id, CryAssessment::new(need, confidence)?, now);
            db.record_cry_analysis(&analysis)?;

            let assessment = &analysis.assessment;
            println!(
                "{} ({}% confidence)",
                assessment.description,
                assessment.confidence_percent()
            );
            for tip in &assessment.recommendations {
                println!("  - {tip}");
            }
        }
        CryAction::History { baby, limit, json } => {
            let config = Config::load()?;
            let baby = resolve_baby(&db, baby.as_deref())?;
            let limit = limit.unwrap_or(config.limits.cry_history);
            let history = db.recent_cry_analyses(&baby.id, limit)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else if history.is_empty() {
                println!("No cry analyses for {} yet.", baby.name);
            } else {
                for analysis in &history {
                    println!(
                        "{:<8} {:>3}%  {}",
                        analysis.assessment.need.as_str(),
                        analysis.assessment.confidence_percent(),
                        time_ago_label(analysis.created_at, now)
                    );
                }
            }
        }
    }
    Ok(())
}
