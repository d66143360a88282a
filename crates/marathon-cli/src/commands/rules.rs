use std::error::Error;
use std::path::PathBuf;

use clap::Subcommand;
use marathon_core::{star_rating, week_bonus, window_for, DayScore};

#[derive(Subcommand)]
pub enum RulesAction {
    /// Star rating for a progress score
    Rating { progress: f64 },
    /// Day window for a week index (1-5)
    Week { week_index: u32 },
    /// Bonus eligibility from a JSON array of {dayNumber, progress}
    Bonus {
        week_index: u32,
        /// Path to the day-score JSON file
        days_file: PathBuf,
    },
}

pub fn run(action: RulesAction) -> Result<(), Box<dyn Error>> {
    match action {
        RulesAction::Rating { progress } => {
            println!(
                "{}",
                serde_json::json!({ "progress": progress, "rating": star_rating(progress) })
            );
        }
        RulesAction::Week { week_index } => {
            let window = window_for(week_index)?;
            println!("{}", serde_json::to_string_pretty(&window)?);
        }
        RulesAction::Bonus {
            week_index,
            days_file,
        } => {
            let content = std::fs::read_to_string(&days_file)?;
            let days: Vec<DayScore> = serde_json::from_str(&content)?;
            let eligible = week_bonus(&days, week_index)?;
            println!(
                "{}",
                serde_json::json!({ "weekIndex": week_index, "bonus": eligible })
            );
        }
    }
    Ok(())
}
