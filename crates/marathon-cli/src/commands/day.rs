use std::error::Error;
use std::path::Path;

use clap::{Subcommand, ValueEnum};
use marathon_core::api::MarathonBackend;
use marathon_core::{star_rating, week_bonus, DayScore, ExerciseStatus};

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    NotStarted,
    InProgress,
    Completed,
}

impl From<StatusArg> for ExerciseStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::NotStarted => ExerciseStatus::NotStarted,
            StatusArg::InProgress => ExerciseStatus::InProgress,
            StatusArg::Completed => ExerciseStatus::Completed,
        }
    }
}

#[derive(Subcommand)]
pub enum DayAction {
    /// Marathon snapshot with per-day star ratings
    Show { marathon_id: String },
    /// Change one exercise's status
    SetStatus {
        day_id: String,
        exercise_id: String,
        status: StatusArg,
    },
    /// Weekly bonus eligibility from the live snapshot
    Bonus {
        marathon_id: String,
        week_index: u32,
    },
}

pub fn run(config_path: &Path, action: DayAction) -> Result<(), Box<dyn Error>> {
    let backend = super::backend_from(config_path)?;
    let rt = super::runtime()?;

    match action {
        DayAction::Show { marathon_id } => {
            let snapshot = rt.block_on(backend.get_marathon(&marathon_id))?;
            let days: Vec<_> = snapshot
                .days
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "day": d.day_number,
                        "progress": d.progress,
                        "rating": star_rating(d.progress),
                        "isPracticeDay": d.is_practice_day,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "id": snapshot.id,
                    "numberOfDays": snapshot.number_of_days,
                    "days": days,
                }))?
            );
        }
        DayAction::SetStatus {
            day_id,
            exercise_id,
            status,
        } => {
            let response =
                rt.block_on(backend.change_status(&day_id, &exercise_id, status.into()))?;
            println!(
                "{}",
                serde_json::json!({
                    "day": response.day_number,
                    "progress": response.progress,
                    "rating": star_rating(response.progress),
                })
            );
        }
        DayAction::Bonus {
            marathon_id,
            week_index,
        } => {
            let snapshot = rt.block_on(backend.get_marathon(&marathon_id))?;
            let days: Vec<DayScore> = snapshot
                .days
                .iter()
                .map(|d| DayScore {
                    day_number: d.day_number,
                    progress: d.progress,
                })
                .collect();
            let eligible = week_bonus(&days, week_index)?;
            println!(
                "{}",
                serde_json::json!({ "weekIndex": week_index, "bonus": eligible })
            );
        }
    }
    Ok(())
}
