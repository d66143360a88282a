use std::error::Error;
use std::path::Path;

use clap::Subcommand;
use marathon_core::api::MarathonBackend;
use marathon_core::{ContestSlotTracker, AFTER_POSITIONS, BEFORE_POSITIONS};

#[derive(Subcommand)]
pub enum ContestAction {
    /// List the user's confirmed contest images
    Images { marathon_id: String },
    /// Open/closed state of the before/after milestone groups
    Slots {
        contest_id: String,
        marathon_id: String,
    },
}

pub fn run(config_path: &Path, action: ContestAction) -> Result<(), Box<dyn Error>> {
    let backend = super::backend_from(config_path)?;
    let rt = super::runtime()?;

    match action {
        ContestAction::Images { marathon_id } => {
            let images = rt.block_on(backend.get_contest_images(&marathon_id))?;
            println!("{}", serde_json::to_string_pretty(&images)?);
        }
        ContestAction::Slots {
            contest_id,
            marathon_id,
        } => {
            let images = rt.block_on(backend.get_contest_images(&marathon_id))?;
            let mut tracker = ContestSlotTracker::new(contest_id, marathon_id);
            tracker.replace_images(images);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "beforeComplete": !tracker.has_open_slot(&BEFORE_POSITIONS),
                    "afterComplete": !tracker.has_open_slot(&AFTER_POSITIONS),
                }))?
            );
        }
    }
    Ok(())
}
