use std::error::Error;
use std::path::Path;

use clap::Subcommand;
use marathon_core::api::MarathonBackend;
use marathon_core::VotingLedger;

#[derive(Subcommand)]
pub enum VoteAction {
    /// List finalists with their vote tallies
    List { marathon_id: String },
    /// Cast (or retract with --retract) a vote for a finalist
    Cast {
        marathon_id: String,
        contest_id: String,
        finalist_id: String,
        #[arg(long)]
        retract: bool,
    },
}

pub fn run(config_path: &Path, action: VoteAction) -> Result<(), Box<dyn Error>> {
    let backend = super::backend_from(config_path)?;
    let rt = super::runtime()?;

    match action {
        VoteAction::List { marathon_id } => {
            let finalists = rt.block_on(backend.get_contest_finalists(&marathon_id))?;
            println!("{}", serde_json::to_string_pretty(&finalists)?);
        }
        VoteAction::Cast {
            marathon_id,
            contest_id,
            finalist_id,
            retract,
        } => {
            let mut ledger = VotingLedger::new();
            let finalists = rt.block_on(backend.get_contest_finalists(&marathon_id))?;
            ledger.replace_finalists(finalists);
            rt.block_on(ledger.cast_vote(&backend, &contest_id, &finalist_id, !retract))?;
            let finalist = ledger
                .finalist(&finalist_id)
                .ok_or("finalist missing after vote")?;
            println!("{}", serde_json::to_string_pretty(finalist)?);
        }
    }
    Ok(())
}
