use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "marathon-cli", version, about = "Marathon progression engine CLI")]
struct Cli {
    /// Path to the engine configuration file
    #[arg(long, global = true, default_value = "marathon.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Offline rules: ratings, week windows, bonus evaluation
    Rules {
        #[command(subcommand)]
        action: commands::rules::RulesAction,
    },
    /// Day progression against the configured backend
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Contest slot state
    Contest {
        #[command(subcommand)]
        action: commands::contest::ContestAction,
    },
    /// Finalist voting
    Vote {
        #[command(subcommand)]
        action: commands::vote::VoteAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Rules { action } => commands::rules::run(action),
        Commands::Day { action } => commands::day::run(&cli.config, action),
        Commands::Contest { action } => commands::contest::run(&cli.config, action),
        Commands::Vote { action } => commands::vote::run(&cli.config, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
