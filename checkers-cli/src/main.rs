//! Checkers CLI
//!
//! Commands:
//! - play: play a single game between two agents
//! - match: play a multi-game match and report statistics

mod agents;
mod match_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "Checkers engine with random, minimax and alpha-beta agents")]
struct Cli {
    /// RNG seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play_cmd::PlayArgs),
    /// Play a multi-game match with aggregate statistics
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}
