use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::Surface;

#[derive(Parser, Debug)]
#[command(author, version, about = "slam-forecast: tennis ratings and bracket simulation")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Which rating back-end drives win probabilities.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingKind {
    /// Surface-aware Elo with time decay
    Elo,
    /// Bayesian mean/variance skill rating
    Skillo,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Train a rating system on the match history and write the table
    Rate {
        #[arg(long, value_enum, default_value_t = RatingKind::Elo)]
        system: RatingKind,
        /// Match history CSV
        #[arg(long, default_value = "data/tennis_data.csv")]
        data: PathBuf,
        /// Where to write the rating table
        #[arg(long, default_value = "data/player_elos.csv")]
        out: PathBuf,
        /// Target year; training uses strictly earlier seasons (defaults to
        /// the current calendar year)
        #[arg(long)]
        year: Option<i32>,
        /// Seed for the SkillO update sampling
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Aggregate pairwise head-to-head matrices from the match history
    HeadToHead {
        /// Match history CSV
        #[arg(long, default_value = "data/tennis_data.csv")]
        data: PathBuf,
        /// Directory for the win-percentage and games-played matrices
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },
    /// Resimulate a Grand Slam draw and write round-reach probabilities
    Simulate {
        /// One of: Australian Open, French Open, Wimbledon, US Open
        tournament: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        surface: Surface,
        #[arg(long, value_enum, default_value_t = RatingKind::Elo)]
        system: RatingKind,
        /// Number of bracket trials (defaults from config)
        #[arg(long)]
        trials: Option<usize>,
        /// Match history CSV
        #[arg(long, default_value = "data/tennis_data.csv")]
        data: PathBuf,
        /// Trained rating table CSV
        #[arg(long, default_value = "data/player_elos.csv")]
        ratings: PathBuf,
        /// Output CSV (defaults to tournament_results_<name>.csv)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Seed for reproducible simulations
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the head-to-head probability adjustment
        #[arg(long)]
        no_head_to_head: bool,
    },
}
