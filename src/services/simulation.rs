use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use crate::cli::RatingKind;
use crate::config::AppConfig;
use crate::domain::{Matchup, Surface};
use crate::rating::types::RatingSystem;
use crate::rating::HeadToHeadStats;
use crate::simulation::{BracketSimulator, MatchOutcomeModel, find_initial_draw};
use crate::storage;

pub struct SimulateRequest {
    pub tournament: String,
    pub year: i32,
    pub surface: Surface,
    pub system: RatingKind,
    pub trials: Option<usize>,
    pub data: PathBuf,
    pub ratings: PathBuf,
    pub out: Option<PathBuf>,
    pub seed: Option<u64>,
    pub head_to_head: bool,
}

pub struct SimulationService {
    config: AppConfig,
}

impl SimulationService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Reconstruct the historical draw, then resimulate the tournament from
    /// scratch and write the round-probability table. The draw and every
    /// player lookup are validated before the first trial.
    pub fn run(&self, request: &SimulateRequest) -> Result<()> {
        info!("=== Starting Tournament Simulation ===\n");
        info!(
            "  {} {} on {}, {:?} ratings",
            request.tournament, request.year, request.surface, request.system
        );

        let history = storage::load_match_history(&request.data)?;
        info!("  → Loaded {} matches\n", history.len());

        let draw = find_initial_draw(&history, request.year, &request.tournament)?;
        info!("  → Reconstructed the draw: {} first-round matchups\n", draw.len());

        let stats = if request.head_to_head {
            let stats = HeadToHeadStats::build(&history);
            info!(
                "  → Built head-to-head stats for {} players\n",
                stats.players().len()
            );
            Some(stats)
        } else {
            info!("  → Head-to-head adjustment disabled\n");
            None
        };

        let trials = request
            .trials
            .unwrap_or(self.config.simulation.default_trials);
        let seed = request.seed.unwrap_or_else(rand::random);
        let out = self.output_path(request);

        match request.system {
            RatingKind::Elo => {
                let table = storage::load_elo_table(&request.ratings, &self.config.elo)?;
                self.simulate_with(&table, stats.as_ref(), &draw, request, trials, seed, &out)
            }
            RatingKind::Skillo => {
                let table = storage::load_skill_table(&request.ratings, &self.config.skill)?;
                self.simulate_with(&table, stats.as_ref(), &draw, request, trials, seed, &out)
            }
        }
    }

    fn simulate_with<R: RatingSystem + Sync>(
        &self,
        ratings: &R,
        stats: Option<&HeadToHeadStats>,
        draw: &[Matchup],
        request: &SimulateRequest,
        trials: usize,
        seed: u64,
        out: &Path,
    ) -> Result<()> {
        let model = MatchOutcomeModel::new(ratings, stats, &self.config);
        let simulator = BracketSimulator::new(model, &self.config.simulation);

        info!("  Running {trials} trials (seed {seed})...");
        let results = simulator.simulate(draw, request.surface, trials, seed)?;
        info!("  → Simulation finished\n");

        storage::save_round_table(out, &results)?;
        info!("=== Tournament Simulation Complete ===");
        Ok(())
    }

    fn output_path(&self, request: &SimulateRequest) -> PathBuf {
        request.out.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "tournament_results_{}.csv",
                request.tournament.replace(' ', "_")
            ))
        })
    }
}
