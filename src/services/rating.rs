use std::path::Path;

use anyhow::Result;
use log::info;

use crate::cli::RatingKind;
use crate::config::AppConfig;
use crate::rating::{EloUpdater, SkillUpdater};
use crate::services::rng_from;
use crate::storage;

pub struct RatingService {
    config: AppConfig,
}

impl RatingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Train the chosen rating system on the match history and write the
    /// refreshed table. Training uses only matches from before
    /// `current_year`.
    pub fn run(
        &self,
        system: RatingKind,
        data: &Path,
        out: &Path,
        current_year: i32,
        seed: Option<u64>,
    ) -> Result<()> {
        info!("=== Starting Rating Calculation ===\n");
        info!("  Target year: {current_year}, system: {system:?}");

        let history = storage::load_match_history(data)?;
        info!("  → Loaded {} matches\n", history.len());

        match system {
            RatingKind::Elo => {
                let updater = EloUpdater::new(self.config.elo.clone(), current_year);
                let table = updater.calculate(&history);
                info!("  → Calculated Elo ratings for {} players\n", table.len());
                storage::save_elo_table(out, &table)?;
            }
            RatingKind::Skillo => {
                let runs = self.config.skill.runs;
                let mut rng = rng_from(seed);
                let updater = SkillUpdater::new(self.config.skill.clone(), current_year);
                let table = updater.calculate_averaged(&history, runs, &mut rng);
                info!(
                    "  → Calculated SkillO ratings for {} players, averaged over {} runs\n",
                    table.len(),
                    runs
                );
                storage::save_skill_table(out, &table)?;
            }
        }

        info!("=== Rating Calculation Complete ===");
        Ok(())
    }
}
