use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::rating::HeadToHeadStats;
use crate::storage;

pub struct HeadToHeadService;

impl HeadToHeadService {
    pub fn new() -> Self {
        Self
    }

    /// Build the pairwise win-percentage and games-played matrices from the
    /// full history and write both as square CSVs.
    pub fn run(&self, data: &Path, out_dir: &Path) -> Result<()> {
        info!("=== Starting Head-to-Head Aggregation ===\n");

        let history = storage::load_match_history(data)?;
        info!("  → Loaded {} matches\n", history.len());

        let stats = HeadToHeadStats::build(&history);
        info!("  → Aggregated {} players with meetings\n", stats.players().len());

        fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
        storage::save_head_to_head(out_dir, &stats)?;

        info!("=== Head-to-Head Aggregation Complete ===");
        Ok(())
    }
}

impl Default for HeadToHeadService {
    fn default() -> Self {
        Self::new()
    }
}
