//! CSV readers and writers for every tabular interface: match history in,
//! rating tables in/out, head-to-head matrices and round-probability
//! tables out. The engine itself never touches the filesystem.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::settings::{EloSettings, SkillSettings};
use crate::domain::{MatchRecord, SURFACES};
use crate::errors::DataError;
use crate::rating::head_to_head::HeadToHeadStats;
use crate::rating::types::{EloEntry, EloTable, Gaussian, SkillEntry, SkillTable};
use crate::simulation::results::RoundProbabilityTable;

#[derive(Debug, Deserialize)]
struct MatchRow {
    tourney_name: String,
    surface: String,
    tourney_level: String,
    winner_name: String,
    winner_age: f64,
    loser_name: String,
    loser_age: f64,
    #[serde(rename = "Year")]
    year: i32,
}

/// Load and validate the full match history. Any malformed row fails the
/// whole call; no partially-parsed history is ever returned.
pub fn load_match_history(path: &Path) -> Result<Vec<MatchRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open match history: {}", path.display()))?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<MatchRow>().enumerate() {
        let row = row.with_context(|| format!("Failed to parse match history row {index}"))?;
        records.push(convert_row(index, row)?);
    }

    info!("Loaded {} matches from {}", records.len(), path.display());
    Ok(records)
}

fn convert_row(index: usize, row: MatchRow) -> Result<MatchRecord, DataError> {
    let invalid = |e: DataError| DataError::InvalidRow {
        row: index,
        message: e.to_string(),
    };
    Ok(MatchRecord {
        surface: row.surface.parse().map_err(invalid)?,
        level: row.tourney_level.parse().map_err(invalid)?,
        tourney_name: row.tourney_name,
        winner_name: row.winner_name,
        winner_age: row.winner_age,
        loser_name: row.loser_name,
        loser_age: row.loser_age,
        year: row.year,
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct EloRow {
    #[serde(rename = "Player_Name")]
    name: String,
    #[serde(rename = "Hard_ELO")]
    hard: f64,
    #[serde(rename = "Clay_ELO")]
    clay: f64,
    #[serde(rename = "Grass_ELO")]
    grass: f64,
    #[serde(rename = "Player_age")]
    age: f64,
    #[serde(rename = "Games_played")]
    games_played: u32,
}

pub fn save_elo_table(path: &Path, table: &EloTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create rating table: {}", path.display()))?;

    let mut entries: Vec<(&str, &EloEntry)> = table.iter().collect();
    entries.sort_by_key(|(name, _)| *name);

    for (name, entry) in entries {
        writer.serialize(EloRow {
            name: name.to_string(),
            hard: entry.surfaces[0],
            clay: entry.surfaces[1],
            grass: entry.surfaces[2],
            age: entry.age,
            games_played: entry.games_played,
        })?;
    }
    writer.flush().context("Failed to write rating table")?;

    info!("Saved Elo table to {}", path.display());
    Ok(())
}

pub fn load_elo_table(path: &Path, settings: &EloSettings) -> Result<EloTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open rating table: {}", path.display()))?;

    let mut entries = HashMap::new();
    for row in reader.deserialize::<EloRow>() {
        let row = row.context("Failed to parse rating table row")?;
        entries.insert(
            row.name,
            EloEntry {
                surfaces: [row.hard, row.clay, row.grass],
                age: row.age,
                games_played: row.games_played,
            },
        );
    }

    info!("Loaded {} Elo entries from {}", entries.len(), path.display());
    Ok(EloTable::from_entries(entries, settings.scale))
}

#[derive(Debug, Serialize, Deserialize)]
struct SkillRow {
    #[serde(rename = "Player_Name")]
    name: String,
    #[serde(rename = "Hard_mean")]
    hard_mean: f64,
    #[serde(rename = "Hard_variance")]
    hard_variance: f64,
    #[serde(rename = "Clay_mean")]
    clay_mean: f64,
    #[serde(rename = "Clay_variance")]
    clay_variance: f64,
    #[serde(rename = "Grass_mean")]
    grass_mean: f64,
    #[serde(rename = "Grass_variance")]
    grass_variance: f64,
    #[serde(rename = "Player_age")]
    age: f64,
}

pub fn save_skill_table(path: &Path, table: &SkillTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create rating table: {}", path.display()))?;

    let mut entries: Vec<(&str, &SkillEntry)> = table.iter().collect();
    entries.sort_by_key(|(name, _)| *name);

    for (name, entry) in entries {
        writer.serialize(SkillRow {
            name: name.to_string(),
            hard_mean: entry.surfaces[0].mean,
            hard_variance: entry.surfaces[0].variance,
            clay_mean: entry.surfaces[1].mean,
            clay_variance: entry.surfaces[1].variance,
            grass_mean: entry.surfaces[2].mean,
            grass_variance: entry.surfaces[2].variance,
            age: entry.age,
        })?;
    }
    writer.flush().context("Failed to write rating table")?;

    info!("Saved SkillO table to {}", path.display());
    Ok(())
}

pub fn load_skill_table(path: &Path, settings: &SkillSettings) -> Result<SkillTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open rating table: {}", path.display()))?;

    let mut entries = HashMap::new();
    for row in reader.deserialize::<SkillRow>() {
        let row = row.context("Failed to parse rating table row")?;
        entries.insert(
            row.name,
            SkillEntry {
                surfaces: [
                    Gaussian {
                        mean: row.hard_mean,
                        variance: row.hard_variance,
                    },
                    Gaussian {
                        mean: row.clay_mean,
                        variance: row.clay_variance,
                    },
                    Gaussian {
                        mean: row.grass_mean,
                        variance: row.grass_variance,
                    },
                ],
                age: row.age,
            },
        );
    }

    info!(
        "Loaded {} SkillO entries from {}",
        entries.len(),
        path.display()
    );
    Ok(SkillTable::from_entries(entries, settings.beta))
}

/// Write the two square head-to-head matrices (win percentage and games
/// played), player names on both axes. Pairs that never met export as 0.
pub fn save_head_to_head(dir: &Path, stats: &HeadToHeadStats) -> Result<()> {
    let players = stats.players();

    write_square_matrix(
        &dir.join("win_percentage.csv"),
        &players,
        |a, b| stats.win_percentage(a, b).unwrap_or(0.0),
    )?;
    write_square_matrix(&dir.join("games_played_opponents.csv"), &players, |a, b| {
        stats.games_between(a, b) as f64
    })?;

    info!(
        "Saved head-to-head matrices for {} players to {}",
        players.len(),
        dir.display()
    );
    Ok(())
}

fn write_square_matrix<F>(path: &Path, players: &[&str], cell: F) -> Result<()>
where
    F: Fn(&str, &str) -> f64,
{
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create matrix: {}", path.display()))?;

    let mut header = vec!["Player_Name".to_string()];
    header.extend(players.iter().map(|p| p.to_string()));
    writer.write_record(&header)?;

    for row_player in players {
        let mut record = vec![row_player.to_string()];
        record.extend(
            players
                .iter()
                .map(|col_player| cell(row_player, col_player).to_string()),
        );
        writer.write_record(&record)?;
    }
    writer.flush().context("Failed to write matrix")?;
    Ok(())
}

pub fn save_round_table(path: &Path, table: &RoundProbabilityTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create results table: {}", path.display()))?;

    let mut header = vec!["Player_Name".to_string()];
    header.extend(table.columns().iter().cloned());
    writer.write_record(&header)?;

    for (player, row) in table.rows() {
        let mut record = vec![player.to_string()];
        record.extend(row.iter().map(|p| p.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush().context("Failed to write results table")?;

    info!("Saved round probabilities to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    use crate::domain::Surface;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("slam_forecast_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn match_history_round_trips_through_csv() {
        let dir = scratch_dir("history");
        let path = dir.join("tennis_data.csv");
        fs::write(
            &path,
            "tourney_name,surface,tourney_level,winner_name,winner_age,loser_name,loser_age,Year\n\
             Wimbledon,Grass,G,Ann Li,24.5,Mia Yu,26.0,2022\n\
             Davis Cup,Hard,D,Mia Yu,26.1,Kay Su,22.0,2022\n",
        )
        .unwrap();

        let history = load_match_history(&path).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].surface, Surface::Grass);
        assert_eq!(history[0].winner_name, "Ann Li");
        assert_eq!(history[1].year, 2022);
    }

    #[test]
    fn bad_surface_fails_the_whole_load() {
        let dir = scratch_dir("bad_surface");
        let path = dir.join("tennis_data.csv");
        fs::write(
            &path,
            "tourney_name,surface,tourney_level,winner_name,winner_age,loser_name,loser_age,Year\n\
             Wimbledon,Carpet,G,Ann Li,24.5,Mia Yu,26.0,2022\n",
        )
        .unwrap();

        assert!(load_match_history(&path).is_err());
    }

    #[test]
    fn elo_table_round_trips() {
        let dir = scratch_dir("elo");
        let path = dir.join("player_elos.csv");
        let settings = EloSettings::default();

        let mut table = EloTable::seeded(["Ann Li", "Mia Yu"], 1500.0, settings.scale);
        {
            let entry = table.get_mut("Ann Li").unwrap();
            entry.surfaces = [1610.0, 1580.0, 1550.0];
            entry.age = 24.0;
            entry.games_played = 37;
        }

        save_elo_table(&path, &table).unwrap();
        let loaded = load_elo_table(&path, &settings).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.rating("Ann Li", Surface::Hard).unwrap(), 1610.0);
        assert_eq!(loaded.get("Ann Li").unwrap().games_played, 37);
        assert_eq!(loaded.rating("Mia Yu", Surface::Clay).unwrap(), 1500.0);
    }

    #[test]
    fn skill_table_round_trips() {
        let dir = scratch_dir("skill");
        let path = dir.join("player_skills.csv");
        let settings = SkillSettings::default();

        let mut table = SkillTable::seeded(["Ann Li"], 25.0, 8.333, settings.beta);
        table.get_mut("Ann Li").unwrap().surfaces[Surface::Grass.index()] = Gaussian {
            mean: 27.5,
            variance: 6.25,
        };

        save_skill_table(&path, &table).unwrap();
        let loaded = load_skill_table(&path, &settings).unwrap();

        let skill = loaded.skill("Ann Li", Surface::Grass).unwrap();
        assert_eq!(skill.mean, 27.5);
        assert_eq!(skill.variance, 6.25);
    }
}
