//! Single-elimination bracket simulation: reconstruct a Grand Slam draw
//! from the historical results, then resimulate it from scratch many times
//! with modeled probabilities.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::settings::SimulationSettings;
use crate::domain::{GRAND_SLAMS, MatchRecord, Matchup, Surface};
use crate::errors::{DrawError, ModelError};
use crate::rating::types::RatingSystem;
use crate::simulation::outcome::MatchOutcomeModel;
use crate::simulation::results::RoundProbabilityTable;

/// Reconstruct the round-of-64 matchups for `(year, tournament)`. The
/// historical outcomes are discarded; only who was paired with whom
/// survives. A completed 128-player single-elimination event is exactly 127
/// rows, anything else means the data is incomplete.
pub fn find_initial_draw(
    history: &[MatchRecord],
    year: i32,
    tournament: &str,
) -> Result<Vec<Matchup>, DrawError> {
    if !GRAND_SLAMS.contains(&tournament) {
        return Err(DrawError::NotGrandSlam(tournament.to_string()));
    }

    let rows: Vec<&MatchRecord> = history
        .iter()
        .filter(|record| record.year == year && record.tourney_name == tournament)
        .collect();

    if rows.len() != 127 {
        return Err(DrawError::IncompleteDraw {
            tournament: tournament.to_string(),
            year,
            found: rows.len(),
        });
    }

    // The first 64 rows are the first round, in file order; no reseeding.
    Ok(rows[..64]
        .iter()
        .map(|record| Matchup::new(record.winner_name.clone(), record.loser_name.clone()))
        .collect())
}

pub struct BracketSimulator<'a, R: RatingSystem> {
    model: MatchOutcomeModel<'a, R>,
    sets_per_match: usize,
}

impl<'a, R: RatingSystem + Sync> BracketSimulator<'a, R> {
    pub fn new(model: MatchOutcomeModel<'a, R>, settings: &SimulationSettings) -> Self {
        Self {
            model,
            sets_per_match: settings.sets_per_match,
        }
    }

    /// Run `trials` independent bracket simulations and average the tallies
    /// into reach probabilities. All validation happens before trial one;
    /// rating state is read-only throughout. Trials run in parallel, each
    /// on its own generator seeded from `seed + trial`, so a given seed
    /// always produces the same table.
    pub fn simulate(
        &self,
        draw: &[Matchup],
        surface: Surface,
        trials: usize,
        seed: u64,
    ) -> anyhow::Result<RoundProbabilityTable> {
        if draw.is_empty() || !draw.len().is_power_of_two() {
            return Err(DrawError::UnevenBracket(draw.len()).into());
        }
        anyhow::ensure!(trials > 0, "at least one trial is required");
        for matchup in draw {
            self.model.validate_player(&matchup.player_1)?;
            self.model.validate_player(&matchup.player_2)?;
        }

        let slots = draw.len() * 2;
        let rounds = slots.trailing_zeros() as usize;
        let columns = rounds + 1;

        let totals = (0..trials)
            .into_par_iter()
            .map(|trial| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial as u64));
                self.run_trial(draw, surface, &mut rng)
            })
            .try_reduce(
                || Array2::zeros((slots, columns)),
                |left, right| Ok(left + right),
            )?;

        let matrix = totals / trials as f64;
        Ok(RoundProbabilityTable::new(
            slot_names(draw),
            column_labels(draw.len(), rounds),
            matrix,
        ))
    }

    /// One full bracket, first round to champion. Winners of every round
    /// except the final tally their round's column; both finalists tally
    /// `Runner_up`, the final's winner additionally tallies `Champion`.
    /// Consecutive winners re-pair in bracket order.
    fn run_trial<G: Rng>(
        &self,
        draw: &[Matchup],
        surface: Surface,
        rng: &mut G,
    ) -> Result<Array2<f64>, ModelError> {
        let slots = draw.len() * 2;
        let rounds = slots.trailing_zeros() as usize;
        let runner_up_col = rounds - 1;
        let champion_col = rounds;

        let mut tally = Array2::zeros((slots, rounds + 1));
        let mut current: Vec<(usize, &str)> = Vec::with_capacity(slots);
        for (i, matchup) in draw.iter().enumerate() {
            current.push((2 * i, matchup.player_1.as_str()));
            current.push((2 * i + 1, matchup.player_2.as_str()));
        }

        for round in 0..rounds {
            let is_final = current.len() == 2;
            let mut winners = Vec::with_capacity(current.len() / 2);

            for pair in current.chunks_exact(2) {
                let (slot_1, player_1) = pair[0];
                let (slot_2, player_2) = pair[1];

                if is_final {
                    tally[[slot_1, runner_up_col]] += 1.0;
                    tally[[slot_2, runner_up_col]] += 1.0;
                }

                let winner =
                    self.model
                        .play_match(player_1, player_2, self.sets_per_match, surface, rng)?;
                let (slot, name) = if winner == player_1 {
                    (slot_1, player_1)
                } else {
                    (slot_2, player_2)
                };

                let column = if is_final { champion_col } else { round };
                tally[[slot, column]] += 1.0;
                winners.push((slot, name));
            }

            current = winners;
        }

        Ok(tally)
    }
}

fn slot_names(draw: &[Matchup]) -> Vec<String> {
    draw.iter()
        .flat_map(|m| [m.player_1.clone(), m.player_2.clone()])
        .collect()
}

/// `Round_64, Round_32, …, Round_2, Runner_up, Champion` for a full slam
/// draw; smaller test brackets get the matching suffix of that sequence.
fn column_labels(matchups: usize, rounds: usize) -> Vec<String> {
    let mut labels: Vec<String> = (0..rounds - 1)
        .map(|round| format!("Round_{}", matchups >> round))
        .collect();
    labels.push("Runner_up".to_string());
    labels.push("Champion".to_string());
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::TourneyLevel;
    use crate::rating::types::EloTable;

    fn slam_history(tournament: &str, year: i32, rows: usize) -> Vec<MatchRecord> {
        (0..rows)
            .map(|i| MatchRecord {
                tourney_name: tournament.to_string(),
                surface: Surface::Hard,
                level: TourneyLevel::GrandSlam,
                winner_name: format!("Winner {i}"),
                winner_age: 24.0,
                loser_name: format!("Loser {i}"),
                loser_age: 24.0,
                year,
            })
            .collect()
    }

    #[test]
    fn complete_draw_yields_64_matchups() {
        let history = slam_history("Australian Open", 2023, 127);
        let draw = find_initial_draw(&history, 2023, "Australian Open").unwrap();
        assert_eq!(draw.len(), 64);
        assert_eq!(draw[0], Matchup::new("Winner 0", "Loser 0"));
        assert_eq!(draw[63], Matchup::new("Winner 63", "Loser 63"));
    }

    #[test]
    fn off_by_one_row_counts_are_rejected() {
        for rows in [126, 128] {
            let history = slam_history("Wimbledon", 2023, rows);
            let result = find_initial_draw(&history, 2023, "Wimbledon");
            assert_eq!(
                result,
                Err(DrawError::IncompleteDraw {
                    tournament: "Wimbledon".to_string(),
                    year: 2023,
                    found: rows,
                })
            );
        }
    }

    #[test]
    fn non_slams_are_rejected_regardless_of_rows() {
        let history = slam_history("Miami Open", 2023, 127);
        assert_eq!(
            find_initial_draw(&history, 2023, "Miami Open"),
            Err(DrawError::NotGrandSlam("Miami Open".to_string()))
        );
    }

    #[test]
    fn wrong_year_leaves_the_draw_incomplete() {
        let history = slam_history("US Open", 2022, 127);
        assert!(matches!(
            find_initial_draw(&history, 2023, "US Open"),
            Err(DrawError::IncompleteDraw { found: 0, .. })
        ));
    }

    fn toy_table() -> EloTable {
        let players = [
            ("A", 1700.0),
            ("B", 1500.0),
            ("C", 1500.0),
            ("D", 1300.0),
        ];
        let mut table = EloTable::seeded(players.iter().map(|(n, _)| *n), 1500.0, 400.0);
        for (name, rating) in players {
            let entry = table.get_mut(name).unwrap();
            entry.surfaces = [rating; 3];
            entry.age = 20.0;
        }
        table
    }

    #[test]
    fn champion_column_sums_to_one() {
        let table = toy_table();
        let config = AppConfig::new();
        let model = MatchOutcomeModel::new(&table, None, &config);
        let simulator = BracketSimulator::new(model, &config.simulation);

        let draw = vec![Matchup::new("A", "B"), Matchup::new("C", "D")];
        let results = simulator
            .simulate(&draw, Surface::Hard, 500, 99)
            .unwrap();

        let champion_total: f64 = results
            .players()
            .iter()
            .map(|p| results.champion_probability(p).unwrap())
            .sum();
        assert!((champion_total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rows_are_monotone_non_increasing() {
        let table = toy_table();
        let config = AppConfig::new();
        let model = MatchOutcomeModel::new(&table, None, &config);
        let simulator = BracketSimulator::new(model, &config.simulation);

        let draw = vec![Matchup::new("A", "B"), Matchup::new("C", "D")];
        let results = simulator
            .simulate(&draw, Surface::Hard, 500, 7)
            .unwrap();

        for (_, row) in results.rows() {
            for window in row.windows(2) {
                assert!(window[1] <= window[0] + 1e-12);
            }
            for cell in row {
                assert!((0.0..=1.0).contains(&cell));
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_table() {
        let table = toy_table();
        let config = AppConfig::new();
        let model = MatchOutcomeModel::new(&table, None, &config);
        let simulator = BracketSimulator::new(model, &config.simulation);

        let draw = vec![Matchup::new("A", "B"), Matchup::new("C", "D")];
        let first = simulator.simulate(&draw, Surface::Hard, 200, 5).unwrap();
        let second = simulator.simulate(&draw, Surface::Hard, 200, 5).unwrap();
        assert_eq!(first.matrix(), second.matrix());
    }

    #[test]
    fn unknown_draw_player_fails_before_any_trial() {
        let table = toy_table();
        let config = AppConfig::new();
        let model = MatchOutcomeModel::new(&table, None, &config);
        let simulator = BracketSimulator::new(model, &config.simulation);

        let draw = vec![Matchup::new("A", "B"), Matchup::new("C", "Nobody")];
        let result = simulator.simulate(&draw, Surface::Hard, 10, 1);
        assert!(result.is_err());
    }

    #[test]
    fn non_power_of_two_brackets_are_rejected() {
        let table = toy_table();
        let config = AppConfig::new();
        let model = MatchOutcomeModel::new(&table, None, &config);
        let simulator = BracketSimulator::new(model, &config.simulation);

        let draw = vec![
            Matchup::new("A", "B"),
            Matchup::new("C", "D"),
            Matchup::new("A", "C"),
        ];
        assert!(simulator.simulate(&draw, Surface::Hard, 10, 1).is_err());
    }

    #[test]
    fn full_draw_gets_the_slam_column_labels() {
        let labels = column_labels(64, 7);
        assert_eq!(
            labels,
            vec![
                "Round_64", "Round_32", "Round_16", "Round_8", "Round_4", "Round_2", "Runner_up",
                "Champion"
            ]
        );
    }
}
