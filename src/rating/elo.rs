//! Surface-aware Elo with tournament-importance weighting and time decay.

use crate::config::settings::EloSettings;
use crate::domain::MatchRecord;
use crate::rating::profiles;
use crate::rating::types::{EloTable, logistic};
use crate::rating::weighting::effective_k;

pub struct EloUpdater {
    settings: EloSettings,
    current_year: i32,
}

impl EloUpdater {
    pub fn new(settings: EloSettings, current_year: i32) -> Self {
        Self {
            settings,
            current_year,
        }
    }

    /// Expected score for a player at `own` Elo against `other`.
    pub fn expected_score(&self, own: f64, other: f64) -> f64 {
        logistic((own - other) / self.settings.scale)
    }

    /// Train a fresh table on the history. Three passes: collect the player
    /// set, seed every entry, then replay matches from before
    /// `current_year` in chronological order. The target year itself is
    /// never trained on.
    pub fn calculate(&self, history: &[MatchRecord]) -> EloTable {
        let names = profiles::player_names(history);
        let mut table = EloTable::seeded(
            names,
            self.settings.initial_rating,
            self.settings.scale,
        );

        let mut training: Vec<&MatchRecord> = history
            .iter()
            .filter(|record| record.year < self.current_year)
            .collect();
        // Stable sort: matches within a year keep their file order.
        training.sort_by_key(|record| record.year);

        for record in training {
            self.apply_match(&mut table, record);
        }

        let ages = profiles::most_recent_ages(history, self.current_year);
        let games = profiles::games_played(history);
        for (name, entry) in table.iter_mut() {
            if let Some(age) = ages.get(name) {
                entry.age = *age;
            }
            if let Some(count) = games.get(name) {
                entry.games_played = *count;
            }
        }

        table
    }

    /// One match's update. Every player in the table is pre-seeded, so the
    /// lookups cannot fail; deltas land on the match surface in full and
    /// leak onto the other two surfaces at a reduced rate.
    fn apply_match(&self, table: &mut EloTable, record: &MatchRecord) {
        let k = effective_k(
            self.settings.base_k,
            record.level,
            record.year,
            self.current_year,
            self.settings.decay_rate,
        );

        let surface = record.surface;
        let winner_elo = match table.rating(&record.winner_name, surface) {
            Ok(rating) => rating,
            Err(_) => return,
        };
        let loser_elo = match table.rating(&record.loser_name, surface) {
            Ok(rating) => rating,
            Err(_) => return,
        };

        let p_winner = self.expected_score(winner_elo, loser_elo);
        let p_loser = self.expected_score(loser_elo, winner_elo);

        let winner_delta = k * (1.0 - p_winner);
        let loser_delta = k * (0.0 - p_loser);
        let leakage = self.settings.surface_leakage;

        if let Ok(entry) = table.get_mut(&record.winner_name) {
            entry.surfaces[surface.index()] += winner_delta;
            for other in surface.others() {
                entry.surfaces[other.index()] += leakage * winner_delta;
            }
        }
        if let Ok(entry) = table.get_mut(&record.loser_name) {
            entry.surfaces[surface.index()] += loser_delta;
            for other in surface.others() {
                entry.surfaces[other.index()] += leakage * loser_delta;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Surface, TourneyLevel};

    fn settings() -> EloSettings {
        EloSettings::default()
    }

    fn record(
        winner: &str,
        loser: &str,
        surface: Surface,
        level: TourneyLevel,
        year: i32,
    ) -> MatchRecord {
        MatchRecord {
            tourney_name: "Tour Stop".to_string(),
            surface,
            level,
            winner_name: winner.to_string(),
            winner_age: 25.0,
            loser_name: loser.to_string(),
            loser_age: 25.0,
            year,
        }
    }

    #[test]
    fn winner_gains_loser_drops() {
        let updater = EloUpdater::new(settings(), 2023);
        let history = vec![record("A", "B", Surface::Hard, TourneyLevel::Tour, 2022)];
        let table = updater.calculate(&history);

        assert!(table.rating("A", Surface::Hard).unwrap() > 1500.0);
        assert!(table.rating("B", Surface::Hard).unwrap() < 1500.0);
    }

    #[test]
    fn cross_surface_delta_is_scaled_down() {
        let updater = EloUpdater::new(settings(), 2023);
        let history = vec![record("A", "B", Surface::Hard, TourneyLevel::Tour, 2022)];
        let table = updater.calculate(&history);

        let hard_gain = table.rating("A", Surface::Hard).unwrap() - 1500.0;
        let clay_gain = table.rating("A", Surface::Clay).unwrap() - 1500.0;
        let grass_gain = table.rating("A", Surface::Grass).unwrap() - 1500.0;

        assert!((clay_gain - 0.8 * hard_gain).abs() < 1e-9);
        assert!((grass_gain - clay_gain).abs() < 1e-9);
    }

    #[test]
    fn target_year_matches_are_excluded_from_training() {
        let updater = EloUpdater::new(settings(), 2023);
        let history = vec![record("A", "B", Surface::Hard, TourneyLevel::Tour, 2023)];
        let table = updater.calculate(&history);

        // Both players are seeded but untouched.
        assert_eq!(table.rating("A", Surface::Hard).unwrap(), 1500.0);
        assert_eq!(table.rating("B", Surface::Hard).unwrap(), 1500.0);
        // Profile columns still cover the full history.
        assert_eq!(table.get("A").unwrap().games_played, 1);
    }

    #[test]
    fn slam_moves_ratings_more_than_davis_cup() {
        let updater = EloUpdater::new(settings(), 2023);
        let slam = updater.calculate(&[record(
            "A",
            "B",
            Surface::Hard,
            TourneyLevel::GrandSlam,
            2022,
        )]);
        let davis = updater.calculate(&[record(
            "A",
            "B",
            Surface::Hard,
            TourneyLevel::DavisCup,
            2022,
        )]);

        let slam_gain = slam.rating("A", Surface::Hard).unwrap() - 1500.0;
        let davis_gain = davis.rating("A", Surface::Hard).unwrap() - 1500.0;
        assert!(slam_gain > davis_gain);
    }

    #[test]
    fn older_matches_decay() {
        let updater = EloUpdater::new(settings(), 2023);
        let recent = updater.calculate(&[record("A", "B", Surface::Hard, TourneyLevel::Tour, 2022)]);
        let stale = updater.calculate(&[record("A", "B", Surface::Hard, TourneyLevel::Tour, 2015)]);

        let recent_gain = recent.rating("A", Surface::Hard).unwrap() - 1500.0;
        let stale_gain = stale.rating("A", Surface::Hard).unwrap() - 1500.0;
        assert!(stale_gain > 0.0);
        assert!(stale_gain < recent_gain);
    }

    #[test]
    fn updates_replay_in_chronological_order() {
        let updater = EloUpdater::new(settings(), 2023);
        // File order is reversed on purpose; the 2020 match must be applied
        // first, when both players still sit at 1500.
        let history = vec![
            record("A", "B", Surface::Hard, TourneyLevel::Tour, 2022),
            record("A", "B", Surface::Hard, TourneyLevel::Tour, 2020),
        ];
        let shuffled = updater.calculate(&history);

        let ordered_history = vec![
            record("A", "B", Surface::Hard, TourneyLevel::Tour, 2020),
            record("A", "B", Surface::Hard, TourneyLevel::Tour, 2022),
        ];
        let ordered = updater.calculate(&ordered_history);

        assert_eq!(
            shuffled.rating("A", Surface::Hard).unwrap(),
            ordered.rating("A", Surface::Hard).unwrap()
        );
    }
}
