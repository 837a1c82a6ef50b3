//! Pairwise head-to-head history: a lookup table built once from the full
//! match history and read-only during simulation.

use std::collections::HashMap;

use crate::domain::MatchRecord;

/// Win and meeting counts for every pair of players who have met. Both
/// directions are stored from actual counts; pairs that never met have no
/// entry and are never inferred.
#[derive(Debug, Clone, Default)]
pub struct HeadToHeadStats {
    /// Ordered (player, opponent) → wins of player over opponent.
    wins: HashMap<(String, String), u32>,
    /// Ordered (player, opponent) → total meetings; stored symmetrically.
    games: HashMap<(String, String), u32>,
}

impl HeadToHeadStats {
    pub fn build(history: &[MatchRecord]) -> Self {
        let mut stats = Self::default();
        for record in history {
            let winner = record.winner_name.clone();
            let loser = record.loser_name.clone();

            *stats
                .games
                .entry((winner.clone(), loser.clone()))
                .or_insert(0) += 1;
            *stats
                .games
                .entry((loser.clone(), winner.clone()))
                .or_insert(0) += 1;
            *stats.wins.entry((winner, loser)).or_insert(0) += 1;
        }
        stats
    }

    pub fn games_between(&self, player: &str, opponent: &str) -> u32 {
        self.games
            .get(&(player.to_string(), opponent.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn wins_over(&self, player: &str, opponent: &str) -> u32 {
        self.wins
            .get(&(player.to_string(), opponent.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Historical win rate of `player` against `opponent`, `None` when the
    /// pair has never met.
    pub fn win_percentage(&self, player: &str, opponent: &str) -> Option<f64> {
        let games = self.games_between(player, opponent);
        if games == 0 {
            return None;
        }
        Some(self.wins_over(player, opponent) as f64 / games as f64)
    }

    /// Every player with at least one recorded meeting, sorted for stable
    /// matrix export.
    pub fn players(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.games.keys().map(|(a, _)| a.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Surface, TourneyLevel};

    fn record(winner: &str, loser: &str) -> MatchRecord {
        MatchRecord {
            tourney_name: "US Open".to_string(),
            surface: Surface::Hard,
            level: TourneyLevel::GrandSlam,
            winner_name: winner.to_string(),
            winner_age: 24.0,
            loser_name: loser.to_string(),
            loser_age: 26.0,
            year: 2022,
        }
    }

    #[test]
    fn both_directions_from_actual_counts() {
        let history = vec![
            record("A", "B"),
            record("A", "B"),
            record("B", "A"),
            record("A", "C"),
        ];
        let stats = HeadToHeadStats::build(&history);

        assert_eq!(stats.games_between("A", "B"), 3);
        assert_eq!(stats.games_between("B", "A"), 3);
        assert_eq!(stats.win_percentage("A", "B"), Some(2.0 / 3.0));
        assert_eq!(stats.win_percentage("B", "A"), Some(1.0 / 3.0));
        assert_eq!(stats.win_percentage("C", "A"), Some(0.0));
    }

    #[test]
    fn unseen_pairs_are_absent_not_zero() {
        let stats = HeadToHeadStats::build(&[record("A", "B")]);
        assert_eq!(stats.win_percentage("A", "C"), None);
        assert_eq!(stats.games_between("A", "C"), 0);
    }

    #[test]
    fn players_are_sorted_and_unique() {
        let stats = HeadToHeadStats::build(&[record("B", "A"), record("C", "A")]);
        assert_eq!(stats.players(), vec!["A", "B", "C"]);
    }
}
