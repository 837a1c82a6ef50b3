//! Player attributes derived from the match history: an estimate of each
//! player's current age and how many matches they have played.

use std::collections::HashMap;

use crate::domain::MatchRecord;

/// Every player appearing in the history, winner or loser side. Sorted so
/// that seeding a rating table is deterministic.
pub fn player_names(history: &[MatchRecord]) -> Vec<String> {
    let mut names: Vec<String> = history
        .iter()
        .flat_map(|r| [r.winner_name.clone(), r.loser_name.clone()])
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Age at each player's most recent match, projected forward to
/// `current_year`. A player inactive since 2020 who was 30 then is
/// estimated at 33 in 2023. One entry per player who appears at least once.
pub fn most_recent_ages(history: &[MatchRecord], current_year: i32) -> HashMap<String, f64> {
    // (latest year seen, age recorded that year); ties on year keep the
    // larger age, matching taking the max over the winner/loser columns.
    let mut latest: HashMap<String, (i32, f64)> = HashMap::new();

    let mut observe = |name: &str, year: i32, age: f64| {
        latest
            .entry(name.to_string())
            .and_modify(|entry| {
                if year > entry.0 || (year == entry.0 && age > entry.1) {
                    *entry = (year, age);
                }
            })
            .or_insert((year, age));
    };

    for record in history {
        observe(&record.winner_name, record.year, record.winner_age);
        observe(&record.loser_name, record.year, record.loser_age);
    }

    latest
        .into_iter()
        .map(|(name, (year, age))| (name, age + (current_year - year) as f64))
        .collect()
}

/// Total appearances (as winner or loser) across the whole history.
pub fn games_played(history: &[MatchRecord]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for record in history {
        *counts.entry(record.winner_name.clone()).or_insert(0) += 1;
        *counts.entry(record.loser_name.clone()).or_insert(0) += 1;
    }
    counts
}
