//! Bayesian skill rating ("SkillO"): a Gaussian per (player, surface).
//!
//! Structurally parallel to the Elo pass, but the update magnitude is
//! sampled and the variances react to how surprising the outcome was: an
//! upset widens both players' uncertainty, an expected result narrows it.

use std::collections::HashMap;

use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::settings::SkillSettings;
use crate::domain::{MatchRecord, SURFACES};
use crate::rating::profiles;
use crate::rating::types::{Gaussian, SkillEntry, SkillTable, logistic};
use crate::rating::weighting::effective_k;

pub struct SkillUpdater {
    settings: SkillSettings,
    current_year: i32,
}

impl SkillUpdater {
    pub fn new(settings: SkillSettings, current_year: i32) -> Self {
        Self {
            settings,
            current_year,
        }
    }

    /// Win probability from two Gaussians, with β² performance noise in the
    /// denominator.
    pub fn win_probability(&self, own: Gaussian, other: Gaussian) -> f64 {
        let beta = self.settings.beta;
        let noise = (own.variance + other.variance + beta * beta).sqrt();
        logistic((own.mean - other.mean) / noise)
    }

    /// One training pass over the history. Same three-pass shape as the Elo
    /// updater; randomness comes only from the injected generator.
    pub fn calculate<R: Rng>(&self, history: &[MatchRecord], rng: &mut R) -> SkillTable {
        let names = profiles::player_names(history);
        let mut table = SkillTable::seeded(
            names,
            self.settings.initial_mean,
            self.settings.initial_variance,
            self.settings.beta,
        );

        let mut training: Vec<&MatchRecord> = history
            .iter()
            .filter(|record| record.year < self.current_year)
            .collect();
        training.sort_by_key(|record| record.year);

        for record in training {
            self.apply_match(&mut table, record, rng);
        }

        let ages = profiles::most_recent_ages(history, self.current_year);
        for (name, entry) in table.iter_mut() {
            if let Some(age) = ages.get(name) {
                entry.age = *age;
            }
        }

        table
    }

    /// The sampled update rule is noisy, so a single pass is itself a random
    /// variable. Averaging the means and variances of `runs` independent
    /// passes gives a stable table.
    pub fn calculate_averaged<R: Rng>(
        &self,
        history: &[MatchRecord],
        runs: usize,
        rng: &mut R,
    ) -> SkillTable {
        let runs = runs.max(1);
        let mut sums: HashMap<String, SkillEntry> = HashMap::new();

        for _ in 0..runs {
            let table = self.calculate(history, rng);
            for (name, entry) in table.iter() {
                let slot = sums.entry(name.to_string()).or_insert(SkillEntry {
                    surfaces: [Gaussian {
                        mean: 0.0,
                        variance: 0.0,
                    }; 3],
                    age: entry.age,
                });
                for surface in SURFACES {
                    let i = surface.index();
                    slot.surfaces[i].mean += entry.surfaces[i].mean;
                    slot.surfaces[i].variance += entry.surfaces[i].variance;
                }
            }
        }

        let n = runs as f64;
        for entry in sums.values_mut() {
            for slot in &mut entry.surfaces {
                slot.mean /= n;
                slot.variance /= n;
            }
        }

        SkillTable::from_entries(sums, self.settings.beta)
    }

    fn apply_match<R: Rng>(&self, table: &mut SkillTable, record: &MatchRecord, rng: &mut R) {
        let gamma = effective_k(
            self.settings.base_gamma,
            record.level,
            record.year,
            self.current_year,
            self.settings.decay_rate,
        );
        let noise: f64 = rng.sample(StandardNormal);
        let magnitude = (noise * gamma).abs();

        let surface = record.surface;
        let winner = match table.skill(&record.winner_name, surface) {
            Ok(skill) => skill,
            Err(_) => return,
        };
        let loser = match table.skill(&record.loser_name, surface) {
            Ok(skill) => skill,
            Err(_) => return,
        };

        let p_winner = self.win_probability(winner, loser);
        let p_loser = self.win_probability(loser, winner);

        let winner_delta = magnitude * (1.0 - p_winner);
        let loser_delta = magnitude * (0.0 - p_loser);

        // An expected result narrows both Gaussians; an upset widens them.
        let expected = p_winner > 0.5;
        let factor = self.settings.variance_response * magnitude;
        let leakage = self.settings.surface_leakage;

        if let Ok(entry) = table.get_mut(&record.winner_name) {
            self.shift(entry, surface, winner_delta, expected, factor, leakage);
        }
        if let Ok(entry) = table.get_mut(&record.loser_name) {
            self.shift(entry, surface, loser_delta, expected, factor, leakage);
        }
    }

    fn shift(
        &self,
        entry: &mut SkillEntry,
        surface: crate::domain::Surface,
        mean_delta: f64,
        expected: bool,
        variance_factor: f64,
        leakage: f64,
    ) {
        let primary = &mut entry.surfaces[surface.index()];
        primary.mean += mean_delta;
        primary.variance = self.adjust_variance(primary.variance, expected, variance_factor);

        for other in surface.others() {
            let slot = &mut entry.surfaces[other.index()];
            slot.mean += leakage * mean_delta;
            slot.variance = self.adjust_variance(slot.variance, expected, leakage * variance_factor);
        }
    }

    fn adjust_variance(&self, variance: f64, expected: bool, factor: f64) -> f64 {
        // Factors beyond 1 would flip the sign of the variance.
        let factor = factor.min(0.95);
        if expected {
            (variance * (1.0 - factor)).max(self.settings.min_variance)
        } else {
            variance * (1.0 + factor)
        }
    }
}
