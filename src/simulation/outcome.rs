//! Per-set win probabilities for a single match: rating edge, blended with
//! head-to-head history, decayed by age fatigue in the later sets.

use rand::Rng;

use crate::config::AppConfig;
use crate::config::settings::{FatigueSettings, HeadToHeadSettings};
use crate::domain::Surface;
use crate::errors::ModelError;
use crate::rating::head_to_head::HeadToHeadStats;
use crate::rating::types::RatingSystem;

pub struct MatchOutcomeModel<'a, R: RatingSystem> {
    ratings: &'a R,
    head_to_head: Option<&'a HeadToHeadStats>,
    blend: &'a HeadToHeadSettings,
    fatigue: &'a FatigueSettings,
}

impl<'a, R: RatingSystem> MatchOutcomeModel<'a, R> {
    pub fn new(
        ratings: &'a R,
        head_to_head: Option<&'a HeadToHeadStats>,
        config: &'a AppConfig,
    ) -> Self {
        Self {
            ratings,
            head_to_head,
            blend: &config.head_to_head,
            fatigue: &config.fatigue,
        }
    }

    /// Fails if the player has no rating entry; called for the whole draw
    /// before any trial runs.
    pub fn validate_player(&self, player: &str) -> Result<(), ModelError> {
        self.ratings.age(player).map(|_| ())
    }

    /// Pull the model probability towards the pair's historical win rate,
    /// weighted by how often they have actually met. With no prior meetings
    /// the base probability comes back untouched.
    pub fn adjusted_win_probability(&self, base: f64, player: &str, opponent: &str) -> f64 {
        let Some(stats) = self.head_to_head else {
            return base;
        };
        let games = stats.games_between(player, opponent);
        let Some(history_rate) = stats.win_percentage(player, opponent) else {
            return base;
        };

        let x = self.blend.steepness * (games as f64 - self.blend.midpoint);
        let adjustment = 0.5 / (1.0 + (-x).exp());
        (base + adjustment * (history_rate - 0.5)).clamp(0.0, 1.0)
    }

    /// Per-set scaling for an ageing player: nothing below the threshold,
    /// then a compounding penalty for each further set.
    fn fatigue_scaling(&self, age: f64, surface: Surface, set_index: usize) -> f64 {
        if age <= self.fatigue.age_threshold {
            return 1.0;
        }
        let per_set = (-self.fatigue.decay_rate(surface) * (age - self.fatigue.age_threshold)).exp();
        per_set.powi(set_index as i32)
    }

    /// Probability that `player` takes each of the `num_sets` sets against
    /// `opponent`, normalized so the pair's probabilities sum to one per set.
    pub fn win_probability_per_set(
        &self,
        player: &str,
        opponent: &str,
        num_sets: usize,
        surface: Surface,
    ) -> Result<Vec<f64>, ModelError> {
        if num_sets == 0 || num_sets.is_multiple_of(2) {
            return Err(ModelError::EvenSets(num_sets));
        }

        let base_own = self.ratings.win_probability(player, opponent, surface)?;
        let base_other = self.ratings.win_probability(opponent, player, surface)?;
        let age_own = self.ratings.age(player)?;
        let age_other = self.ratings.age(opponent)?;

        let adjusted_own = self.adjusted_win_probability(base_own, player, opponent);
        let adjusted_other = self.adjusted_win_probability(base_other, opponent, player);

        let per_set = (0..num_sets)
            .map(|set| {
                let own = adjusted_own * self.fatigue_scaling(age_own, surface, set);
                let other = adjusted_other * self.fatigue_scaling(age_other, surface, set);
                if own + other > 0.0 {
                    own / (own + other)
                } else {
                    0.5
                }
            })
            .collect();

        Ok(per_set)
    }

    /// Draw every set independently; the match goes to whoever takes a
    /// strict majority.
    pub fn play_match<'b, G: Rng>(
        &self,
        player: &'b str,
        opponent: &'b str,
        num_sets: usize,
        surface: Surface,
        rng: &mut G,
    ) -> Result<&'b str, ModelError> {
        let per_set = self.win_probability_per_set(player, opponent, num_sets, surface)?;

        let mut sets_won = 0usize;
        for probability in per_set {
            if rng.r#gen::<f64>() < probability {
                sets_won += 1;
            }
        }

        if sets_won * 2 > num_sets {
            Ok(player)
        } else {
            Ok(opponent)
        }
    }
}
