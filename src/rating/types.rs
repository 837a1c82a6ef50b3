use std::collections::HashMap;

use crate::domain::Surface;
use crate::errors::ModelError;

/// Logistic curve used by both rating systems, base 10 to match the
/// classic Elo expectation formula.
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(-x))
}

/// The one capability the simulation engine needs from a rating back-end.
/// Implemented by both `EloTable` and `SkillTable`; the outcome model and
/// the bracket simulator never see the concrete representation.
pub trait RatingSystem {
    /// Probability that `player` beats `opponent` on `surface`.
    fn win_probability(
        &self,
        player: &str,
        opponent: &str,
        surface: Surface,
    ) -> Result<f64, ModelError>;

    /// Estimated current age of `player`.
    fn age(&self, player: &str) -> Result<f64, ModelError>;
}

#[derive(Debug, Clone)]
pub struct EloEntry {
    /// One scalar rating per surface, indexed by `Surface::index`.
    pub surfaces: [f64; 3],
    pub age: f64,
    pub games_played: u32,
}

/// Per-player, per-surface Elo store.
#[derive(Debug, Clone, Default)]
pub struct EloTable {
    entries: HashMap<String, EloEntry>,
    scale: f64,
}

impl EloTable {
    /// Seed every known player up front with the same initial rating, so no
    /// entry is ever created mid-update.
    pub fn seeded<I, S>(players: I, initial_rating: f64, scale: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = players
            .into_iter()
            .map(|name| {
                (
                    name.into(),
                    EloEntry {
                        surfaces: [initial_rating; 3],
                        age: 0.0,
                        games_played: 0,
                    },
                )
            })
            .collect();
        Self { entries, scale }
    }

    pub fn from_entries(entries: HashMap<String, EloEntry>, scale: f64) -> Self {
        Self { entries, scale }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, player: &str) -> Result<&EloEntry, ModelError> {
        self.entries
            .get(player)
            .ok_or_else(|| ModelError::UnknownPlayer(player.to_string()))
    }

    pub fn get_mut(&mut self, player: &str) -> Result<&mut EloEntry, ModelError> {
        self.entries
            .get_mut(player)
            .ok_or_else(|| ModelError::UnknownPlayer(player.to_string()))
    }

    pub fn rating(&self, player: &str, surface: Surface) -> Result<f64, ModelError> {
        Ok(self.get(player)?.surfaces[surface.index()])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EloEntry)> {
        self.entries.iter().map(|(name, e)| (name.as_str(), e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut EloEntry)> {
        self.entries.iter_mut().map(|(name, e)| (name.as_str(), e))
    }
}

impl RatingSystem for EloTable {
    fn win_probability(
        &self,
        player: &str,
        opponent: &str,
        surface: Surface,
    ) -> Result<f64, ModelError> {
        let own = self.rating(player, surface)?;
        let other = self.rating(opponent, surface)?;
        Ok(logistic((own - other) / self.scale))
    }

    fn age(&self, player: &str) -> Result<f64, ModelError> {
        Ok(self.get(player)?.age)
    }
}

/// Skill estimate as a Gaussian: uncertainty is explicit state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    pub mean: f64,
    pub variance: f64,
}

#[derive(Debug, Clone)]
pub struct SkillEntry {
    pub surfaces: [Gaussian; 3],
    pub age: f64,
}

/// Per-player, per-surface Bayesian skill store.
#[derive(Debug, Clone, Default)]
pub struct SkillTable {
    entries: HashMap<String, SkillEntry>,
    beta: f64,
}

impl SkillTable {
    pub fn seeded<I, S>(players: I, initial_mean: f64, initial_variance: f64, beta: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let seed = Gaussian {
            mean: initial_mean,
            variance: initial_variance,
        };
        let entries = players
            .into_iter()
            .map(|name| {
                (
                    name.into(),
                    SkillEntry {
                        surfaces: [seed; 3],
                        age: 0.0,
                    },
                )
            })
            .collect();
        Self { entries, beta }
    }

    pub fn from_entries(entries: HashMap<String, SkillEntry>, beta: f64) -> Self {
        Self { entries, beta }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, player: &str) -> Result<&SkillEntry, ModelError> {
        self.entries
            .get(player)
            .ok_or_else(|| ModelError::UnknownPlayer(player.to_string()))
    }

    pub fn get_mut(&mut self, player: &str) -> Result<&mut SkillEntry, ModelError> {
        self.entries
            .get_mut(player)
            .ok_or_else(|| ModelError::UnknownPlayer(player.to_string()))
    }

    pub fn skill(&self, player: &str, surface: Surface) -> Result<Gaussian, ModelError> {
        Ok(self.get(player)?.surfaces[surface.index()])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkillEntry)> {
        self.entries.iter().map(|(name, e)| (name.as_str(), e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut SkillEntry)> {
        self.entries.iter_mut().map(|(name, e)| (name.as_str(), e))
    }
}

impl RatingSystem for SkillTable {
    fn win_probability(
        &self,
        player: &str,
        opponent: &str,
        surface: Surface,
    ) -> Result<f64, ModelError> {
        let own = self.skill(player, surface)?;
        let other = self.skill(opponent, surface)?;
        let noise = (own.variance + other.variance + self.beta * self.beta).sqrt();
        Ok(logistic((own.mean - other.mean) / noise))
    }

    fn age(&self, player: &str) -> Result<f64, ModelError> {
        Ok(self.get(player)?.age)
    }
}
