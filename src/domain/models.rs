use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DataError;

/// The only tournaments a full 128-player draw can be reconstructed for.
pub const GRAND_SLAMS: [&str; 4] = ["Australian Open", "French Open", "Wimbledon", "US Open"];

/// Court surface. The dataset is pre-filtered, so "Carpet" never appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Hard,
    Clay,
    Grass,
}

pub const SURFACES: [Surface; 3] = [Surface::Hard, Surface::Clay, Surface::Grass];

impl Surface {
    /// Dense index for per-surface arrays.
    pub fn index(self) -> usize {
        match self {
            Surface::Hard => 0,
            Surface::Clay => 1,
            Surface::Grass => 2,
        }
    }

    /// The two surfaces a rating update leaks onto.
    pub fn others(self) -> [Surface; 2] {
        match self {
            Surface::Hard => [Surface::Clay, Surface::Grass],
            Surface::Clay => [Surface::Hard, Surface::Grass],
            Surface::Grass => [Surface::Hard, Surface::Clay],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Hard => "Hard",
            Surface::Clay => "Clay",
            Surface::Grass => "Grass",
        }
    }
}

impl FromStr for Surface {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hard" => Ok(Surface::Hard),
            "Clay" => Ok(Surface::Clay),
            "Grass" => Ok(Surface::Grass),
            other => Err(DataError::UnknownSurface(other.to_string())),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tournament importance tier, parsed from the dataset's single-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourneyLevel {
    GrandSlam,
    Masters,
    Tour,
    TourFinal,
    DavisCup,
}

impl TourneyLevel {
    /// Multiplier applied to the rating sensitivity constant (K or γ).
    /// Grand Slams are worth double a Masters, Davis Cup barely moves ratings.
    pub fn multiplier(self) -> f64 {
        match self {
            TourneyLevel::GrandSlam => 4.0,
            TourneyLevel::Masters | TourneyLevel::Tour => 2.0,
            TourneyLevel::TourFinal => 1.0,
            TourneyLevel::DavisCup => 0.5,
        }
    }
}

impl FromStr for TourneyLevel {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "G" => Ok(TourneyLevel::GrandSlam),
            "M" => Ok(TourneyLevel::Masters),
            "A" => Ok(TourneyLevel::Tour),
            "F" => Ok(TourneyLevel::TourFinal),
            "D" => Ok(TourneyLevel::DavisCup),
            other => Err(DataError::UnknownLevel(other.to_string())),
        }
    }
}

/// One completed historical match. Immutable input; drives exactly one
/// rating update.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub tourney_name: String,
    pub surface: Surface,
    pub level: TourneyLevel,
    pub winner_name: String,
    pub winner_age: f64,
    pub loser_name: String,
    pub loser_age: f64,
    pub year: i32,
}

/// An ordered pair of players scheduled to play; the unit the bracket
/// simulator advances.
#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub player_1: String,
    pub player_2: String,
}

impl Matchup {
    pub fn new(player_1: impl Into<String>, player_2: impl Into<String>) -> Self {
        Self {
            player_1: player_1.into(),
            player_2: player_2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_parsing_is_strict() {
        assert_eq!("Clay".parse::<Surface>(), Ok(Surface::Clay));
        assert_eq!(
            "Carpet".parse::<Surface>(),
            Err(DataError::UnknownSurface("Carpet".to_string()))
        );
    }

    #[test]
    fn level_multipliers() {
        assert_eq!("G".parse::<TourneyLevel>().unwrap().multiplier(), 4.0);
        assert_eq!("M".parse::<TourneyLevel>().unwrap().multiplier(), 2.0);
        assert_eq!("A".parse::<TourneyLevel>().unwrap().multiplier(), 2.0);
        assert_eq!("F".parse::<TourneyLevel>().unwrap().multiplier(), 1.0);
        assert_eq!("D".parse::<TourneyLevel>().unwrap().multiplier(), 0.5);
        assert!("X".parse::<TourneyLevel>().is_err());
    }

    #[test]
    fn others_excludes_self() {
        for surface in SURFACES {
            assert!(!surface.others().contains(&surface));
        }
    }
}
