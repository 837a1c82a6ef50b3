pub mod models;

pub use models::{GRAND_SLAMS, MatchRecord, Matchup, SURFACES, Surface, TourneyLevel};
