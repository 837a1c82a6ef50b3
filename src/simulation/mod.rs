pub mod bracket;
pub mod outcome;
pub mod results;

pub use bracket::{BracketSimulator, find_initial_draw};
pub use outcome::MatchOutcomeModel;
pub use results::RoundProbabilityTable;
