pub mod elo;
pub mod head_to_head;
pub mod profiles;
pub mod skillo;
pub mod types;
pub mod weighting;

pub use elo::EloUpdater;
pub use head_to_head::HeadToHeadStats;
pub use skillo::SkillUpdater;
pub use types::{EloTable, Gaussian, RatingSystem, SkillTable};
pub use weighting::effective_k;
