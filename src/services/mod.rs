pub mod head_to_head;
pub mod rating;
pub mod simulation;

pub use head_to_head::HeadToHeadService;
pub use rating::RatingService;
pub use simulation::{SimulateRequest, SimulationService};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Deterministic generator when a seed is given, fresh entropy otherwise.
pub(crate) fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
