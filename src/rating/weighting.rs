use crate::domain::TourneyLevel;

/// Exponential down-weighting of older matches.
/// formula: weight = exp(-decay_rate × years_ago)
pub fn time_decay(match_year: i32, current_year: i32, decay_rate: f64) -> f64 {
    let years_ago = (current_year - match_year).abs() as f64;
    (-decay_rate * years_ago).exp()
}

/// Effective sensitivity constant for one match, derived purely from the
/// base constant and the match's attributes. Nothing is mutated and reset;
/// every match gets a fresh value.
pub fn effective_k(
    base: f64,
    level: TourneyLevel,
    match_year: i32,
    current_year: i32,
    decay_rate: f64,
) -> f64 {
    base * level.multiplier() * time_decay(match_year, current_year, decay_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_year_match_keeps_full_weight() {
        assert!((time_decay(2023, 2023, 0.3) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn older_matches_weigh_less() {
        let recent = time_decay(2022, 2023, 0.3);
        let old = time_decay(2015, 2023, 0.3);
        assert!(recent < 1.0);
        assert!(old < recent);
        assert!(old > 0.0);
    }

    #[test]
    fn slam_quadruples_the_base() {
        let k = effective_k(20.0, TourneyLevel::GrandSlam, 2023, 2023, 0.3);
        assert!((k - 80.0).abs() < 1e-12);
    }

    #[test]
    fn davis_cup_barely_counts() {
        let k = effective_k(20.0, TourneyLevel::DavisCup, 2023, 2023, 0.3);
        assert!((k - 10.0).abs() < 1e-12);
    }
}
