use crate::domain::Surface;

#[derive(Debug, Clone)]
pub struct EloSettings {
    pub initial_rating: f64,
    pub base_k: f64,
    pub scale: f64,
    /// Exponential down-weighting per year of match age.
    pub decay_rate: f64,
    /// Fraction of the primary delta applied to the two other surfaces.
    pub surface_leakage: f64,
}

impl Default for EloSettings {
    fn default() -> Self {
        Self {
            initial_rating: 1500.0,
            base_k: 20.0,
            scale: 400.0,
            decay_rate: 0.3,
            surface_leakage: 0.8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkillSettings {
    pub initial_mean: f64,
    pub initial_variance: f64,
    /// Performance noise added to the joint variance in the win formula.
    pub beta: f64,
    /// Base standard deviation of the sampled update magnitude.
    pub base_gamma: f64,
    pub decay_rate: f64,
    pub surface_leakage: f64,
    /// Scales how strongly an outcome's surprise moves the variances.
    pub variance_response: f64,
    /// Variance never shrinks below this, however expected the result.
    pub min_variance: f64,
    /// Independent passes over the history averaged into the final table.
    pub runs: usize,
}

impl Default for SkillSettings {
    fn default() -> Self {
        Self {
            initial_mean: 25.0,
            initial_variance: 8.333,
            beta: 25.0 / 6.0,
            base_gamma: 1.0,
            decay_rate: 0.7,
            surface_leakage: 0.8,
            variance_response: 0.05,
            min_variance: 1.0,
            runs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadToHeadSettings {
    /// Games played between a pair at which the blend reaches half strength.
    pub midpoint: f64,
    /// Steepness of the games-played sigmoid.
    pub steepness: f64,
}

impl Default for HeadToHeadSettings {
    fn default() -> Self {
        Self {
            midpoint: 10.0,
            steepness: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FatigueSettings {
    /// Age below which no per-set decay applies.
    pub age_threshold: f64,
    pub clay_decay: f64,
    pub baseline_decay: f64,
}

impl FatigueSettings {
    /// Clay is the most physically punishing surface.
    pub fn decay_rate(&self, surface: Surface) -> f64 {
        match surface {
            Surface::Clay => self.clay_decay,
            Surface::Hard | Surface::Grass => self.baseline_decay,
        }
    }
}

impl Default for FatigueSettings {
    fn default() -> Self {
        Self {
            age_threshold: 25.0,
            clay_decay: 0.015,
            baseline_decay: 0.0075,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub default_trials: usize,
    /// Best-of-N sets; Grand Slams play best of five.
    pub sets_per_match: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            default_trials: 1000,
            sets_per_match: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub elo: EloSettings,
    pub skill: SkillSettings,
    pub head_to_head: HeadToHeadSettings,
    pub fatigue: FatigueSettings,
    pub simulation: SimulationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            elo: EloSettings::default(),
            skill: SkillSettings::default(),
            head_to_head: HeadToHeadSettings::default(),
            fatigue: FatigueSettings::default(),
            simulation: SimulationSettings::default(),
        }
    }
}
