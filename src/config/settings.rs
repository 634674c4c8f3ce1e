use crate::ladder::RankPolicy;

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub default_rating: f64,
    pub default_deviation: f64,
    pub default_volatility: f64,
    pub tau: f64,
    pub deviation_floor: f64,
    pub deviation_ceiling: f64,
    pub convergence_tolerance: f64,
    pub max_iterations: usize,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            default_rating: 1500.0,
            default_deviation: 350.0,
            default_volatility: 0.06,
            tau: 0.5,
            deviation_floor: 30.0,
            deviation_ceiling: 350.0,
            convergence_tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreSettings {
    /// When set, games are capped per set and a 0-0 set is rejected.
    /// Matches the strictest revision of the report form; turning it off
    /// keeps only completeness and integer checks.
    pub enforce_bounds: bool,
    pub max_games_regular_set: u32,
    pub max_games_deciding_set: u32,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            enforce_bounds: true,
            max_games_regular_set: 10,
            max_games_deciding_set: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LadderSettings {
    pub policy: RankPolicy,
    pub max_name_len: usize,
    pub max_phone_len: usize,
}

impl Default for LadderSettings {
    fn default() -> Self {
        Self {
            policy: RankPolicy::PositionalSwap,
            max_name_len: 100,
            max_phone_len: 25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Shared key required to report matches; `None` disables the check.
    /// Stands in for the session layer, which is outside this backend.
    pub report_key: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            report_key: std::env::var("REPORT_KEY").ok(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub score: ScoreSettings,
    pub ladder: LadderSettings,
    pub auth: AuthSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// Passed explicitly (dependency injection) rather than held in globals.
