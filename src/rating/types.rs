use serde::{Deserialize, Serialize};

use crate::config::settings::RatingSettings;

pub type PlayerId = i64;

/// A player's Glicko-2 skill estimate: rating, its uncertainty (RD) and the
/// expected rate of change (volatility).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlickoRating {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

impl GlickoRating {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Self {
        Self {
            rating,
            deviation,
            volatility,
        }
    }

    pub fn starter(settings: &RatingSettings) -> Self {
        Self {
            rating: settings.default_rating,
            deviation: settings.default_deviation,
            volatility: settings.default_volatility,
        }
    }

    /// Replace any non-finite component with its default so a corrupt row
    /// can never push NaN through the update.
    pub fn sanitized(self, settings: &RatingSettings) -> Self {
        Self {
            rating: finite_or(self.rating, settings.default_rating),
            deviation: finite_or(self.deviation, settings.default_deviation),
            volatility: finite_or(self.volatility, settings.default_volatility),
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Match outcome from one player's perspective. Ladder matches are always
/// decisive; there are no draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
        }
    }
}
