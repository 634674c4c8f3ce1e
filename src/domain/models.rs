use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// NTRP-style skill bracket a player registers under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "3.0")]
    ThreeZero,
    #[serde(rename = "3.5")]
    ThreeFive,
    #[serde(rename = "4.0")]
    FourZero,
    #[serde(rename = "4.5")]
    FourFive,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::ThreeZero,
        Level::ThreeFive,
        Level::FourZero,
        Level::FourFive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::ThreeZero => "3.0",
            Level::ThreeFive => "3.5",
            Level::FourZero => "4.0",
            Level::FourFive => "4.5",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == raw.trim())
            .ok_or_else(|| ValidationError::UnknownLevel(raw.to_string()))
    }
}

/// Court location a match may be reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "Lake Rim Park")]
    LakeRimPark,
    #[serde(rename = "Hope Mills Municipal Park")]
    HopeMillsMunicipalPark,
    #[serde(rename = "Mazarick Park")]
    MazarickPark,
    #[serde(rename = "Gates Four")]
    GatesFour,
    #[serde(rename = "Terry Sanford")]
    TerrySanford,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::LakeRimPark,
        Location::HopeMillsMunicipalPark,
        Location::MazarickPark,
        Location::GatesFour,
        Location::TerrySanford,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::LakeRimPark => "Lake Rim Park",
            Location::HopeMillsMunicipalPark => "Hope Mills Municipal Park",
            Location::MazarickPark => "Mazarick Park",
            Location::GatesFour => "Gates Four",
            Location::TerrySanford => "Terry Sanford",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|location| location.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownLocation(raw.to_string()))
    }
}

/// Raw per-set game counts as entered on the report form.
///
/// Empty strings mean the value was left blank; sets 1 and 2 are mandatory,
/// set 3 must be filled on both sides or not at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSetScores {
    pub winner_set1: String,
    pub loser_set1: String,
    pub winner_set2: String,
    pub loser_set2: String,
    pub winner_set3: String,
    pub loser_set3: String,
}

/// One reported match, exactly as supplied by the caller.
///
/// Date and location arrive as raw text and are validated by the recorder;
/// everything downstream of validation works with typed values only.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub date: String,
    pub location: String,
    pub winner_id: i64,
    pub loser_id: i64,
    pub sets: RawSetScores,
}

/// A registration request for a new ladder player.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub phone: Option<String>,
    pub phone_consent: bool,
    pub level: String,
}

pub fn sanitize_text(value: &str, max_len: usize) -> String {
    value.trim().chars().take(max_len).collect()
}
