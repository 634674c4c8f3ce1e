use chrono::{NaiveDate, NaiveDateTime};

use crate::rating::GlickoRating;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub phone_consent: bool,
    pub level: String,
    pub ladder_rank: i64,
    pub rating: f64,
    pub rating_deviation: f64,
    pub volatility: f64,
    pub wins: i64,
    pub losses: i64,
    pub matches_played: i64,
    pub created_at: Option<NaiveDateTime>,
}

impl Player {
    pub fn glicko(&self) -> GlickoRating {
        GlickoRating::new(self.rating, self.rating_deviation, self.volatility)
    }
}

/// Immutable match record. Inserted once per successful report, never
/// updated or deleted.
#[derive(Debug, Clone)]
pub struct MatchRow {
    pub id: i64,
    pub match_date: NaiveDate,
    pub location: String,
    pub score: String,
    pub winner_id: i64,
    pub loser_id: i64,
    pub winner_old_rank: i64,
    pub winner_new_rank: i64,
    pub loser_old_rank: i64,
    pub loser_new_rank: i64,
    pub winner_old_rating: f64,
    pub winner_new_rating: f64,
    pub loser_old_rating: f64,
    pub loser_new_rating: f64,
    pub created_at: Option<NaiveDateTime>,
}

/// Fields for one new match row; ids and timestamps are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub match_date: NaiveDate,
    pub location: String,
    pub score: String,
    pub winner_id: i64,
    pub loser_id: i64,
    pub winner_old_rank: i64,
    pub winner_new_rank: i64,
    pub loser_old_rank: i64,
    pub loser_new_rank: i64,
    pub winner_old_rating: f64,
    pub winner_new_rating: f64,
    pub loser_old_rating: f64,
    pub loser_new_rating: f64,
}

// DTO for the match log view
#[derive(Debug, Clone)]
pub struct MatchLogEntry {
    pub match_date: NaiveDate,
    pub location: String,
    pub score: String,
    pub winner_name: String,
    pub loser_name: String,
    pub winner_old_rank: i64,
    pub winner_new_rank: i64,
    pub loser_old_rank: i64,
    pub loser_new_rank: i64,
}
