use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use rusqlite::Transaction;

use crate::config::settings::AppConfig;
use crate::database::models::{MatchRow, NewMatch, Player};
use crate::database::{self, DbPool};
use crate::domain::models::{Location, MatchReport};
use crate::domain::score::parse_score;
use crate::errors::{LadderError, StateError, ValidationError};
use crate::ladder::{
    ensure_distinct_ranks, position_of, resolve_positional_swap, sort_standings, RankPolicy,
};
use crate::rating::{update_rating, Outcome};

/// Records one reported match: validates inputs, applies the configured
/// rank policy and persists the match and both player updates as a single
/// atomic unit.
pub struct MatchRecorder {
    pool: DbPool,
    config: AppConfig,
}

impl MatchRecorder {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    /// Record a reported result. `authorized` comes from the session layer;
    /// everything else is validated here. Nothing is written unless every
    /// step succeeds.
    pub fn record(
        &self,
        report: &MatchReport,
        authorized: bool,
    ) -> Result<MatchRow, LadderError> {
        if !authorized {
            return Err(LadderError::Unauthorized);
        }

        let (match_date, location) = validate_report(report)?;
        let score = parse_score(&report.sets, &self.config.score)?;
        let canonical_score = score.canonical();

        let mut conn = database::get_connection(&self.pool)?;
        let row = database::with_immediate_tx(&mut conn, |tx| {
            let winner = load_player(tx, report.winner_id)?;
            let loser = load_player(tx, report.loser_id)?;

            match self.config.ladder.policy {
                RankPolicy::PositionalSwap => {
                    self.record_with_swap(tx, match_date, location, &canonical_score, &winner, &loser)
                }
                RankPolicy::RatingResort => {
                    self.record_with_resort(tx, match_date, location, &canonical_score, &winner, &loser)
                }
            }
        })?;

        info!(
            "Recorded match {} def. {} ({}) at {}: winner rank {} -> {}",
            row.winner_id, row.loser_id, row.score, row.location, row.winner_old_rank, row.winner_new_rank
        );
        Ok(row)
    }

    /// Positional swap: ratings stay untouched; only ranks move, and only
    /// for players between the two participants.
    fn record_with_swap(
        &self,
        tx: &Transaction,
        match_date: NaiveDate,
        location: Location,
        score: &str,
        winner: &Player,
        loser: &Player,
    ) -> Result<MatchRow, LadderError> {
        let outcome = resolve_positional_swap(
            winner.id,
            winner.ladder_rank,
            loser.id,
            loser.ladder_rank,
        )?;

        if let Some((lo, hi)) = outcome.shifted {
            database::players::shift_ranks_down(tx, lo, hi)?;
            database::players::set_rank(tx, winner.id, outcome.winner_new)?;
        }

        database::players::bump_counters(tx, winner.id, true)?;
        database::players::bump_counters(tx, loser.id, false)?;

        let row = database::matches::insert_match(
            tx,
            &NewMatch {
                match_date,
                location: location.as_str().to_string(),
                score: score.to_string(),
                winner_id: winner.id,
                loser_id: loser.id,
                winner_old_rank: outcome.winner_old,
                winner_new_rank: outcome.winner_new,
                loser_old_rank: outcome.loser_old,
                loser_new_rank: outcome.loser_new,
                winner_old_rating: winner.rating,
                winner_new_rating: winner.rating,
                loser_old_rating: loser.rating,
                loser_new_rating: loser.rating,
            },
        )?;
        Ok(row)
    }

    /// Rating resort: both Glicko updates run, then every player's stored
    /// rank is rewritten from the fresh rating order.
    fn record_with_resort(
        &self,
        tx: &Transaction,
        match_date: NaiveDate,
        location: Location,
        score: &str,
        winner: &Player,
        loser: &Player,
    ) -> Result<MatchRow, LadderError> {
        ensure_distinct_ranks(winner.id, winner.ladder_rank, loser.id, loser.ladder_rank)?;

        // Both updates are computed from pre-match state.
        let winner_rating = update_rating(
            winner.glicko(),
            loser.glicko(),
            Outcome::Win,
            &self.config.rating,
        );
        let loser_rating = update_rating(
            loser.glicko(),
            winner.glicko(),
            Outcome::Loss,
            &self.config.rating,
        );

        database::players::set_rating(tx, winner.id, &winner_rating)?;
        database::players::set_rating(tx, loser.id, &loser_rating)?;
        database::players::bump_counters(tx, winner.id, true)?;
        database::players::bump_counters(tx, loser.id, false)?;

        let mut standings = database::players::list_standings(tx)?;
        sort_standings(&mut standings);
        for (idx, standing) in standings.iter().enumerate() {
            database::players::set_rank(tx, standing.id, idx as i64 + 1)?;
        }

        let winner_new_rank = position_of(&standings, winner.id)
            .ok_or(StateError::PlayerNotFound(winner.id))?;
        let loser_new_rank =
            position_of(&standings, loser.id).ok_or(StateError::PlayerNotFound(loser.id))?;

        let row = database::matches::insert_match(
            tx,
            &NewMatch {
                match_date,
                location: location.as_str().to_string(),
                score: score.to_string(),
                winner_id: winner.id,
                loser_id: loser.id,
                winner_old_rank: winner.ladder_rank,
                winner_new_rank,
                loser_old_rank: loser.ladder_rank,
                loser_new_rank,
                winner_old_rating: winner.rating,
                winner_new_rating: winner_rating.rating,
                loser_old_rating: loser.rating,
                loser_new_rating: loser_rating.rating,
            },
        )?;
        Ok(row)
    }
}

fn validate_report(report: &MatchReport) -> Result<(NaiveDate, Location), ValidationError> {
    let raw_date = report.date.trim();
    if raw_date.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    let match_date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(report.date.clone()))?;

    let location = Location::parse(&report.location)?;

    if report.winner_id <= 0 {
        return Err(ValidationError::InvalidPlayerId { role: "Winner" });
    }
    if report.loser_id <= 0 {
        return Err(ValidationError::InvalidPlayerId { role: "Loser" });
    }
    if report.winner_id == report.loser_id {
        return Err(ValidationError::SamePlayer);
    }

    Ok((match_date, location))
}

fn load_player(tx: &Transaction, id: i64) -> Result<Player, LadderError> {
    database::players::find_by_id(tx, id)?
        .ok_or_else(|| StateError::PlayerNotFound(id).into())
}
