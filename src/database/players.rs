use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Player;
use crate::ladder::Standing;
use crate::rating::GlickoRating;

const PLAYER_COLUMNS: &str = "id, name, phone, phone_consent, level, ladder_rank, rating, rating_deviation, volatility, wins, losses, matches_played, created_at";

/// Rank assigned to the next registered player: one past the current bottom.
pub fn next_rank(conn: &Connection) -> Result<i64> {
    let sql = "SELECT COALESCE(MAX(ladder_rank), 0) + 1 FROM players";
    conn.query_row(sql, [], |row| row.get(0))
        .context("Failed to compute next ladder rank")
}

pub fn insert_player(
    conn: &Connection,
    name: &str,
    phone: Option<&str>,
    phone_consent: bool,
    level: &str,
    ladder_rank: i64,
    rating: GlickoRating,
) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (name, phone, phone_consent, level, ladder_rank, rating, rating_deviation, volatility) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            name,
            phone,
            phone_consent,
            level,
            ladder_rank,
            rating.rating,
            rating.deviation,
            rating.volatility
        ],
        parse_player_row,
    )
    .context("Failed to insert new player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        phone_consent: row.get(3)?,
        level: row.get(4)?,
        ladder_rank: row.get(5)?,
        rating: row.get(6)?,
        rating_deviation: row.get(7)?,
        volatility: row.get(8)?,
        wins: row.get(9)?,
        losses: row.get(10)?,
        matches_played: row.get(11)?,
        created_at: row.get(12)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE name = ?1");

    conn.query_row(&sql, params![name], parse_player_row)
        .optional()
        .context("Failed to query player by name")
}

pub fn list_by_rank(conn: &Connection) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY ladder_rank ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Demote every player holding a rank in the half-open range `[lo, hi)` by
/// one position. Used by the positional-swap policy before the winner takes
/// the vacated rank.
pub fn shift_ranks_down(conn: &Connection, lo: i64, hi: i64) -> Result<usize> {
    let sql = "UPDATE players SET ladder_rank = ladder_rank + 1 WHERE ladder_rank >= ?1 AND ladder_rank < ?2";

    conn.execute(sql, params![lo, hi])
        .context("Failed to shift ladder ranks")
}

pub fn set_rank(conn: &Connection, id: i64, ladder_rank: i64) -> Result<()> {
    let sql = "UPDATE players SET ladder_rank = ?1 WHERE id = ?2";

    conn.execute(sql, params![ladder_rank, id])
        .context("Failed to update ladder rank")
        .map(|_| ())
}

pub fn set_rating(conn: &Connection, id: i64, rating: &GlickoRating) -> Result<()> {
    let sql =
        "UPDATE players SET rating = ?1, rating_deviation = ?2, volatility = ?3 WHERE id = ?4";

    conn.execute(
        sql,
        params![rating.rating, rating.deviation, rating.volatility, id],
    )
    .context("Failed to update rating state")
    .map(|_| ())
}

pub fn bump_counters(conn: &Connection, id: i64, won: bool) -> Result<()> {
    let sql = if won {
        "UPDATE players SET wins = wins + 1, matches_played = matches_played + 1 WHERE id = ?1"
    } else {
        "UPDATE players SET losses = losses + 1, matches_played = matches_played + 1 WHERE id = ?1"
    };

    conn.execute(sql, params![id])
        .context("Failed to update match counters")
        .map(|_| ())
}

/// Standing fields for the resort ordering, unordered; the resolver sorts.
pub fn list_standings(conn: &Connection) -> Result<Vec<Standing>> {
    let sql = "SELECT id, rating, rating_deviation, wins, matches_played FROM players";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Standing {
                id: row.get(0)?,
                rating: row.get(1)?,
                deviation: row.get(2)?,
                wins: row.get(3)?,
                matches_played: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
