use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{MatchLogEntry, MatchRow, NewMatch};

const MATCH_COLUMNS: &str = "id, match_date, location, score, winner_id, loser_id, winner_old_rank, winner_new_rank, loser_old_rank, loser_new_rank, winner_old_rating, winner_new_rating, loser_old_rating, loser_new_rating, created_at";

pub fn insert_match(conn: &Connection, new_match: &NewMatch) -> Result<MatchRow> {
    let sql = format!(
        "INSERT INTO matches (match_date, location, score, winner_id, loser_id, winner_old_rank, winner_new_rank, loser_old_rank, loser_new_rank, winner_old_rating, winner_new_rating, loser_old_rating, loser_new_rating) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13) RETURNING {MATCH_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            new_match.match_date,
            new_match.location,
            new_match.score,
            new_match.winner_id,
            new_match.loser_id,
            new_match.winner_old_rank,
            new_match.winner_new_rank,
            new_match.loser_old_rank,
            new_match.loser_new_rank,
            new_match.winner_old_rating,
            new_match.winner_new_rating,
            new_match.loser_old_rating,
            new_match.loser_new_rating,
        ],
        parse_match_row,
    )
    .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        match_date: row.get(1)?,
        location: row.get(2)?,
        score: row.get(3)?,
        winner_id: row.get(4)?,
        loser_id: row.get(5)?,
        winner_old_rank: row.get(6)?,
        winner_new_rank: row.get(7)?,
        loser_old_rank: row.get(8)?,
        loser_new_rank: row.get(9)?,
        winner_old_rating: row.get(10)?,
        winner_new_rating: row.get(11)?,
        loser_old_rating: row.get(12)?,
        loser_new_rating: row.get(13)?,
        created_at: row.get(14)?,
    })
}

/// Match log, newest first, with player names resolved for display.
pub fn list_log(conn: &Connection) -> Result<Vec<MatchLogEntry>> {
    let sql = "
        SELECT
            m.match_date,
            m.location,
            m.score,
            w.name AS winner_name,
            l.name AS loser_name,
            m.winner_old_rank,
            m.winner_new_rank,
            m.loser_old_rank,
            m.loser_new_rank
        FROM matches m
        JOIN players w ON m.winner_id = w.id
        JOIN players l ON m.loser_id = l.id
        ORDER BY m.match_date DESC, m.id DESC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(MatchLogEntry {
                match_date: row.get(0)?,
                location: row.get(1)?,
                score: row.get(2)?,
                winner_name: row.get(3)?,
                loser_name: row.get(4)?,
                winner_old_rank: row.get(5)?,
                winner_new_rank: row.get(6)?,
                loser_old_rank: row.get(7)?,
                loser_new_rank: row.get(8)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::AppConfig;
    use crate::database::connection::create_test_pool;
    use crate::database::setup::reset_database;
    use crate::database::players;
    use crate::rating::GlickoRating;
    use chrono::NaiveDate;

    fn new_match(date: &str, winner_id: i64, loser_id: i64, score: &str) -> NewMatch {
        NewMatch {
            match_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            location: "Gates Four".to_string(),
            score: score.to_string(),
            winner_id,
            loser_id,
            winner_old_rank: 2,
            winner_new_rank: 1,
            loser_old_rank: 1,
            loser_new_rank: 2,
            winner_old_rating: 1500.0,
            winner_new_rating: 1500.0,
            loser_old_rating: 1500.0,
            loser_new_rating: 1500.0,
        }
    }

    #[test]
    fn log_resolves_names_and_lists_newest_first() {
        let pool = create_test_pool();
        let conn = pool.get().unwrap();
        reset_database(&conn).unwrap();

        let starter = GlickoRating::starter(&AppConfig::new().rating);
        players::insert_player(&conn, "Ana", None, false, "4.0", 1, starter).unwrap();
        players::insert_player(&conn, "Beto", None, false, "3.5", 2, starter).unwrap();

        insert_match(&conn, &new_match("2026-07-04", 2, 1, "6-4 6-3")).unwrap();
        insert_match(&conn, &new_match("2026-07-18", 1, 2, "7-5 6-4")).unwrap();

        let log = list_log(&conn).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].winner_name, "Ana");
        assert_eq!(log[0].loser_name, "Beto");
        assert_eq!(log[0].score, "7-5 6-4");
        assert_eq!(log[1].winner_name, "Beto");
    }
}
