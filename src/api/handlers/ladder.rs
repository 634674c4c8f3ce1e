use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{LadderEntry, MatchLogItem};
use crate::database;
use super::AppState;

pub async fn get_ladder(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let players = match database::players::list_by_rank(&conn) {
        Ok(players) => players,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    let entries: Vec<LadderEntry> = players
        .into_iter()
        .map(|p| {
            let phone = if p.phone_consent { p.phone.clone() } else { None };
            LadderEntry {
                rank: p.ladder_rank,
                player_id: p.id,
                name: p.name,
                level: p.level,
                phone,
                rating: p.rating,
                wins: p.wins,
                losses: p.losses,
                matches_played: p.matches_played,
            }
        })
        .collect();

    Json(entries).into_response()
}

pub async fn get_matches(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let log = match database::matches::list_log(&conn) {
        Ok(log) => log,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    let items: Vec<MatchLogItem> = log
        .into_iter()
        .map(|m| MatchLogItem {
            match_date: m.match_date.format("%Y-%m-%d").to_string(),
            location: m.location,
            score: m.score,
            winner_name: m.winner_name,
            loser_name: m.loser_name,
            winner_old_rank: m.winner_old_rank,
            winner_new_rank: m.winner_new_rank,
            loser_old_rank: m.loser_old_rank,
            loser_new_rank: m.loser_new_rank,
        })
        .collect();

    Json(items).into_response()
}
