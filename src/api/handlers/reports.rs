use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{RecordedMatch, RegisterBody, RegisteredPlayer, ReportBody};
use crate::domain::models::{MatchReport, RawSetScores, Registration};
use super::{error_response, AppState};

pub async fn post_register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> impl IntoResponse {
    let registration = Registration {
        name: body.player_name,
        phone: body.phone,
        phone_consent: body.phone_consent,
        level: body.level,
    };

    match state.registration.register(&registration) {
        Ok(player) => (
            StatusCode::CREATED,
            Json(RegisteredPlayer {
                player_id: player.id,
                name: player.name,
                level: player.level,
                ladder_rank: player.ladder_rank,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn post_match(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ReportBody>,
) -> impl IntoResponse {
    // The session layer is outside this backend; a shared reporting key
    // stands in for "this caller may report matches".
    let authorized = match &state.config.auth.report_key {
        None => true,
        Some(key) => {
            let auth_header = headers.get("Authorization").and_then(|h| h.to_str().ok());
            auth_header == Some(format!("Bearer {key}").as_str())
        }
    };

    let report = MatchReport {
        date: body.match_date,
        location: body.location,
        winner_id: body.winner_id,
        loser_id: body.loser_id,
        sets: RawSetScores {
            winner_set1: body.winner_set1,
            loser_set1: body.loser_set1,
            winner_set2: body.winner_set2,
            loser_set2: body.loser_set2,
            winner_set3: body.winner_set3,
            loser_set3: body.loser_set3,
        },
    };

    match state.recorder.record(&report, authorized) {
        Ok(row) => (
            StatusCode::CREATED,
            Json(RecordedMatch {
                match_id: row.id,
                score: row.score,
                winner_id: row.winner_id,
                loser_id: row.loser_id,
                winner_old_rank: row.winner_old_rank,
                winner_new_rank: row.winner_new_rank,
                loser_old_rank: row.loser_old_rank,
                loser_new_rank: row.loser_new_rank,
                winner_old_rating: row.winner_old_rating,
                winner_new_rating: row.winner_new_rating,
                loser_old_rating: row.loser_old_rating,
                loser_new_rating: row.loser_new_rating,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
