use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    ladder::{get_ladder, get_matches},
    reports::{post_match, post_register},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ladder", get(get_ladder))
        .route("/api/matches", get(get_matches).post(post_match))
        .route("/api/players", post(post_register))
        .with_state(state)
}
