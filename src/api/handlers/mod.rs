use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::errors::LadderError;
use crate::services::recorder::MatchRecorder;
use crate::services::registration::RegistrationService;

pub mod ladder;
pub mod reports;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
    pub recorder: MatchRecorder,
    pub registration: RegistrationService,
}

/// Map core failures onto HTTP statuses. The original served plain-text
/// error pages; this keeps the same bodies as text.
pub fn error_response(err: LadderError) -> Response {
    let status = match &err {
        LadderError::Unauthorized => StatusCode::UNAUTHORIZED,
        LadderError::Validation(_) | LadderError::Score(_) => StatusCode::BAD_REQUEST,
        LadderError::State(_) => StatusCode::CONFLICT,
        LadderError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("match report failed: {err:?}");
        return (status, "Error saving match. Please try again.".to_string()).into_response();
    }

    (status, err.to_string()).into_response()
}
