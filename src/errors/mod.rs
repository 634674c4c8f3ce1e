use thiserror::Error;

/// Top-level failure type for ladder operations.
///
/// Validation and score failures are always produced before anything is
/// written; storage failures roll the whole transaction back, so callers
/// never observe partial state.
#[derive(Debug, Error)]
pub enum LadderError {
    #[error("caller is not allowed to report matches")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("storage failure: {0}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for LadderError {
    fn from(err: anyhow::Error) -> Self {
        LadderError::Storage(err)
    }
}

impl From<rusqlite::Error> for LadderError {
    fn from(err: rusqlite::Error) -> Self {
        LadderError::Storage(err.into())
    }
}

/// Rejected input on a registration or match report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Match Date is required.")]
    MissingDate,

    #[error("Invalid Match Date.")]
    InvalidDate(String),

    #[error("Invalid location.")]
    UnknownLocation(String),

    #[error("Invalid level. Allowed values: 3.0, 3.5, 4.0, 4.5.")]
    UnknownLevel(String),

    #[error("Invalid {role} player.")]
    InvalidPlayerId { role: &'static str },

    #[error("Winner and Loser must be different players.")]
    SamePlayer,

    #[error("Player Name is required.")]
    MissingName,

    #[error("A player with this name is already registered.")]
    DuplicateName(String),

    #[error("Invalid phone format. Only digits, spaces, +, -, and parentheses are allowed.")]
    InvalidPhone,
}

/// Rejected set scores on a match report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Score for Set {0} is incomplete (both Winner and Loser need a value).")]
    IncompleteSet(u8),

    #[error("Score for Set {0} must be whole numbers.")]
    NotANumber(u8),

    #[error("Score for Set {set} must be between 0 and {max}.")]
    OutOfRange { set: u8, max: u32 },

    #[error("Score for Set {0} cannot be 0-0.")]
    ZeroZero(u8),

    #[error("You must enter complete scores for Set 1 and Set 2.")]
    TooFewSets,
}

/// Corrupt or missing persisted state detected while recording a match.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("player {0} not found")]
    PlayerNotFound(i64),

    #[error("players {winner_id} and {loser_id} share ladder rank {rank}")]
    SharedRank {
        winner_id: i64,
        loser_id: i64,
        rank: i64,
    },
}
