pub mod models;
pub mod score;

pub use models::{Level, Location, MatchReport, RawSetScores, Registration};
pub use score::{parse_score, Score, SetScore};
