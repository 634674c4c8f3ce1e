use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LadderEntry {
    pub rank: i64,
    pub player_id: i64,
    pub name: String,
    pub level: String,
    /// Present only when the player consented to sharing it.
    pub phone: Option<String>,
    pub rating: f64,
    pub wins: i64,
    pub losses: i64,
    pub matches_played: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLogItem {
    pub match_date: String,
    pub location: String,
    pub score: String,
    pub winner_name: String,
    pub loser_name: String,
    pub winner_old_rank: i64,
    pub winner_new_rank: i64,
    pub loser_old_rank: i64,
    pub loser_new_rank: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub player_name: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub phone_consent: bool,
    pub level: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub match_date: String,
    pub location: String,
    pub winner_id: i64,
    pub loser_id: i64,
    #[serde(default)]
    pub winner_set1: String,
    #[serde(default)]
    pub loser_set1: String,
    #[serde(default)]
    pub winner_set2: String,
    #[serde(default)]
    pub loser_set2: String,
    #[serde(default)]
    pub winner_set3: String,
    #[serde(default)]
    pub loser_set3: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredPlayer {
    pub player_id: i64,
    pub name: String,
    pub level: String,
    pub ladder_rank: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedMatch {
    pub match_id: i64,
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
