use std::fmt;

use crate::config::settings::ScoreSettings;
use crate::domain::models::RawSetScores;
use crate::errors::ScoreError;

/// Games won by each side in one set, from the match winner's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetScore {
    pub winner_games: u32,
    pub loser_games: u32,
}

/// A validated match score of two or three sets.
///
/// Only the canonical text form is persisted; this struct exists for
/// validation and is dropped once the string is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    sets: Vec<SetScore>,
}

impl Score {
    pub fn sets(&self) -> &[SetScore] {
        &self.sets
    }

    /// Canonical persisted form: `"W-L W-L"` or `"W-L W-L W-L"`.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, set) in self.sets.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}-{}", set.winner_games, set.loser_games)?;
        }
        Ok(())
    }
}

/// Validate raw per-set entries and build the canonical score.
///
/// Sets 1 and 2 are mandatory; set 3 must be entered on both sides or left
/// blank on both. With `enforce_bounds` set, games are capped per set and a
/// 0-0 set is rejected as degenerate.
pub fn parse_score(raw: &RawSetScores, settings: &ScoreSettings) -> Result<Score, ScoreError> {
    let entries = [
        (1u8, &raw.winner_set1, &raw.loser_set1),
        (2u8, &raw.winner_set2, &raw.loser_set2),
        (3u8, &raw.winner_set3, &raw.loser_set3),
    ];

    let mut sets = Vec::with_capacity(3);

    for (set_no, winner_raw, loser_raw) in entries {
        let winner_raw = winner_raw.trim();
        let loser_raw = loser_raw.trim();

        if set_no == 3 {
            if winner_raw.is_empty() && loser_raw.is_empty() {
                continue;
            }
            if winner_raw.is_empty() || loser_raw.is_empty() {
                return Err(ScoreError::IncompleteSet(3));
            }
        } else if winner_raw.is_empty() || loser_raw.is_empty() {
            return Err(ScoreError::IncompleteSet(set_no));
        }

        let set = parse_set(set_no, winner_raw, loser_raw, settings)?;
        sets.push(set);
    }

    if sets.len() < 2 {
        return Err(ScoreError::TooFewSets);
    }

    Ok(Score { sets })
}

fn parse_set(
    set_no: u8,
    winner_raw: &str,
    loser_raw: &str,
    settings: &ScoreSettings,
) -> Result<SetScore, ScoreError> {
    let winner_games = parse_games(set_no, winner_raw)?;
    let loser_games = parse_games(set_no, loser_raw)?;

    if settings.enforce_bounds {
        let max = if set_no == 3 {
            settings.max_games_deciding_set
        } else {
            settings.max_games_regular_set
        };
        if winner_games > max || loser_games > max {
            return Err(ScoreError::OutOfRange { set: set_no, max });
        }
        if winner_games == 0 && loser_games == 0 {
            return Err(ScoreError::ZeroZero(set_no));
        }
    }

    Ok(SetScore {
        winner_games,
        loser_games,
    })
}

fn parse_games(set_no: u8, raw: &str) -> Result<u32, ScoreError> {
    raw.parse::<u32>()
        .map_err(|_| ScoreError::NotANumber(set_no))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: [&str; 6]) -> RawSetScores {
        RawSetScores {
            winner_set1: entries[0].to_string(),
            loser_set1: entries[1].to_string(),
            winner_set2: entries[2].to_string(),
            loser_set2: entries[3].to_string(),
            winner_set3: entries[4].to_string(),
            loser_set3: entries[5].to_string(),
        }
    }

    fn strict() -> ScoreSettings {
        ScoreSettings::default()
    }

    fn lenient() -> ScoreSettings {
        ScoreSettings {
            enforce_bounds: false,
            ..ScoreSettings::default()
        }
    }

    #[test]
    fn two_set_score_round_trips() {
        let score = parse_score(&raw(["6", "4", "7", "5", "", ""]), &strict()).unwrap();
        assert_eq!(score.canonical(), "6-4 7-5");

        let pairs: Vec<(u32, u32)> = score
            .canonical()
            .split(' ')
            .map(|s| {
                let (w, l) = s.split_once('-').unwrap();
                (w.parse().unwrap(), l.parse().unwrap())
            })
            .collect();
        assert_eq!(pairs, vec![(6, 4), (7, 5)]);
    }

    #[test]
    fn three_set_score_round_trips() {
        let score = parse_score(&raw(["6", "4", "3", "6", "10", "8"]), &strict()).unwrap();
        assert_eq!(score.canonical(), "6-4 3-6 10-8");
        assert_eq!(score.sets().len(), 3);
    }

    #[test]
    fn missing_mandatory_set_value_is_incomplete() {
        let err = parse_score(&raw(["6", "", "6", "3", "", ""]), &strict()).unwrap_err();
        assert_eq!(err, ScoreError::IncompleteSet(1));

        let err = parse_score(&raw(["6", "4", "", "3", "", ""]), &strict()).unwrap_err();
        assert_eq!(err, ScoreError::IncompleteSet(2));
    }

    #[test]
    fn one_sided_third_set_is_rejected_even_with_valid_earlier_sets() {
        let err = parse_score(&raw(["6", "4", "6", "3", "6", ""]), &strict()).unwrap_err();
        assert_eq!(err, ScoreError::IncompleteSet(3));

        let err = parse_score(&raw(["6", "4", "6", "3", "", "2"]), &strict()).unwrap_err();
        assert_eq!(err, ScoreError::IncompleteSet(3));
    }

    #[test]
    fn non_numeric_games_are_rejected() {
        let err = parse_score(&raw(["six", "4", "6", "3", "", ""]), &strict()).unwrap_err();
        assert_eq!(err, ScoreError::NotANumber(1));

        let err = parse_score(&raw(["6", "4", "6", "-3", "", ""]), &strict()).unwrap_err();
        assert_eq!(err, ScoreError::NotANumber(2));
    }

    #[test]
    fn strict_rules_cap_games_per_set() {
        let err = parse_score(&raw(["11", "4", "6", "3", "", ""]), &strict()).unwrap_err();
        assert_eq!(err, ScoreError::OutOfRange { set: 1, max: 10 });

        let err = parse_score(&raw(["6", "4", "6", "3", "21", "19"]), &strict()).unwrap_err();
        assert_eq!(err, ScoreError::OutOfRange { set: 3, max: 20 });
    }

    #[test]
    fn strict_rules_reject_zero_zero_set() {
        let err = parse_score(&raw(["6", "4", "0", "0", "", ""]), &strict()).unwrap_err();
        assert_eq!(err, ScoreError::ZeroZero(2));
    }

    #[test]
    fn lenient_rules_allow_large_and_zero_zero_sets() {
        let score = parse_score(&raw(["15", "13", "0", "0", "", ""]), &lenient()).unwrap();
        assert_eq!(score.canonical(), "15-13 0-0");
    }
}
