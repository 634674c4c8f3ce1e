use crate::errors::StateError;
use crate::rating::types::PlayerId;

/// Rank update rule applied after each recorded match.
///
/// The two policies are mutually exclusive: positional swap never touches
/// ratings, and under the resort policy rank movement comes only from the
/// global reorder by rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankPolicy {
    /// Winner takes the loser's rank when ranked worse; players strictly
    /// between them shift down by one.
    PositionalSwap,
    /// All players are reordered by rating after both Glicko updates.
    RatingResort,
}

/// Rank movement computed under the positional-swap policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub winner_old: i64,
    pub winner_new: i64,
    pub loser_old: i64,
    pub loser_new: i64,
    /// Half-open rank range `[lo, hi)` whose holders move down one spot.
    pub shifted: Option<(i64, i64)>,
}

impl SwapOutcome {
    /// New rank for any player on the ladder, given their pre-match rank.
    pub fn new_rank(&self, id: PlayerId, old_rank: i64) -> i64 {
        if id == self.winner_id {
            return self.winner_new;
        }
        match self.shifted {
            Some((lo, hi)) if old_rank >= lo && old_rank < hi => old_rank + 1,
            _ => old_rank,
        }
    }
}

/// Positional swap: a win against a better-ranked player promotes the winner
/// to that rank and demotes everyone in between by one; a win against a
/// worse-ranked player changes nothing. The stored permutation stays
/// contiguous with no global resort.
pub fn resolve_positional_swap(
    winner_id: PlayerId,
    winner_rank: i64,
    loser_id: PlayerId,
    loser_rank: i64,
) -> Result<SwapOutcome, StateError> {
    ensure_distinct_ranks(winner_id, winner_rank, loser_id, loser_rank)?;

    if winner_rank < loser_rank {
        return Ok(SwapOutcome {
            winner_id,
            loser_id,
            winner_old: winner_rank,
            winner_new: winner_rank,
            loser_old: loser_rank,
            loser_new: loser_rank,
            shifted: None,
        });
    }

    Ok(SwapOutcome {
        winner_id,
        loser_id,
        winner_old: winner_rank,
        winner_new: loser_rank,
        loser_old: loser_rank,
        loser_new: loser_rank + 1,
        shifted: Some((loser_rank, winner_rank)),
    })
}

/// Two players holding the same stored rank means the permutation invariant
/// was already broken; refuse to build on top of it.
pub fn ensure_distinct_ranks(
    winner_id: PlayerId,
    winner_rank: i64,
    loser_id: PlayerId,
    loser_rank: i64,
) -> Result<(), StateError> {
    if winner_rank == loser_rank {
        return Err(StateError::SharedRank {
            winner_id,
            loser_id,
            rank: winner_rank,
        });
    }
    Ok(())
}

/// Snapshot of one player's standing fields, as read inside the recording
/// transaction, for the resort ordering.
#[derive(Debug, Clone)]
pub struct Standing {
    pub id: PlayerId,
    pub rating: f64,
    pub deviation: f64,
    pub wins: i64,
    pub matches_played: i64,
}

/// Deterministic total order for the rating-resort policy: rating desc,
/// RD asc, wins desc, matches played desc, id asc.
pub fn sort_standings(standings: &mut [Standing]) {
    standings.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| a.deviation.total_cmp(&b.deviation))
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| b.matches_played.cmp(&a.matches_played))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// 1-based position of a player in a sorted standings slice.
pub fn position_of(standings: &[Standing], id: PlayerId) -> Option<i64> {
    standings
        .iter()
        .position(|s| s.id == id)
        .map(|idx| idx as i64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn winner_at_seven_takes_rank_three_and_middle_shifts() {
        // Ladder of ten; rank 7 beats rank 3.
        let outcome = resolve_positional_swap(7, 7, 3, 3).unwrap();
        assert_eq!(outcome.winner_new, 3);
        assert_eq!(outcome.loser_new, 4);

        // Player ids equal their starting rank for readability.
        let before: Vec<(PlayerId, i64)> = (1..=10).map(|r| (r, r)).collect();
        let after: Vec<i64> = before
            .iter()
            .map(|&(id, rank)| outcome.new_rank(id, rank))
            .collect();

        assert_eq!(after, vec![1, 2, 4, 5, 6, 7, 3, 8, 9, 10]);

        // Still exactly {1..10}, no gaps or duplicates.
        let ranks: BTreeSet<i64> = after.iter().copied().collect();
        assert_eq!(ranks, (1..=10).collect::<BTreeSet<i64>>());
    }

    #[test]
    fn winner_already_better_keeps_all_ranks() {
        let outcome = resolve_positional_swap(2, 2, 5, 5).unwrap();
        assert_eq!(outcome.winner_new, 2);
        assert_eq!(outcome.loser_new, 5);
        assert_eq!(outcome.shifted, None);

        for rank in 1..=10 {
            assert_eq!(outcome.new_rank(rank, rank), rank);
        }
    }

    #[test]
    fn adjacent_swap_moves_only_the_two_players() {
        let outcome = resolve_positional_swap(9, 4, 8, 3).unwrap();
        assert_eq!(outcome.winner_new, 3);
        assert_eq!(outcome.loser_new, 4);
        assert_eq!(outcome.shifted, Some((3, 4)));
        assert_eq!(outcome.new_rank(1, 5), 5);
    }

    #[test]
    fn shared_rank_is_rejected() {
        let err = resolve_positional_swap(1, 4, 2, 4).unwrap_err();
        assert_eq!(
            err,
            StateError::SharedRank {
                winner_id: 1,
                loser_id: 2,
                rank: 4,
            }
        );
    }

    #[test]
    fn resort_orders_by_rating_then_tiebreaks() {
        let mut standings = vec![
            Standing {
                id: 1,
                rating: 1500.0,
                deviation: 200.0,
                wins: 3,
                matches_played: 5,
            },
            Standing {
                id: 2,
                rating: 1620.0,
                deviation: 180.0,
                wins: 4,
                matches_played: 6,
            },
            // Same rating as player 1 but tighter RD: ranks above it.
            Standing {
                id: 3,
                rating: 1500.0,
                deviation: 120.0,
                wins: 2,
                matches_played: 4,
            },
        ];

        sort_standings(&mut standings);

        let order: Vec<PlayerId> = standings.iter().map(|s| s.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(position_of(&standings, 2), Some(1));
        assert_eq!(position_of(&standings, 1), Some(3));
    }

    #[test]
    fn resort_breaks_full_ties_by_id() {
        let same = |id| Standing {
            id,
            rating: 1500.0,
            deviation: 350.0,
            wins: 0,
            matches_played: 0,
        };
        let mut standings = vec![same(9), same(2), same(5)];

        sort_standings(&mut standings);

        let order: Vec<PlayerId> = standings.iter().map(|s| s.id).collect();
        assert_eq!(order, vec![2, 5, 9]);
    }
}
