//! Vote uniqueness rule
//!
//! A voter may record at most one outcome per unordered pair of players per
//! rating period. [`VoteKey`] is the canonical form of that rule: two
//! submissions collide exactly when their keys are equal, whichever player
//! was named the winner. Repositories enforce it atomically on insert.

use serde::Serialize;

use crate::domain::entities::PlayerId;
use crate::domain::period::RatingPeriod;
use crate::error::DomainError;

/// Message surfaced to callers when a vote collides with an earlier one
pub const DUPLICATE_VOTE_MESSAGE: &str =
    "You have already voted for this pair of players this week";

/// Two distinct players, stored low id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlayerPair {
    low: PlayerId,
    high: PlayerId,
}

impl PlayerPair {
    /// Build a pair, rejecting a player paired with themselves
    pub fn new(a: PlayerId, b: PlayerId) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::Validation(
                "Winner and loser cannot be the same player".to_string(),
            ));
        }
        Ok(Self::canonical(a, b))
    }

    /// Order two ids canonically without validating them
    pub(crate) fn canonical(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> PlayerId {
        self.low
    }

    pub fn high(&self) -> PlayerId {
        self.high
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.low == *player || self.high == *player
    }
}

/// Key under which at most one match may exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VoteKey {
    pub voter: PlayerId,
    pub period: RatingPeriod,
    pub pair: PlayerPair,
}

impl VoteKey {
    pub fn new(voter: PlayerId, period: RatingPeriod, pair: PlayerPair) -> Self {
        Self {
            voter,
            period,
            pair,
        }
    }
}

/// The error every repository returns when a key is already taken
pub fn duplicate_vote() -> DomainError {
    DomainError::DuplicateVote(DUPLICATE_VOTE_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn period(week: u32) -> RatingPeriod {
        RatingPeriod::new(2025, week).unwrap()
    }

    #[test]
    fn pair_rejects_same_player() {
        let p = PlayerId::new();
        assert!(matches!(
            PlayerPair::new(p, p),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn pair_is_order_independent() {
        let (a, b) = (PlayerId::new(), PlayerId::new());
        let ab = PlayerPair::new(a, b).unwrap();
        let ba = PlayerPair::new(b, a).unwrap();

        assert_eq!(ab, ba);
        assert!(ab.low() < ab.high());
        assert!(ab.contains(&a) && ab.contains(&b));
        assert!(!ab.contains(&PlayerId::new()));
    }

    #[test]
    fn keys_collide_in_either_order() {
        let (a, b, voter) = (PlayerId::new(), PlayerId::new(), PlayerId::new());
        let mut taken = HashSet::new();

        assert!(taken.insert(VoteKey::new(voter, period(14), PlayerPair::new(a, b).unwrap())));
        assert!(!taken.insert(VoteKey::new(voter, period(14), PlayerPair::new(b, a).unwrap())));
    }

    #[test]
    fn different_period_or_voter_does_not_collide() {
        let (a, b) = (PlayerId::new(), PlayerId::new());
        let (voter, other_voter) = (PlayerId::new(), PlayerId::new());
        let pair = PlayerPair::new(a, b).unwrap();
        let mut taken = HashSet::new();

        assert!(taken.insert(VoteKey::new(voter, period(14), pair)));
        assert!(taken.insert(VoteKey::new(voter, period(15), pair)));
        assert!(taken.insert(VoteKey::new(other_voter, period(14), pair)));
    }

    #[test]
    fn duplicate_vote_error_kind() {
        assert!(matches!(duplicate_vote(), DomainError::DuplicateVote(_)));
    }
}
