//! Match domain entity
//!
//! An immutable record of one pairwise outcome, including the rating change
//! applied to each side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::PlayerId;
use crate::domain::period::RatingPeriod;
use crate::domain::vote::{PlayerPair, VoteKey};
use crate::error::DomainError;

/// Unique identifier for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for MatchId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded outcome
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub id: MatchId,
    #[serde(flatten)]
    pub period: RatingPeriod,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub voter_id: Option<PlayerId>,
    pub winner_elo_change: i32,
    pub loser_elo_change: i32,
    pub winner_elo_after: i32,
    pub loser_elo_after: i32,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// The unordered pair of players involved
    pub fn pair(&self) -> PlayerPair {
        PlayerPair::canonical(self.winner_id, self.loser_id)
    }

    /// The uniqueness key, when the vote is attributed
    pub fn vote_key(&self) -> Option<VoteKey> {
        self.voter_id
            .map(|voter| VoteKey::new(voter, self.period, self.pair()))
    }

    /// Check whether a player took part in this match
    pub fn involves(&self, player: &PlayerId) -> bool {
        self.winner_id == *player || self.loser_id == *player
    }
}

/// A validated outcome ready to be recorded
///
/// Construction enforces that winner and loser differ and that an attributed
/// voter is neither of them.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub period: RatingPeriod,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub voter_id: Option<PlayerId>,
    pair: PlayerPair,
}

impl NewMatch {
    pub fn new(
        period: RatingPeriod,
        winner_id: PlayerId,
        loser_id: PlayerId,
        voter_id: Option<PlayerId>,
    ) -> Result<Self, DomainError> {
        let pair = PlayerPair::new(winner_id, loser_id)?;

        if let Some(voter) = voter_id {
            if pair.contains(&voter) {
                return Err(DomainError::Validation(
                    "You cannot vote in a match you played in".to_string(),
                ));
            }
        }

        Ok(Self {
            period,
            winner_id,
            loser_id,
            voter_id,
            pair,
        })
    }

    pub fn pair(&self) -> PlayerPair {
        self.pair
    }

    pub fn vote_key(&self) -> Option<VoteKey> {
        self.voter_id
            .map(|voter| VoteKey::new(voter, self.period, self.pair))
    }
}

/// Filter for listing matches
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub period: Option<RatingPeriod>,
    /// Matches involving this player
    pub player: Option<PlayerId>,
    /// Combined with `player`, narrows to matches between exactly these two
    pub opponent: Option<PlayerId>,
    pub voter: Option<PlayerId>,
}

impl MatchFilter {
    /// Check a match against every set criterion
    pub fn matches(&self, record: &Match) -> bool {
        if let Some(period) = self.period {
            if record.period != period {
                return false;
            }
        }
        if let Some(voter) = self.voter {
            if record.voter_id != Some(voter) {
                return false;
            }
        }
        match (self.player, self.opponent) {
            (Some(a), Some(b)) => record.pair() == PlayerPair::canonical(a, b),
            (Some(p), None) | (None, Some(p)) => record.involves(&p),
            (None, None) => true,
        }
    }
}
