//! Match service
//!
//! Records pairwise outcomes and lists recorded matches. Validation of the
//! pair and voter happens here; the rating update and the vote uniqueness
//! check happen atomically inside [`MatchRepository::record`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{Match, MatchFilter, MatchId, NewMatch, PlayerId};
use crate::domain::period::RatingPeriod;
use crate::domain::ports::{MatchRepository, PlayerRepository};
use crate::error::{AppError, DomainError};

/// An outcome as submitted by a client
#[derive(Debug, Clone)]
pub struct RecordMatch {
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub voter_id: Option<PlayerId>,
    /// Defaults to the current ISO week
    pub period: Option<RatingPeriod>,
}

/// A match with the names of everyone involved
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    #[serde(flatten)]
    pub record: Match,
    pub winner_name: Option<String>,
    pub loser_name: Option<String>,
    pub voter_name: Option<String>,
}

/// Service for recording and listing matches
pub struct MatchService<PR, MR>
where
    PR: PlayerRepository,
    MR: MatchRepository,
{
    players: Arc<PR>,
    matches: Arc<MR>,
}

impl<PR, MR> MatchService<PR, MR>
where
    PR: PlayerRepository,
    MR: MatchRepository,
{
    pub fn new(players: Arc<PR>, matches: Arc<MR>) -> Self {
        Self { players, matches }
    }

    /// Record an outcome and apply the rating update to both players
    pub async fn record(&self, request: RecordMatch) -> Result<Match, AppError> {
        let period = request.period.unwrap_or_else(RatingPeriod::current);
        let outcome = NewMatch::new(
            period,
            request.winner_id,
            request.loser_id,
            request.voter_id,
        )?;

        self.require_player(&outcome.winner_id, "Winner").await?;
        self.require_player(&outcome.loser_id, "Loser").await?;
        if let Some(voter) = &outcome.voter_id {
            self.require_player(voter, "Voter").await?;
        }

        let recorded = match self.matches.record(&outcome).await {
            Ok(recorded) => recorded,
            Err(DomainError::DuplicateVote(msg)) => {
                tracing::info!(vote = ?outcome.vote_key(), "Duplicate vote rejected");
                return Err(DomainError::DuplicateVote(msg).into());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            match_id = %recorded.id,
            period = %recorded.period,
            winner_id = %recorded.winner_id,
            loser_id = %recorded.loser_id,
            winner_delta = recorded.winner_elo_change,
            loser_delta = recorded.loser_elo_change,
            "Match recorded"
        );

        Ok(recorded)
    }

    /// Matches satisfying the filter, newest first, with player names
    pub async fn list(&self, filter: &MatchFilter) -> Result<Vec<MatchSummary>, AppError> {
        let records = self.matches.list(filter).await?;
        let names = self.player_names().await?;

        Ok(records
            .into_iter()
            .map(|record| summarize(record, &names))
            .collect())
    }

    /// One match with player names
    pub async fn get(&self, id: &MatchId) -> Result<MatchSummary, AppError> {
        let record = self
            .matches
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Match not found: {}", id)))?;
        let names = self.player_names().await?;

        Ok(summarize(record, &names))
    }

    async fn require_player(&self, id: &PlayerId, role: &str) -> Result<(), AppError> {
        if self.players.find_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound(format!("{} not found: {}", role, id)).into());
        }
        Ok(())
    }

    async fn player_names(&self) -> Result<HashMap<PlayerId, String>, AppError> {
        Ok(self
            .players
            .list_by_elo()
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect())
    }
}

fn summarize(record: Match, names: &HashMap<PlayerId, String>) -> MatchSummary {
    MatchSummary {
        winner_name: names.get(&record.winner_id).cloned(),
        loser_name: names.get(&record.loser_id).cloned(),
        voter_name: record.voter_id.and_then(|v| names.get(&v).cloned()),
        record,
    }
}
