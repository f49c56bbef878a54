//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    EloSnapshot, Match, MatchFilter, MatchId, NewMatch, NewPlayer, Player, PlayerId,
};
use crate::domain::period::RatingPeriod;
use crate::domain::ports::{MatchRepository, PlayerRepository};
use crate::domain::rating;
use crate::domain::vote::duplicate_vote;
use crate::error::DomainError;

// ============================================================================
// In-Memory Player Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPlayerRepository {
    players: Arc<RwLock<HashMap<PlayerId, Player>>>,
    history: Arc<RwLock<HashMap<PlayerId, Vec<EloSnapshot>>>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a player and one snapshot at its current rating
    pub fn with_player(self, player: Player) -> Self {
        {
            let mut players = self.players.write().unwrap();
            let mut history = self.history.write().unwrap();

            history.insert(
                player.id,
                vec![EloSnapshot {
                    period: RatingPeriod::containing(player.created_at),
                    elo: player.current_elo,
                    recorded_at: player.created_at,
                }],
            );
            players.insert(player.id, player);
        }
        self
    }

    /// Set a rating and append the matching snapshot
    fn apply_rating(&self, id: PlayerId, elo: i32, period: RatingPeriod) -> Result<(), DomainError> {
        let mut players = self.players.write().unwrap();
        let player = players
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Player not found: {}", id)))?;
        player.current_elo = elo;

        self.history
            .write()
            .unwrap()
            .entry(id)
            .or_default()
            .push(EloSnapshot {
                period,
                elo,
                recorded_at: Utc::now(),
            });
        Ok(())
    }

    fn rating_of(&self, id: &PlayerId) -> Result<i32, DomainError> {
        self.players
            .read()
            .unwrap()
            .get(id)
            .map(|p| p.current_elo)
            .ok_or_else(|| DomainError::NotFound(format!("Player not found: {}", id)))
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>, DomainError> {
        let players = self.players.read().unwrap();
        Ok(players.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError> {
        let players = self.players.read().unwrap();
        Ok(players.values().find(|p| p.name == name).cloned())
    }

    async fn create(&self, new_player: &NewPlayer) -> Result<Player, DomainError> {
        let mut players = self.players.write().unwrap();

        if players.values().any(|p| p.name == new_player.name) {
            return Err(DomainError::AlreadyExists(format!(
                "Player with name '{}' already exists",
                new_player.name
            )));
        }

        let now = Utc::now();
        let player = Player {
            id: PlayerId::new(),
            name: new_player.name.clone(),
            current_elo: new_player.initial_elo(),
            image_url: new_player.image_url.clone(),
            created_at: now,
        };

        self.history.write().unwrap().insert(
            player.id,
            vec![EloSnapshot {
                period: new_player.period,
                elo: player.current_elo,
                recorded_at: now,
            }],
        );
        players.insert(player.id, player.clone());
        Ok(player)
    }

    async fn list_by_elo(&self) -> Result<Vec<Player>, DomainError> {
        let players = self.players.read().unwrap();
        let mut result: Vec<_> = players.values().cloned().collect();
        result.sort_by(|a, b| {
            b.current_elo
                .cmp(&a.current_elo)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(result)
    }

    async fn history(&self, id: &PlayerId) -> Result<Vec<EloSnapshot>, DomainError> {
        let history = self.history.read().unwrap();
        Ok(history.get(id).cloned().unwrap_or_default())
    }

    async fn histories(
        &self,
        ids: &[PlayerId],
    ) -> Result<HashMap<PlayerId, Vec<EloSnapshot>>, DomainError> {
        let history = self.history.read().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| history.get(id).map(|h| (*id, h.clone())))
            .collect())
    }
}

// ============================================================================
// In-Memory Match Repository
// ============================================================================

/// Holds the match log write lock for the whole of `record`, so the
/// duplicate check and both rating updates happen as one step.
pub struct InMemoryMatchRepository {
    players: Arc<InMemoryPlayerRepository>,
    matches: Arc<RwLock<Vec<Match>>>,
}

impl InMemoryMatchRepository {
    pub fn new(players: Arc<InMemoryPlayerRepository>) -> Self {
        Self {
            players,
            matches: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of recorded matches
    pub fn count(&self) -> usize {
        self.matches.read().unwrap().len()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn record(&self, outcome: &NewMatch) -> Result<Match, DomainError> {
        let mut matches = self.matches.write().unwrap();

        if let Some(key) = outcome.vote_key() {
            if matches.iter().any(|m| m.vote_key() == Some(key)) {
                return Err(duplicate_vote());
            }
        }

        let winner_rating = self.players.rating_of(&outcome.winner_id)?;
        let loser_rating = self.players.rating_of(&outcome.loser_id)?;
        let update = rating::update(winner_rating, loser_rating);

        self.players
            .apply_rating(outcome.winner_id, update.new_winner_rating, outcome.period)?;
        self.players
            .apply_rating(outcome.loser_id, update.new_loser_rating, outcome.period)?;

        let record = Match {
            id: MatchId::new(),
            period: outcome.period,
            winner_id: outcome.winner_id,
            loser_id: outcome.loser_id,
            voter_id: outcome.voter_id,
            winner_elo_change: update.winner_delta,
            loser_elo_change: update.loser_delta,
            winner_elo_after: update.new_winner_rating,
            loser_elo_after: update.new_loser_rating,
            created_at: Utc::now(),
        };
        matches.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &MatchId) -> Result<Option<Match>, DomainError> {
        let matches = self.matches.read().unwrap();
        Ok(matches.iter().find(|m| m.id == *id).cloned())
    }

    async fn list(&self, filter: &MatchFilter) -> Result<Vec<Match>, DomainError> {
        let matches = self.matches.read().unwrap();
        // Newest insert first, then a stable sort keeps that order within a period
        let mut result: Vec<_> = matches
            .iter()
            .rev()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.period.cmp(&a.period));
        Ok(result)
    }
}
