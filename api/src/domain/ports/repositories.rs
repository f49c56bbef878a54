//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::entities::{
    EloSnapshot, Match, MatchFilter, MatchId, NewMatch, NewPlayer, Player, PlayerId,
};
use crate::error::DomainError;

/// Repository for Player entities
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Find a player by ID
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>, DomainError>;

    /// Find a player by exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError>;

    /// Create a player and its initial rating snapshot.
    /// Fails with `AlreadyExists` if the name is taken.
    async fn create(&self, player: &NewPlayer) -> Result<Player, DomainError>;

    /// All players, highest rating first (ties broken by name)
    async fn list_by_elo(&self) -> Result<Vec<Player>, DomainError>;

    /// Rating history of a player, oldest first
    async fn history(&self, id: &PlayerId) -> Result<Vec<EloSnapshot>, DomainError>;

    /// Rating histories of several players in one read, each oldest first.
    /// Players without snapshots are absent from the map.
    async fn histories(
        &self,
        ids: &[PlayerId],
    ) -> Result<HashMap<PlayerId, Vec<EloSnapshot>>, DomainError>;
}

/// Repository for Match entities
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Record an outcome atomically.
    ///
    /// In one unit of work: reads both players' current ratings, applies
    /// [`crate::domain::rating::update`], inserts the match, stores both new
    /// ratings and appends a history snapshot for each side. If the vote key
    /// is already taken nothing is written and `DuplicateVote` is returned.
    async fn record(&self, outcome: &NewMatch) -> Result<Match, DomainError>;

    /// Find a match by ID
    async fn find_by_id(&self, id: &MatchId) -> Result<Option<Match>, DomainError>;

    /// Matches satisfying the filter, newest period first then newest record first
    async fn list(&self, filter: &MatchFilter) -> Result<Vec<Match>, DomainError>;
}
