//! Player service
//!
//! Handles player registration, the leaderboard and seeding of the configured
//! participants.

use std::sync::Arc;

use crate::domain::entities::{NewPlayer, Player, PlayerId, PlayerProfile, MAX_NAME_LEN};
use crate::domain::period::RatingPeriod;
use crate::domain::ports::PlayerRepository;
use crate::error::{AppError, DomainError};

/// Service for managing players
pub struct PlayerService<PR>
where
    PR: PlayerRepository,
{
    players: Arc<PR>,
}

impl<PR> PlayerService<PR>
where
    PR: PlayerRepository,
{
    pub fn new(players: Arc<PR>) -> Self {
        Self { players }
    }

    /// Register a new player at the default rating.
    ///
    /// The name is trimmed; name uniqueness is enforced by the repository.
    pub async fn register(
        &self,
        name: &str,
        image_url: Option<&str>,
    ) -> Result<PlayerProfile, AppError> {
        let name = validate_name(name)?;

        let image_url = image_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        let new_player = NewPlayer::new(name, image_url, RatingPeriod::current());
        let player = self.players.create(&new_player).await?;

        tracing::info!(
            player_id = %player.id,
            name = %player.name,
            elo = player.current_elo,
            "Player registered"
        );

        self.profile(player).await
    }

    /// All players, highest rating first, with their histories
    pub async fn leaderboard(&self) -> Result<Vec<PlayerProfile>, AppError> {
        let players = self.players.list_by_elo().await?;
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        let mut histories = self.players.histories(&ids).await?;

        Ok(players
            .into_iter()
            .map(|player| PlayerProfile {
                elo_history: histories.remove(&player.id).unwrap_or_default(),
                player,
            })
            .collect())
    }

    /// One player with history
    pub async fn get(&self, id: &PlayerId) -> Result<PlayerProfile, AppError> {
        let player = self
            .players
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Player not found: {}", id)))?;

        self.profile(player).await
    }

    /// Register every named participant that does not exist yet.
    ///
    /// Returns only the players created by this call.
    pub async fn seed(&self, names: &[String]) -> Result<Vec<Player>, AppError> {
        let period = RatingPeriod::current();
        let mut created = Vec::new();

        for name in names {
            let name = validate_name(name)?;
            if self.players.find_by_name(name).await?.is_some() {
                continue;
            }

            match self
                .players
                .create(&NewPlayer::new(name, None, period))
                .await
            {
                Ok(player) => {
                    tracing::info!(player_id = %player.id, name = %player.name, "Seeded player");
                    created.push(player);
                }
                // Registered concurrently
                Err(DomainError::AlreadyExists(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(created)
    }

    async fn profile(&self, player: Player) -> Result<PlayerProfile, AppError> {
        let elo_history = self.players.history(&player.id).await?;
        Ok(PlayerProfile {
            player,
            elo_history,
        })
    }
}

/// Trim a player name and check its length
pub(crate) fn validate_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Name must be between 1 and {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name)
}
