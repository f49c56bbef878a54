//! Participant authentication
//!
//! Exchanges a shared secret for the identity of the registered player it
//! belongs to.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::CredentialStore;
use crate::domain::entities::PlayerId;
use crate::domain::ports::PlayerRepository;
use crate::error::AppError;

/// The participant a request is made on behalf of
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedPlayer {
    pub player_id: PlayerId,
    pub player_name: String,
}

pub struct AuthService<PR>
where
    PR: PlayerRepository,
{
    players: Arc<PR>,
    credentials: Arc<CredentialStore>,
}

impl<PR> AuthService<PR>
where
    PR: PlayerRepository,
{
    pub fn new(players: Arc<PR>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            players,
            credentials,
        }
    }

    /// Resolve a secret to its participant.
    ///
    /// Fails with `Unauthorized` when the secret is unknown or its participant
    /// has no player record.
    pub async fn authenticate(&self, secret: &str) -> Result<AuthenticatedPlayer, AppError> {
        if secret.is_empty() {
            return Err(AppError::BadRequest("Password is required".to_string()));
        }

        let name = self
            .credentials
            .participant_for(secret)
            .ok_or(AppError::Unauthorized)?;

        let player = self.players.find_by_name(name).await?.ok_or_else(|| {
            tracing::warn!(participant = %name, "Participant has no player record");
            AppError::Unauthorized
        })?;

        Ok(AuthenticatedPlayer {
            player_id: player.id,
            player_name: player.name,
        })
    }

    /// Names of every configured participant
    pub fn participant_names(&self) -> Vec<String> {
        self.credentials.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_player_named, InMemoryPlayerRepository};

    fn create_service(repo: InMemoryPlayerRepository) -> AuthService<InMemoryPlayerRepository> {
        let store =
            CredentialStore::from_json(r#"{"Ada": "engine", "Grace": "cobol"}"#).unwrap();
        AuthService::new(Arc::new(repo), Arc::new(store))
    }

    #[tokio::test]
    async fn authenticate_success() {
        let ada = test_player_named("Ada");
        let service = create_service(InMemoryPlayerRepository::new().with_player(ada.clone()));

        let authed = service.authenticate("engine").await.unwrap();

        assert_eq!(authed.player_id, ada.id);
        assert_eq!(authed.player_name, "Ada");
    }

    #[tokio::test]
    async fn authenticate_wrong_secret() {
        let service =
            create_service(InMemoryPlayerRepository::new().with_player(test_player_named("Ada")));

        let result = service.authenticate("nope").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn authenticate_empty_secret() {
        let service = create_service(InMemoryPlayerRepository::new());

        let result = service.authenticate("").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn authenticate_unregistered_participant() {
        // Grace has a secret but no player record
        let service =
            create_service(InMemoryPlayerRepository::new().with_player(test_player_named("Ada")));

        let result = service.authenticate("cobol").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn participant_names_sorted() {
        let service = create_service(InMemoryPlayerRepository::new());
        assert_eq!(service.participant_names(), vec!["Ada", "Grace"]);
    }
}
