//! Player handlers
//!
//! Registration, the leaderboard and participant seeding.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Player, PlayerId, PlayerProfile};
use crate::domain::ports::{MatchRepository, PlayerRepository};
use crate::error::AppError;
use crate::AppState;

/// Request body for player registration
#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Response body for seeding
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    /// Players created by this call
    pub created: Vec<Player>,
    /// Every configured participant
    pub participants: Vec<String>,
}

/// GET /players
///
/// Leaderboard: every player, highest rating first, with rating history.
pub async fn list_players<PR, MR>(
    State(state): State<AppState<PR, MR>>,
) -> Result<Json<Vec<PlayerProfile>>, AppError>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    let players = state.player_service.leaderboard().await?;
    Ok(Json(players))
}

/// GET /players/:id
pub async fn get_player<PR, MR>(
    State(state): State<AppState<PR, MR>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlayerProfile>, AppError>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    let player = state.player_service.get(&PlayerId(id)).await?;
    Ok(Json(player))
}

/// POST /players
pub async fn register_player<PR, MR>(
    State(state): State<AppState<PR, MR>>,
    Json(request): Json<RegisterPlayerRequest>,
) -> Result<(StatusCode, Json<PlayerProfile>), AppError>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    let player = state
        .player_service
        .register(&request.name, request.image_url.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// POST /seed
///
/// Register every configured participant that is missing. Safe to repeat.
pub async fn seed_players<PR, MR>(
    State(state): State<AppState<PR, MR>>,
) -> Result<Json<SeedResponse>, AppError>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    let participants = state.auth_service.participant_names();
    let created = state.player_service.seed(&participants).await?;

    tracing::info!(
        created = created.len(),
        participants = participants.len(),
        "Seed complete"
    );

    Ok(Json(SeedResponse {
        created,
        participants,
    }))
}
