//! Participant login handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::PlayerId;
use crate::domain::ports::{MatchRepository, PlayerRepository};
use crate::error::AppError;
use crate::AppState;

/// Request body for authentication
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub password: String,
}

/// Response body for a successful authentication
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub player_id: PlayerId,
    pub player_name: String,
}

/// POST /auth
///
/// Exchange a participant secret for the participant's identity. The same
/// secret can then be sent as `Authorization: Bearer <secret>` when voting.
pub async fn authenticate<PR, MR>(
    State(state): State<AppState<PR, MR>>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, AppError>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    let player = state.auth_service.authenticate(&request.password).await?;

    Ok(Json(AuthResponse {
        success: true,
        player_id: player.player_id,
        player_name: player.player_name,
    }))
}
