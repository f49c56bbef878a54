//! Bearer secret middleware

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use crate::domain::ports::{MatchRepository, PlayerRepository};
use crate::error::AppError;
use crate::AppState;

/// Extract the secret from the Authorization header
///
/// The secret is passed on untouched, matching what `/auth` accepts.
pub(crate) fn extract_bearer(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|secret| !secret.is_empty())
}

/// Optional authentication middleware
///
/// Requests without a bearer secret pass through anonymously. A secret that
/// does not resolve to a participant is rejected with 401; otherwise the
/// `AuthenticatedPlayer` is injected into request extensions.
pub async fn optional_auth_middleware<PR, MR>(
    State(state): State<AppState<PR, MR>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    if let Some(secret) = extract_bearer(&request) {
        let player = state.auth_service.authenticate(secret).await?;
        tracing::debug!(player_id = %player.player_id, "Request authenticated");
        request.extensions_mut().insert(player);
    }

    Ok(next.run(request).await)
}
