//! Elo Ladder API Server
//!
//! Participants vote on which of two players won a head-to-head; each vote
//! moves both players' Elo ratings. A participant may vote on a given pair
//! at most once per ISO week.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post, MethodRouter},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tokio::signal;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{apply_schema, PostgresMatchRepository, PostgresPlayerRepository};
use app::{AuthService, MatchService, PlayerService};
use auth::CredentialStore;
use config::{Config, RateLimit};
use domain::ports::{MatchRepository, PlayerRepository};

/// Application state shared across all handlers
///
/// Generic over the repositories so the router can run on in-memory
/// implementations in tests.
pub struct AppState<PR = PostgresPlayerRepository, MR = PostgresMatchRepository>
where
    PR: PlayerRepository,
    MR: MatchRepository,
{
    pub player_service: Arc<PlayerService<PR>>,
    pub match_service: Arc<MatchService<PR, MR>>,
    pub auth_service: Arc<AuthService<PR>>,
}

impl<PR, MR> AppState<PR, MR>
where
    PR: PlayerRepository,
    MR: MatchRepository,
{
    pub fn new(players: Arc<PR>, matches: Arc<MR>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            player_service: Arc::new(PlayerService::new(players.clone())),
            match_service: Arc::new(MatchService::new(players.clone(), matches)),
            auth_service: Arc::new(AuthService::new(players, credentials)),
        }
    }
}

// derive(Clone) would require PR: Clone and MR: Clone
impl<PR, MR> Clone for AppState<PR, MR>
where
    PR: PlayerRepository,
    MR: MatchRepository,
{
    fn clone(&self) -> Self {
        Self {
            player_service: self.player_service.clone(),
            match_service: self.match_service.clone(),
            auth_service: self.auth_service.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router.
///
/// With `rate_limit` set, player registration and `/auth` are limited per
/// peer IP, which requires serving with `into_make_service_with_connect_info`.
pub fn build_router<PR, MR>(
    state: AppState<PR, MR>,
    rate_limit: Option<RateLimit>,
) -> anyhow::Result<Router>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    // (SmartIpKeyExtractor requires X-Forwarded-For headers from reverse proxy)
    let governor_config = match rate_limit {
        Some(limit) => Some(Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(limit.per_second)
                .burst_size(limit.burst_size)
                .finish()
                .context("Failed to build governor config")?,
        )),
        None => None,
    };

    let rate_limited = |route: MethodRouter<AppState<PR, MR>>| match &governor_config {
        Some(config) => route.layer(GovernorLayer {
            config: config.clone(),
        }),
        None => route,
    };

    // Bearer secret is optional; when present it fixes the voter
    let record_match = post(handlers::record_match::<PR, MR>).layer(
        middleware::from_fn_with_state(state.clone(), auth::optional_auth_middleware::<PR, MR>),
    );

    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .route("/period/current", get(handlers::current_period))
        // Players
        .route(
            "/players",
            get(handlers::list_players::<PR, MR>)
                .merge(rate_limited(post(handlers::register_player::<PR, MR>))),
        )
        .route("/players/:id", get(handlers::get_player::<PR, MR>))
        // Matches
        .route(
            "/matches",
            get(handlers::list_matches::<PR, MR>).merge(record_match),
        )
        .route("/matches/:id", get(handlers::get_match::<PR, MR>))
        // Participants
        .route(
            "/auth",
            rate_limited(post(handlers::authenticate::<PR, MR>)),
        )
        .route("/seed", post(handlers::seed_players::<PR, MR>))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,elo_ladder_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Elo Ladder API...");

    // Load configuration
    let config = Config::from_env()?;
    if config.credentials.is_empty() {
        tracing::warn!("PARTICIPANT_SECRETS is empty; authentication will always fail");
    } else {
        tracing::info!(participants = config.credentials.len(), "Credentials loaded");
    }

    // Connect to PostgreSQL
    tracing::info!(database = %config.redacted_database_url(), "Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    apply_schema(&db)
        .await
        .context("Failed to apply database schema")?;
    tracing::info!("Database connected");

    // Create adapters
    let player_repo = Arc::new(PostgresPlayerRepository::new(db.clone()));
    let match_repo = Arc::new(PostgresMatchRepository::new(db.clone()));

    // Create app state
    let state = AppState::new(
        player_repo,
        match_repo,
        Arc::new(config.credentials.clone()),
    );

    if config.seed_on_startup {
        let participants = state.auth_service.participant_names();
        let created = state.player_service.seed(&participants).await?;
        tracing::info!(
            created = created.len(),
            participants = participants.len(),
            "Participants seeded"
        );
    }

    let app = build_router(state, Some(config.rate_limit))?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(wait_for_shutdown_signal())
    .await
    .context("Server error")?;

    db.close().await.context("Failed to close database")?;
    tracing::info!("Shutdown complete");

    Ok(())
}
