//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod auth_service;
pub mod match_service;
pub mod player_service;

pub use auth_service::{AuthService, AuthenticatedPlayer};
pub use match_service::{MatchService, MatchSummary, RecordMatch};
pub use player_service::PlayerService;
