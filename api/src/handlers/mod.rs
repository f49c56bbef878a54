//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod auth;
pub mod matches;
pub mod period;
pub mod players;

pub use auth::authenticate;
pub use matches::{get_match, list_matches, record_match};
pub use period::current_period;
pub use players::{get_player, list_players, register_player, seed_players};
