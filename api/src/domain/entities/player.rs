//! Player domain entity
//!
//! A participant on the ladder, with a current rating and an append-only
//! history of rating snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::period::RatingPeriod;
use crate::domain::rating::DEFAULT_RATING;

/// Image shown for players registered without one
pub const DEFAULT_IMAGE_URL: &str = "/images/default-profile.jpg";

/// Maximum length of a player name (in characters)
pub const MAX_NAME_LEN: usize = 50;

/// Unique identifier for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PlayerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant on the ladder
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub current_elo: i32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// A point on a player's rating history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EloSnapshot {
    #[serde(flatten)]
    pub period: RatingPeriod,
    pub elo: i32,
    pub recorded_at: DateTime<Utc>,
}

/// A player together with their full rating history (oldest first)
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    #[serde(flatten)]
    pub player: Player,
    pub elo_history: Vec<EloSnapshot>,
}

/// Data needed to register a new player
///
/// The player starts at [`DEFAULT_RATING`] with one snapshot in `period`.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
    pub image_url: String,
    pub period: RatingPeriod,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, image_url: Option<String>, period: RatingPeriod) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            period,
        }
    }

    pub fn initial_elo(&self) -> i32 {
        DEFAULT_RATING
    }
}
