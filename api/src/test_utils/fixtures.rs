//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;

use crate::domain::entities::player::DEFAULT_IMAGE_URL;
use crate::domain::entities::{Player, PlayerId};
use crate::domain::period::RatingPeriod;
use crate::domain::rating::DEFAULT_RATING;

/// Create a test player with default values
pub fn test_player() -> Player {
    test_player_named("test-player")
}

/// Create a test player with a specific name
pub fn test_player_named(name: &str) -> Player {
    Player {
        id: PlayerId::new(),
        name: name.to_string(),
        current_elo: DEFAULT_RATING,
        image_url: DEFAULT_IMAGE_URL.to_string(),
        created_at: Utc::now(),
    }
}

/// Create a test player with a specific rating
pub fn test_player_with_elo(elo: i32) -> Player {
    Player {
        current_elo: elo,
        ..test_player_named(&format!("player-{}", elo))
    }
}

/// ISO week 14 of 2025 (Mar 31 - Apr 6)
pub fn test_period() -> RatingPeriod {
    RatingPeriod { year: 2025, week: 14 }
}
