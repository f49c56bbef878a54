//! Elo rating engine
//!
//! Standard Elo with a fixed K-factor. Everything here is pure: the same
//! inputs always produce the same [`RatingUpdate`].

use serde::Serialize;

/// Maximum rating swing for a single outcome
pub const K_FACTOR: f64 = 32.0;

/// Rating every player starts with
pub const DEFAULT_RATING: i32 = 1500;

/// Rating gap at which the stronger side is expected to win ten times as often
const SCALE: f64 = 400.0;

/// Outcome of applying one win/loss to a pair of ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingUpdate {
    pub new_winner_rating: i32,
    pub new_loser_rating: i32,
    pub winner_delta: i32,
    pub loser_delta: i32,
}

/// Probability that a player rated `rating` beats one rated `opponent`
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    let gap = f64::from(opponent) - f64::from(rating);
    1.0 / (1.0 + 10f64.powf(gap / SCALE))
}

/// Compute both players' new ratings after `winner` beat `loser`
pub fn update(winner_rating: i32, loser_rating: i32) -> RatingUpdate {
    let winner_delta = round_half_up(K_FACTOR * (1.0 - expected_score(winner_rating, loser_rating)));
    let loser_delta = round_half_up(K_FACTOR * (0.0 - expected_score(loser_rating, winner_rating)));

    RatingUpdate {
        new_winner_rating: winner_rating.saturating_add(winner_delta),
        new_loser_rating: loser_rating.saturating_add(loser_delta),
        winner_delta,
        loser_delta,
    }
}

// Halves round toward positive infinity for negative deltas too (-16.5 -> -16).
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
