//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod match_record;
pub mod player;

pub use match_record::{Match, MatchFilter, MatchId, NewMatch};
pub use player::{EloSnapshot, NewPlayer, Player, PlayerId, PlayerProfile, MAX_NAME_LEN};
