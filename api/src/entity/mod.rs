//! SeaORM entities
//!
//! Table models mirroring `migrations/0001_initial.sql`.

pub mod elo_history;
pub mod matches;
pub mod players;
