//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for external dependencies
//! - `rating`: The Elo update rule
//! - `vote`: The one-vote-per-pair-per-week rule
//! - `period`: ISO week buckets

pub mod entities;
pub mod period;
pub mod ports;
pub mod rating;
pub mod vote;
