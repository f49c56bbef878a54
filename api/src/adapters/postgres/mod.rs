//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod match_repo;
pub mod player_repo;
pub mod schema;


pub use match_repo::PostgresMatchRepository;
pub use player_repo::PostgresPlayerRepository;
pub use schema::apply_schema;
