//! Schema bootstrap
//!
//! The DDL lives in `migrations/0001_initial.sql` and is embedded at compile
//! time. Every statement is `IF NOT EXISTS`, so applying it on each start-up
//! is safe.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

const INITIAL_SCHEMA: &str = include_str!("../../../migrations/0001_initial.sql");

/// Create tables and indexes that do not exist yet
pub async fn apply_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(INITIAL_SCHEMA).await?;
    tracing::info!("Database schema is up to date");
    Ok(())
}
