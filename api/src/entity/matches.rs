//! SeaORM entity for the `matches` table
//!
//! `pair_low`/`pair_high` hold the two player ids in canonical order and back
//! the `uq_matches_vote` unique index.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub year: i32,
    pub week: i32,
    pub winner_id: Uuid,
    pub loser_id: Uuid,
    pub voter_id: Option<Uuid>,
    pub pair_low: Uuid,
    pub pair_high: Uuid,
    pub winner_elo_change: i32,
    pub loser_elo_change: i32,
    pub winner_elo_after: i32,
    pub loser_elo_after: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
