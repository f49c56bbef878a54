//! SeaORM entity for the `players` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text", unique)]
    pub name: String,
    pub current_elo: i32,
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::elo_history::Entity")]
    EloHistory,
}

impl Related<super::elo_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EloHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
