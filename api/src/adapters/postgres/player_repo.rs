//! PostgreSQL adapter for PlayerRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{EloSnapshot, NewPlayer, Player, PlayerId};
use crate::domain::period::RatingPeriod;
use crate::domain::ports::PlayerRepository;
use crate::entity::{elo_history, players};
use crate::error::DomainError;

/// PostgreSQL implementation of PlayerRepository
pub struct PostgresPlayerRepository {
    db: DatabaseConnection,
}

impl PostgresPlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    async fn find_by_id(&self, id: &PlayerId) -> Result<Option<Player>, DomainError> {
        let result = players::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError> {
        let result = players::Entity::find()
            .filter(players::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, player: &NewPlayer) -> Result<Player, DomainError> {
        let id = Uuid::new_v4();
        let now = Utc::now().fixed_offset();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let model = players::ActiveModel {
            id: Set(id),
            name: Set(player.name.clone()),
            current_elo: Set(player.initial_elo()),
            image_url: Set(player.image_url.clone()),
            created_at: Set(now),
        };

        let created = model.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(format!(
                "Player with name '{}' already exists",
                player.name
            )),
            _ => DomainError::Database(e.to_string()),
        })?;

        elo_history::ActiveModel {
            player_id: Set(id),
            year: Set(player.period.year),
            week: Set(player.period.week as i32),
            elo: Set(player.initial_elo()),
            recorded_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(created.into())
    }

    async fn list_by_elo(&self) -> Result<Vec<Player>, DomainError> {
        let results = players::Entity::find()
            .order_by_desc(players::Column::CurrentElo)
            .order_by_asc(players::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn history(&self, id: &PlayerId) -> Result<Vec<EloSnapshot>, DomainError> {
        let results = elo_history::Entity::find()
            .filter(elo_history::Column::PlayerId.eq(id.0))
            .order_by_asc(elo_history::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn histories(
        &self,
        ids: &[PlayerId],
    ) -> Result<HashMap<PlayerId, Vec<EloSnapshot>>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let results = elo_history::Entity::find()
            .filter(elo_history::Column::PlayerId.is_in(ids.iter().map(|id| id.0)))
            .order_by_asc(elo_history::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut grouped: HashMap<PlayerId, Vec<EloSnapshot>> = HashMap::new();
        for model in results {
            grouped
                .entry(PlayerId(model.player_id))
                .or_default()
                .push(model.into());
        }
        Ok(grouped)
    }
}

/// Convert SeaORM model to domain entity
impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Player {
            id: PlayerId(model.id),
            name: model.name,
            current_elo: model.current_elo,
            image_url: model.image_url,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<elo_history::Model> for EloSnapshot {
    fn from(model: elo_history::Model) -> Self {
        EloSnapshot {
            period: RatingPeriod {
                year: model.year,
                week: u32::try_from(model.week).unwrap_or(1),
            },
            elo: model.elo,
            recorded_at: model.recorded_at.with_timezone(&Utc),
        }
    }
}
