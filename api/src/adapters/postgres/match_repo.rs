//! PostgreSQL adapter for MatchRepository
//!
//! Recording runs in a single transaction. Both player rows are locked
//! (`FOR UPDATE`, in id order) before their ratings are read, and the vote
//! rule is left to the `uq_matches_vote` unique index: a violation aborts the
//! transaction and surfaces as `DomainError::DuplicateVote`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{Match, MatchFilter, MatchId, NewMatch, PlayerId};
use crate::domain::period::RatingPeriod;
use crate::domain::ports::MatchRepository;
use crate::domain::rating;
use crate::domain::vote::{duplicate_vote, PlayerPair};
use crate::entity::{elo_history, matches, players};
use crate::error::DomainError;

/// PostgreSQL implementation of MatchRepository
pub struct PostgresMatchRepository {
    db: DatabaseConnection,
}

impl PostgresMatchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    async fn record(&self, outcome: &NewMatch) -> Result<Match, DomainError> {
        let pair = outcome.pair();
        let period = outcome.period;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let locked = players::Entity::find()
            .filter(players::Column::Id.is_in([pair.low().0, pair.high().0]))
            .order_by_asc(players::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let rating_of = |id: PlayerId| {
            locked
                .iter()
                .find(|p| p.id == id.0)
                .map(|p| p.current_elo)
                .ok_or_else(|| DomainError::NotFound(format!("Player not found: {}", id)))
        };
        let winner_rating = rating_of(outcome.winner_id)?;
        let loser_rating = rating_of(outcome.loser_id)?;

        let update = rating::update(winner_rating, loser_rating);
        let now = Utc::now().fixed_offset();

        let model = matches::ActiveModel {
            id: Set(Uuid::new_v4()),
            year: Set(period.year),
            week: Set(period.week as i32),
            winner_id: Set(outcome.winner_id.0),
            loser_id: Set(outcome.loser_id.0),
            voter_id: Set(outcome.voter_id.map(|v| v.0)),
            pair_low: Set(pair.low().0),
            pair_high: Set(pair.high().0),
            winner_elo_change: Set(update.winner_delta),
            loser_elo_change: Set(update.loser_delta),
            winner_elo_after: Set(update.new_winner_rating),
            loser_elo_after: Set(update.new_loser_rating),
            created_at: Set(now),
        };

        let inserted = model.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_vote(),
            _ => DomainError::Database(e.to_string()),
        })?;

        for (player_id, elo) in [
            (outcome.winner_id, update.new_winner_rating),
            (outcome.loser_id, update.new_loser_rating),
        ] {
            players::ActiveModel {
                id: Set(player_id.0),
                current_elo: Set(elo),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

            elo_history::ActiveModel {
                player_id: Set(player_id.0),
                year: Set(period.year),
                week: Set(period.week as i32),
                elo: Set(elo),
                recorded_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: &MatchId) -> Result<Option<Match>, DomainError> {
        let result = matches::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self, filter: &MatchFilter) -> Result<Vec<Match>, DomainError> {
        let mut query = matches::Entity::find();

        if let Some(period) = filter.period {
            query = query
                .filter(matches::Column::Year.eq(period.year))
                .filter(matches::Column::Week.eq(period.week as i32));
        }

        if let Some(voter) = filter.voter {
            query = query.filter(matches::Column::VoterId.eq(voter.0));
        }

        match (filter.player, filter.opponent) {
            (Some(a), Some(b)) => {
                let pair = PlayerPair::canonical(a, b);
                query = query
                    .filter(matches::Column::PairLow.eq(pair.low().0))
                    .filter(matches::Column::PairHigh.eq(pair.high().0));
            }
            (Some(p), None) | (None, Some(p)) => {
                query = query.filter(
                    Condition::any()
                        .add(matches::Column::WinnerId.eq(p.0))
                        .add(matches::Column::LoserId.eq(p.0)),
                );
            }
            (None, None) => {}
        }

        let results = query
            .order_by_desc(matches::Column::Year)
            .order_by_desc(matches::Column::Week)
            .order_by_desc(matches::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Match {
            id: MatchId(model.id),
            period: RatingPeriod {
                year: model.year,
                week: u32::try_from(model.week).unwrap_or(1),
            },
            winner_id: PlayerId(model.winner_id),
            loser_id: PlayerId(model.loser_id),
            voter_id: model.voter_id.map(PlayerId),
            winner_elo_change: model.winner_elo_change,
            loser_elo_change: model.loser_elo_change,
            winner_elo_after: model.winner_elo_after,
            loser_elo_after: model.loser_elo_after,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
