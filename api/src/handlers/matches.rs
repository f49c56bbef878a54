//! Match handlers
//!
//! Recording outcomes and browsing the match log.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::{AuthenticatedPlayer, MatchSummary, RecordMatch};
use crate::domain::entities::{Match, MatchFilter, MatchId, PlayerId};
use crate::domain::period::RatingPeriod;
use crate::domain::ports::{MatchRepository, PlayerRepository};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing matches
#[derive(Debug, Default, Deserialize)]
pub struct ListMatchesQuery {
    pub year: Option<i32>,
    pub week: Option<u32>,
    pub player_a: Option<Uuid>,
    pub player_b: Option<Uuid>,
}

/// Request body for recording an outcome
#[derive(Debug, Deserialize)]
pub struct RecordMatchRequest {
    pub winner_id: Uuid,
    pub loser_id: Uuid,
    #[serde(default)]
    pub voter_id: Option<Uuid>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub week: Option<u32>,
}

/// Response body for a recorded outcome
#[derive(Debug, Serialize)]
pub struct RecordMatchResponse {
    pub success: bool,
    #[serde(rename = "match")]
    pub record: Match,
}

/// Year and week travel together; neither means "unspecified"
fn resolve_period(year: Option<i32>, week: Option<u32>) -> Result<Option<RatingPeriod>, AppError> {
    match (year, week) {
        (Some(year), Some(week)) => Ok(Some(RatingPeriod::new(year, week)?)),
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "year and week must be given together".to_string(),
        )),
    }
}

/// The voter is the authenticated participant when there is one
fn resolve_voter(
    authenticated: Option<&AuthenticatedPlayer>,
    claimed: Option<Uuid>,
) -> Result<Option<PlayerId>, AppError> {
    match (authenticated, claimed) {
        (Some(player), Some(claimed)) if PlayerId(claimed) != player.player_id => Err(
            AppError::Forbidden("voter_id does not match the authenticated participant".to_string()),
        ),
        (Some(player), _) => Ok(Some(player.player_id)),
        (None, claimed) => Ok(claimed.map(PlayerId)),
    }
}

/// GET /matches
///
/// Optional filters: `year` + `week`, and `player_a` / `player_b`. With both
/// players given, only matches between exactly those two are returned, in
/// either order.
pub async fn list_matches<PR, MR>(
    State(state): State<AppState<PR, MR>>,
    Query(query): Query<ListMatchesQuery>,
) -> Result<Json<Vec<MatchSummary>>, AppError>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    let filter = MatchFilter {
        period: resolve_period(query.year, query.week)?,
        player: query.player_a.map(PlayerId),
        opponent: query.player_b.map(PlayerId),
        voter: None,
    };

    let matches = state.match_service.list(&filter).await?;
    Ok(Json(matches))
}

/// GET /matches/:id
pub async fn get_match<PR, MR>(
    State(state): State<AppState<PR, MR>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchSummary>, AppError>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    let record = state.match_service.get(&MatchId(id)).await?;
    Ok(Json(record))
}

/// POST /matches
///
/// Record that `winner_id` beat `loser_id`. Defaults to the current week.
pub async fn record_match<PR, MR>(
    State(state): State<AppState<PR, MR>>,
    authenticated: Option<Extension<AuthenticatedPlayer>>,
    Json(request): Json<RecordMatchRequest>,
) -> Result<(StatusCode, Json<RecordMatchResponse>), AppError>
where
    PR: PlayerRepository + 'static,
    MR: MatchRepository + 'static,
{
    let voter_id = resolve_voter(authenticated.as_ref().map(|e| &e.0), request.voter_id)?;
    let period = resolve_period(request.year, request.week)?;

    let record = state
        .match_service
        .record(RecordMatch {
            winner_id: PlayerId(request.winner_id),
            loser_id: PlayerId(request.loser_id),
            voter_id,
            period,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordMatchResponse {
            success: true,
            record,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== ListMatchesQuery tests =====

    #[test]
    fn parse_list_query_empty() {
        let query: ListMatchesQuery = serde_json::from_str("{}").unwrap();
        assert!(query.year.is_none());
        assert!(query.player_a.is_none());
    }

    #[test]
    fn parse_list_query_full() {
        let a = Uuid::new_v4();
        let json = format!(r#"{{"year": 2025, "week": 14, "player_a": "{}"}}"#, a);
        let query: ListMatchesQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(query.year, Some(2025));
        assert_eq!(query.week, Some(14));
        assert_eq!(query.player_a, Some(a));
        assert!(query.player_b.is_none());
    }

    // ===== RecordMatchRequest tests =====

    #[test]
    fn parse_record_request_minimal() {
        let (w, l) = (Uuid::new_v4(), Uuid::new_v4());
        let json = format!(r#"{{"winner_id": "{}", "loser_id": "{}"}}"#, w, l);
        let request: RecordMatchRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.winner_id, w);
        assert_eq!(request.loser_id, l);
        assert!(request.voter_id.is_none());
        assert!(request.year.is_none());
    }

    #[test]
    fn parse_record_request_rejects_bad_uuid() {
        let json = r#"{"winner_id": "not-a-uuid", "loser_id": "also-not"}"#;
        let result: Result<RecordMatchRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    // ===== Period and voter resolution =====

    #[test]
    fn period_requires_year_and_week_together() {
        assert!(matches!(resolve_period(None, None), Ok(None)));
        assert!(matches!(
            resolve_period(Some(2025), None),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            resolve_period(None, Some(14)),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(
            resolve_period(Some(2025), Some(14)).unwrap(),
            Some(RatingPeriod { year: 2025, week: 14 })
        );
    }

    #[test]
    fn period_rejects_nonexistent_week() {
        assert!(resolve_period(Some(2025), Some(54)).is_err());
    }

    #[test]
    fn voter_defaults_to_authenticated_player() {
        let player = AuthenticatedPlayer {
            player_id: PlayerId::new(),
            player_name: "Ada".to_string(),
        };

        assert_eq!(
            resolve_voter(Some(&player), None).unwrap(),
            Some(player.player_id)
        );
        assert_eq!(
            resolve_voter(Some(&player), Some(player.player_id.0)).unwrap(),
            Some(player.player_id)
        );
    }

    #[test]
    fn voter_mismatch_is_forbidden() {
        let player = AuthenticatedPlayer {
            player_id: PlayerId::new(),
            player_name: "Ada".to_string(),
        };

        let result = resolve_voter(Some(&player), Some(Uuid::new_v4()));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn anonymous_voter_is_taken_from_body() {
        let claimed = Uuid::new_v4();
        assert_eq!(
            resolve_voter(None, Some(claimed)).unwrap(),
            Some(PlayerId(claimed))
        );
        assert_eq!(resolve_voter(None, None).unwrap(), None);
    }
}
