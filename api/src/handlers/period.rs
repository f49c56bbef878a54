//! Rating period handler

use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::period::RatingPeriod;

/// Response body for the current voting week
#[derive(Debug, Serialize)]
pub struct PeriodResponse {
    pub year: i32,
    pub week: u32,
    /// Human-readable range, e.g. "Mar 31 - Apr 6"
    pub date_range: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<RatingPeriod> for PeriodResponse {
    fn from(period: RatingPeriod) -> Self {
        let (start_date, end_date) = period.date_range();
        Self {
            year: period.year,
            week: period.week,
            date_range: period.label(),
            start_date,
            end_date,
        }
    }
}

/// GET /period/current
pub async fn current_period() -> Json<PeriodResponse> {
    Json(RatingPeriod::current().into())
}
