//! Rating periods
//!
//! Votes are bucketed by ISO-8601 week. The year is the ISO week-year, so the
//! last days of December can belong to week 1 of the following year.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An ISO (year, week) bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RatingPeriod {
    pub year: i32,
    pub week: u32,
}

impl RatingPeriod {
    /// Build a period, rejecting weeks that do not exist in that ISO year
    pub fn new(year: i32, week: u32) -> Result<Self, DomainError> {
        if NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).is_none() {
            return Err(DomainError::Validation(format!(
                "Week {} does not exist in {}",
                week, year
            )));
        }
        Ok(Self { year, week })
    }

    /// The period containing the current UTC date
    pub fn current() -> Self {
        Self::containing(Utc::now())
    }

    /// The period containing the given instant
    pub fn containing(at: DateTime<Utc>) -> Self {
        let iso = at.date_naive().iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Monday and Sunday of this week
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let start = NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
            .unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Sun)
            .unwrap_or(NaiveDate::MIN);
        (start, end)
    }

    /// Short label such as "Mar 31 - Apr 6"
    pub fn label(&self) -> String {
        let (start, end) = self.date_range();
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
    }
}

impl std::fmt::Display for RatingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}
