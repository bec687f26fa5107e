use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::ResultExt;

use crate::{
    validation_error::{InvalidDateFormatSnafu, MissingFieldSnafu},
    DateRange, ValidationError,
};

/// The fixed calendar format accepted for request dates and used when
/// persisting them.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WeatherQueryId(pub i64);

impl std::fmt::Display for WeatherQueryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted weather query record.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub id: WeatherQueryId,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Provider snapshot captured when `location` was last set.
    pub result: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// A validated record ready for insertion. Constructing one requires a
/// provider snapshot, a record never reaches the store without one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWeatherQuery {
    pub location: String,
    pub date_range: DateRange,
    pub result: Value,
}

/// Field changes to apply to a stored record. `location` travels together
/// with the snapshot that confirmed it so the pair can never go stale.
#[derive(Debug, Clone, Default)]
pub struct WeatherQueryUpdate {
    pub location: Option<(String, Value)>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl WeatherQuery {
    /// Merges `update` onto the record, re-checking the date ordering
    /// invariant against the post-update values. The record is left untouched
    /// when the merged range is invalid.
    pub fn apply(&mut self, update: WeatherQueryUpdate) -> Result<(), ValidationError> {
        let WeatherQueryUpdate {
            location,
            start_date,
            end_date,
        } = update;

        let start = start_date.unwrap_or(self.start_date);
        let end = end_date.unwrap_or(self.end_date);
        DateRange::new(start, end)?;

        if let Some((location, result)) = location {
            self.location = location;
            self.result = Some(result);
        }
        self.start_date = start;
        self.end_date = end;

        Ok(())
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).context(InvalidDateFormatSnafu { value })
}

pub fn require_field<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => MissingFieldSnafu { field }.fail(),
    }
}
