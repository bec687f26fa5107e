use chrono::{DateTime, NaiveDate, Utc};
use snafu::ResultExt;
use stratus_core::{WeatherQueryId, DATE_FORMAT};

use crate::error::error::{DateConversionSnafu, JsonConversionSnafu, TimestampConversionSnafu};

/// Row form of a weather query. Dates and timestamps are stored as TEXT
/// (`YYYY-MM-DD` / RFC 3339), the snapshot as serialized JSON.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeatherQuery {
    pub weather_query_id: i64,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub result: Option<String>,
    pub created_at: String,
}

impl TryFrom<WeatherQuery> for stratus_core::WeatherQuery {
    type Error = crate::error::Error;

    fn try_from(value: WeatherQuery) -> Result<Self, Self::Error> {
        let WeatherQuery {
            weather_query_id,
            location,
            start_date,
            end_date,
            result,
            created_at,
        } = value;

        Ok(Self {
            id: WeatherQueryId(weather_query_id),
            location,
            start_date: NaiveDate::parse_from_str(&start_date, DATE_FORMAT)
                .context(DateConversionSnafu { value: start_date })?,
            end_date: NaiveDate::parse_from_str(&end_date, DATE_FORMAT)
                .context(DateConversionSnafu { value: end_date })?,
            result: result
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .context(JsonConversionSnafu)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .context(TimestampConversionSnafu { value: created_at })?
                .with_timezone(&Utc),
        })
    }
}
