use chrono::Utc;
use snafu::ResultExt;
use stratus_core::{NewWeatherQuery, WeatherQueryId, DATE_FORMAT};

use crate::{
    error::{
        error::{JsonConversionSnafu, QuerySnafu},
        Result,
    },
    models,
    SqliteAdapter,
};

impl SqliteAdapter {
    pub(crate) async fn create_weather_query_impl(
        &self,
        query: NewWeatherQuery,
    ) -> Result<stratus_core::WeatherQuery> {
        let result = serde_json::to_string(&query.result).context(JsonConversionSnafu)?;

        let row = sqlx::query_as::<_, models::WeatherQuery>(
            "INSERT INTO \
                weather_queries (location, start_date, end_date, result, created_at) \
             VALUES \
                (?1, ?2, ?3, ?4, ?5) \
             RETURNING \
                weather_query_id, location, start_date, end_date, result, created_at",
        )
        .bind(&query.location)
        .bind(query.date_range.start().format(DATE_FORMAT).to_string())
        .bind(query.date_range.end().format(DATE_FORMAT).to_string())
        .bind(result)
        .bind(Utc::now().to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .context(QuerySnafu)?;

        row.try_into()
    }

    pub(crate) async fn weather_queries_impl(&self) -> Result<Vec<stratus_core::WeatherQuery>> {
        let rows = sqlx::query_as::<_, models::WeatherQuery>(
            "SELECT \
                weather_query_id, location, start_date, end_date, result, created_at \
             FROM \
                weather_queries \
             ORDER BY \
                weather_query_id",
        )
        .fetch_all(&self.pool)
        .await
        .context(QuerySnafu)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    pub(crate) async fn weather_query_impl(
        &self,
        id: WeatherQueryId,
    ) -> Result<Option<stratus_core::WeatherQuery>> {
        let row = sqlx::query_as::<_, models::WeatherQuery>(
            "SELECT \
                weather_query_id, location, start_date, end_date, result, created_at \
             FROM \
                weather_queries \
             WHERE \
                weather_query_id = ?1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .context(QuerySnafu)?;

        row.map(TryInto::try_into).transpose()
    }

    pub(crate) async fn replace_weather_query_impl(
        &self,
        query: &stratus_core::WeatherQuery,
    ) -> Result<bool> {
        let result = query
            .result
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context(JsonConversionSnafu)?;

        let rows_affected = sqlx::query(
            "UPDATE weather_queries \
             SET \
                location = ?1, \
                start_date = ?2, \
                end_date = ?3, \
                result = ?4 \
             WHERE \
                weather_query_id = ?5",
        )
        .bind(&query.location)
        .bind(query.start_date.format(DATE_FORMAT).to_string())
        .bind(query.end_date.format(DATE_FORMAT).to_string())
        .bind(result)
        .bind(query.id.0)
        .execute(&self.pool)
        .await
        .context(QuerySnafu)?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    pub(crate) async fn delete_weather_query_impl(&self, id: WeatherQueryId) -> Result<bool> {
        let rows_affected = sqlx::query(
            "DELETE FROM weather_queries \
             WHERE \
                weather_query_id = ?1",
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .context(QuerySnafu)?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
