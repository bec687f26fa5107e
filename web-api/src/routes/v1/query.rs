use actix_web::web;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::{OptionExt, ResultExt};
use stratus_core::{
    parse_date, require_field, DateRange, NewWeatherQuery, WeatherQueryId, WeatherQueryUpdate,
};
use utoipa::ToSchema;

use crate::{
    error::{
        error::{ProviderSnafu, QueryNotFoundSnafu, StoreSnafu, ValidationSnafu},
        Result,
    },
    response::Response,
    Database, Weather,
};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateQueryBody {
    /// Free-form place query, validated by fetching the current weather for
    /// it.
    pub location: Option<String>,
    /// First day of the range, YYYY-MM-DD.
    pub start_date: Option<String>,
    /// Last day of the range, YYYY-MM-DD.
    pub end_date: Option<String>,
}

/// All fields are optional, omitted ones keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateQueryBody {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct WeatherQuery {
    #[schema(value_type = i64)]
    pub id: WeatherQueryId,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Provider snapshot captured when the location was last set.
    #[schema(value_type = Object)]
    pub result: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<stratus_core::WeatherQuery> for WeatherQuery {
    fn from(v: stratus_core::WeatherQuery) -> Self {
        let stratus_core::WeatherQuery {
            id,
            location,
            start_date,
            end_date,
            result,
            created_at,
        } = v;

        Self {
            id,
            location,
            start_date,
            end_date,
            result,
            created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Creates a new weather query record. The location is confirmed against the
/// provider and the returned payload is frozen into the record.
#[utoipa::path(
    post,
    path = "/queries",
    request_body = CreateQueryBody,
    responses(
        (status = 201, description = "the created record", body = WeatherQuery),
        (status = 400, description = "invalid input or a location the provider does not know", body = ErrorResponse),
        (status = 500, description = "the provider or the store failed", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db, provider))]
pub async fn create_query<T: Database + 'static, W: Weather + 'static>(
    db: web::Data<T>,
    provider: web::Data<W>,
    body: web::Json<CreateQueryBody>,
) -> Result<Response<WeatherQuery>> {
    let body = body.into_inner();

    let location = require_field(body.location.as_deref(), "location").context(ValidationSnafu)?;
    let start_date =
        require_field(body.start_date.as_deref(), "start_date").context(ValidationSnafu)?;
    let end_date = require_field(body.end_date.as_deref(), "end_date").context(ValidationSnafu)?;

    let start = parse_date(start_date).context(ValidationSnafu)?;
    let end = parse_date(end_date).context(ValidationSnafu)?;
    let date_range = DateRange::new(start, end).context(ValidationSnafu)?;

    let result = provider.current(location).await.context(ProviderSnafu)?;

    let created = db
        .create_weather_query(NewWeatherQuery {
            location: location.into(),
            date_range,
            result,
        })
        .await
        .context(StoreSnafu)?;

    Ok(Response::created(created.into()))
}

/// Returns all weather query records.
#[utoipa::path(
    get,
    path = "/queries",
    responses(
        (status = 200, description = "all records", body = Vec<WeatherQuery>),
        (status = 500, description = "the store failed", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db))]
pub async fn queries<T: Database + 'static>(
    db: web::Data<T>,
) -> Result<Response<Vec<WeatherQuery>>> {
    let queries = db.weather_queries().await.context(StoreSnafu)?;

    Ok(Response::new(
        queries.into_iter().map(WeatherQuery::from).collect(),
    ))
}

/// Returns a single weather query record.
#[utoipa::path(
    get,
    path = "/queries/{id}",
    params(("id" = i64, Path, description = "record identifier")),
    responses(
        (status = 200, description = "the record", body = WeatherQuery),
        (status = 404, description = "no record with the given id", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db))]
pub async fn query_by_id<T: Database + 'static>(
    db: web::Data<T>,
    path: web::Path<WeatherQueryId>,
) -> Result<Response<WeatherQuery>> {
    let id = path.into_inner();

    let query = db
        .weather_query(id)
        .await
        .context(StoreSnafu)?
        .context(QueryNotFoundSnafu { id })?;

    Ok(Response::new(query.into()))
}

/// Applies a partial update to a record. A new location is confirmed against
/// the provider before anything changes; the snapshot is replaced together
/// with it. Either the whole update applies or none of it does.
#[utoipa::path(
    put,
    path = "/queries/{id}",
    params(("id" = i64, Path, description = "record identifier")),
    request_body = UpdateQueryBody,
    responses(
        (status = 200, description = "the updated record", body = WeatherQuery),
        (status = 400, description = "invalid input or a location the provider does not know", body = ErrorResponse),
        (status = 404, description = "no record with the given id", body = ErrorResponse),
        (status = 500, description = "the provider or the store failed", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db, provider))]
pub async fn update_query<T: Database + 'static, W: Weather + 'static>(
    db: web::Data<T>,
    provider: web::Data<W>,
    path: web::Path<WeatherQueryId>,
    body: web::Json<UpdateQueryBody>,
) -> Result<Response<WeatherQuery>> {
    let id = path.into_inner();
    let body = body.into_inner();

    let mut query = db
        .weather_query(id)
        .await
        .context(StoreSnafu)?
        .context(QueryNotFoundSnafu { id })?;

    let location = match body.location.as_deref() {
        Some(location) if !location.trim().is_empty() => {
            let result = provider.current(location).await.context(ProviderSnafu)?;
            Some((location.to_string(), result))
        }
        _ => None,
    };

    let start_date = body
        .start_date
        .as_deref()
        .map(parse_date)
        .transpose()
        .context(ValidationSnafu)?;
    let end_date = body
        .end_date
        .as_deref()
        .map(parse_date)
        .transpose()
        .context(ValidationSnafu)?;

    query
        .apply(WeatherQueryUpdate {
            location,
            start_date,
            end_date,
        })
        .context(ValidationSnafu)?;

    if !db.replace_weather_query(&query).await.context(StoreSnafu)? {
        // Deleted between our lookup and the commit.
        return QueryNotFoundSnafu { id }.fail();
    }

    Ok(Response::new(query.into()))
}

/// Deletes a record permanently.
#[utoipa::path(
    delete,
    path = "/queries/{id}",
    params(("id" = i64, Path, description = "record identifier")),
    responses(
        (status = 200, description = "confirmation message", body = DeleteConfirmation),
        (status = 404, description = "no record with the given id", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db))]
pub async fn delete_query<T: Database + 'static>(
    db: web::Data<T>,
    path: web::Path<WeatherQueryId>,
) -> Result<Response<DeleteConfirmation>> {
    let id = path.into_inner();

    if !db.delete_weather_query(id).await.context(StoreSnafu)? {
        return QueryNotFoundSnafu { id }.fail();
    }

    Ok(Response::new(DeleteConfirmation {
        message: "Query deleted successfully.".into(),
    }))
}

/// Returns all weather query records for bulk retrieval. The representation
/// is identical to the listing endpoint.
#[utoipa::path(
    get,
    path = "/queries/export",
    responses(
        (status = 200, description = "all records", body = Vec<WeatherQuery>),
        (status = 500, description = "the store failed", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db))]
pub async fn export_queries<T: Database + 'static>(
    db: web::Data<T>,
) -> Result<Response<Vec<WeatherQuery>>> {
    let queries = db.weather_queries().await.context(StoreSnafu)?;

    Ok(Response::new(
        queries.into_iter().map(WeatherQuery::from).collect(),
    ))
}
