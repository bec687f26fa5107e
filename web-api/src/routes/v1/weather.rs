use actix_web::web;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::ResultExt;
use stratus_core::require_field;
use utoipa::IntoParams;

use crate::{
    error::{
        error::{ProviderSnafu, ValidationSnafu},
        Result,
    },
    response::Response,
    Weather,
};

#[derive(Debug, Deserialize, Serialize, IntoParams)]
pub struct WeatherParams {
    /// Free-form place query, e.g. "London", "London,uk" or a zip code.
    pub location: Option<String>,
}

/// Returns the current weather for the given location, verbatim from the
/// upstream provider.
#[utoipa::path(
    get,
    path = "/weather/current",
    params(WeatherParams),
    responses(
        (status = 200, description = "current weather for the given location"),
        (status = 400, description = "missing location parameter or a location the provider does not know", body = ErrorResponse),
        (status = 500, description = "the provider could not be reached", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(provider))]
pub async fn current_weather<W: Weather + 'static>(
    provider: web::Data<W>,
    params: web::Query<WeatherParams>,
) -> Result<Response<Value>> {
    let location = require_field(params.location.as_deref(), "location").context(ValidationSnafu)?;

    let payload = provider.current(location).await.context(ProviderSnafu)?;

    Ok(Response::new(payload))
}

/// Returns the forecast for the given location, verbatim from the upstream
/// provider.
#[utoipa::path(
    get,
    path = "/weather/forecast",
    params(WeatherParams),
    responses(
        (status = 200, description = "forecast for the given location"),
        (status = 400, description = "missing location parameter or a location the provider does not know", body = ErrorResponse),
        (status = 500, description = "the provider could not be reached", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(provider))]
pub async fn forecast_weather<W: Weather + 'static>(
    provider: web::Data<W>,
    params: web::Query<WeatherParams>,
) -> Result<Response<Value>> {
    let location = require_field(params.location.as_deref(), "location").context(ValidationSnafu)?;

    let payload = provider.forecast(location).await.context(ProviderSnafu)?;

    Ok(Response::new(payload))
}
