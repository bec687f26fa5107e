#![deny(warnings)]
#![deny(rust_2018_idioms)]

use openweather::OpenweatherApi;
use routes::v1;
use sqlite::SqliteAdapter;
use stratus_core::{WeatherProvider, WeatherQueryStorage};
use utoipa::OpenApi;

pub mod error;
pub mod response;
pub mod routes;
pub mod settings;
pub mod startup;

pub trait Database: WeatherQueryStorage {}

impl Database for SqliteAdapter {}

pub trait Weather: WeatherProvider {}

impl Weather for OpenweatherApi {}

#[derive(OpenApi)]
#[openapi(
    paths(
        v1::weather::current_weather,
        v1::weather::forecast_weather,
        v1::query::create_query,
        v1::query::queries,
        v1::query::query_by_id,
        v1::query::update_query,
        v1::query::delete_query,
        v1::query::export_queries,
    ),
    components(
        schemas(
            error::ErrorResponse,
            v1::query::WeatherQuery,
            v1::query::CreateQueryBody,
            v1::query::UpdateQueryBody,
            v1::query::DeleteConfirmation,
        )
    ),
    tags(
        (name = "stratus-api", description = "weather lookup and weather query records")
    ),
)]
pub struct ApiDoc;
