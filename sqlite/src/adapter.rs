use std::str::FromStr;

use async_trait::async_trait;
use serde::Deserialize;
use snafu::ResultExt;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use stratus_core::{
    NewWeatherQuery, StorageError, WeatherQuery, WeatherQueryId, WeatherQueryStorage,
};

use crate::error::{
    error::{ConnectionSnafu, MigrationSnafu},
    Result,
};

#[derive(Debug, Clone, Deserialize)]
pub struct SqliteSettings {
    /// sqlx-compatible url, e.g. `sqlite://stratus.db` or `sqlite::memory:`.
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone)]
pub struct SqliteAdapter {
    pub(crate) pool: SqlitePool,
}

impl SqliteAdapter {
    pub async fn new(settings: &SqliteSettings) -> Result<SqliteAdapter> {
        let opts = SqliteConnectOptions::from_str(&settings.database_url)
            .context(ConnectionSnafu)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(opts)
            .await
            .context(ConnectionSnafu)?;

        Ok(SqliteAdapter { pool })
    }

    pub async fn do_migrations(&self) -> Result<()> {
        sqlx::migrate!().run(&self.pool).await.context(MigrationSnafu)
    }
}

#[async_trait]
impl WeatherQueryStorage for SqliteAdapter {
    async fn create_weather_query(
        &self,
        query: NewWeatherQuery,
    ) -> Result<WeatherQuery, StorageError> {
        Ok(self.create_weather_query_impl(query).await?)
    }

    async fn weather_queries(&self) -> Result<Vec<WeatherQuery>, StorageError> {
        Ok(self.weather_queries_impl().await?)
    }

    async fn weather_query(
        &self,
        id: WeatherQueryId,
    ) -> Result<Option<WeatherQuery>, StorageError> {
        Ok(self.weather_query_impl(id).await?)
    }

    async fn replace_weather_query(&self, query: &WeatherQuery) -> Result<bool, StorageError> {
        Ok(self.replace_weather_query_impl(query).await?)
    }

    async fn delete_weather_query(&self, id: WeatherQueryId) -> Result<bool, StorageError> {
        Ok(self.delete_weather_query_impl(id).await?)
    }
}
