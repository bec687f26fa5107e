use async_trait::async_trait;
use serde_json::Value;

use crate::{NewWeatherQuery, ProviderError, StorageError, WeatherQuery, WeatherQueryId};

#[async_trait]
pub trait WeatherQueryStorage: Send + Sync {
    async fn create_weather_query(
        &self,
        query: NewWeatherQuery,
    ) -> Result<WeatherQuery, StorageError>;
    async fn weather_queries(&self) -> Result<Vec<WeatherQuery>, StorageError>;
    async fn weather_query(
        &self,
        id: WeatherQueryId,
    ) -> Result<Option<WeatherQuery>, StorageError>;
    /// Overwrites all mutable fields of the record with `query.id` in a
    /// single commit. Returns `false` when no such record exists.
    async fn replace_weather_query(&self, query: &WeatherQuery) -> Result<bool, StorageError>;
    /// Returns `false` when no such record exists.
    async fn delete_weather_query(&self, id: WeatherQueryId) -> Result<bool, StorageError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the current weather for a free-form location query. The
    /// payload is opaque to the rest of the system.
    async fn current(&self, location: &str) -> Result<Value, ProviderError>;
    /// Fetches the forecast for a free-form location query.
    async fn forecast(&self, location: &str) -> Result<Value, ProviderError>;
}
