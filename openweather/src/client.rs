use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use stratus_core::{
    provider_error::{LocationNotFoundSnafu, UnauthorizedSnafu, UnavailableSnafu},
    ProviderError, WeatherProvider,
};
use tracing::error;

pub static DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Client for the OpenWeatherMap data API. Each call is a single attempt
/// bounded by the configured timeout, there are no retries.
#[derive(Debug, Clone)]
pub struct OpenweatherApi {
    client: Client,
    api_key: String,
    api_url: String,
}

impl OpenweatherApi {
    pub fn new(settings: &Settings) -> reqwest::Result<OpenweatherApi> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(OpenweatherApi {
            client,
            api_key: settings.api_key.clone(),
            api_url: settings.api_url.trim_end_matches('/').into(),
        })
    }

    async fn download(&self, endpoint: &str, place: &str) -> Result<Value, ProviderError> {
        let url = format!("{}/{endpoint}", self.api_url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("q", place),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("openweather request failed: {e:?}");
                UnavailableSnafu.build()
            })?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => UnauthorizedSnafu.fail(),
            StatusCode::NOT_FOUND => LocationNotFoundSnafu { value: place }.fail(),
            _ if status.is_success() => response.json().await.map_err(|e| {
                error!("openweather returned an undecodable body: {e:?}");
                UnavailableSnafu.build()
            }),
            _ => {
                error!("openweather returned an unexpected status: {status}");
                UnavailableSnafu.fail()
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenweatherApi {
    async fn current(&self, location: &str) -> Result<Value, ProviderError> {
        self.download("weather", location).await
    }

    async fn forecast(&self, location: &str) -> Result<Value, ProviderError> {
        self.download("forecast", location).await
    }
}
