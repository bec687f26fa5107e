use config::{Config, ConfigError, File};
use serde::Deserialize;
use sqlite::SqliteSettings;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log_level: String,
    pub api: ApiSettings,
    pub sqlite: SqliteSettings,
    pub openweather: openweather::Settings,
    pub environment: Environment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub ip: String,
    pub port: u16,
    pub num_workers: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Test,
    Development,
    Production,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .map(|e| {
                e.as_str()
                    .try_into()
                    .unwrap_or(Environment::Development)
            })
            .unwrap_or(Environment::Development);

        let environment = environment.as_str();

        Config::builder()
            .add_source(File::with_name(&format!("config/{environment}")).required(true))
            .add_source(File::with_name(&format!("config/{environment}.secret")).required(false))
            .add_source(config::Environment::with_prefix("STRATUS_API").separator("__"))
            .set_override("environment", environment)?
            .build()?
            .try_deserialize()
    }

    pub fn init_tracer(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }
}

impl ApiSettings {
    pub fn listener_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<&str> for Environment {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(format!("'{other}' is not a known environment")),
        }
    }
}
