use std::env;

use thiserror::Error;

/// Deployment mode. Controls how much detail the error normalizer exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Process configuration, built once at startup and threaded through app state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub api_token: String,
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env_value(env::var("APP_ENV").ok().as_deref());

        let api_token = env::var("API_TOKEN").map_err(|_| ConfigError::Missing("API_TOKEN"))?;
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let port = match env::var("PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT", v))?,
            Err(_) => 8000,
        };

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid("DATABASE_MAX_CONNECTIONS", v))?,
            Err(_) => 10,
        };

        Ok(Self {
            environment,
            api_token,
            database_url,
            port,
            max_connections,
        })
    }
}
