use std::{env, fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::info;

use crate::services::{
    backend_proxy::backend_proxy::BackendProxyConfig,
    places_service::places_service::PlacesServiceConfig,
};

const DEFAULT_PLACES_HOST: &str = "https://maps.googleapis.com";
const DEFAULT_DEV_BACKEND: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("API_BASE or PUBLIC_API_BASE must be set when APP_ENV=production")]
    MissingBackendBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            other => Err(format!("expected development or production, got {}", other)),
        }
    }
}

pub struct AppConfig {
    pub bind_addr: String,
    pub env: AppEnv,
    pub places: PlacesServiceConfig,
    pub backend: BackendProxyConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let env: AppEnv = try_load(&var, "APP_ENV", "development")?;
        let timeout_ms: u64 = try_load(&var, "PLACES_TIMEOUT_MS", "8000")?;

        let base_url = match (var("API_BASE"), env) {
            (Some(base), _) => base,
            (None, AppEnv::Development) => DEFAULT_DEV_BACKEND.to_string(),
            (None, AppEnv::Production) => var("PUBLIC_API_BASE").ok_or(ConfigError::MissingBackendBase)?,
        };
        info!(backend = %base_url, ?env, "Resolved backend origin");

        Ok(AppConfig {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            env,
            places: PlacesServiceConfig {
                api_key: var("GOOGLE_MAPS_API_KEY"),
                host: var("GOOGLE_PLACES_HOST").unwrap_or_else(|| DEFAULT_PLACES_HOST.to_string()),
                timeout: Duration::from_millis(timeout_ms),
            },
            backend: BackendProxyConfig { base_url },
        })
    }
}

fn try_load<T, F>(var: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value,
        reason: e.to_string(),
    })
}
