use serde::Deserialize;
use std::env;

use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the order service, e.g. `http://localhost:8080`.
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no order service configured; set api.base_url in config/*.toml or ORDERDESK__API__BASE_URL"
    )]
    MissingBaseUrl,
    #[error(transparent)]
    Load(#[from] config::ConfigError),
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Defaults first, then the per-environment file, then local
            // overrides. None of the files has to exist.
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `ORDERDESK__API__BASE_URL=...` overrides `api.base_url`
            .add_source(config::Environment::with_prefix("ORDERDESK").separator("__"))
            .build()?;

        let config: Config = s.try_deserialize()?;
        if config.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A single test because it mutates the process environment.
    #[test]
    fn test_load_reads_environment_overrides() {
        // No config files are visible from the test directory, so without
        // an override there is no base URL.
        let err = Config::load().unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));

        env::set_var("ORDERDESK__API__BASE_URL", "http://orders.test:9000");
        env::set_var("ORDERDESK__API__REQUEST_TIMEOUT_SECS", "3");
        let config = Config::load().unwrap();
        env::remove_var("ORDERDESK__API__BASE_URL");
        env::remove_var("ORDERDESK__API__REQUEST_TIMEOUT_SECS");

        assert_eq!(config.api.base_url, "http://orders.test:9000");
        assert_eq!(config.api.request_timeout_secs, 3);
    }
}
