//! Environment-backed runtime configuration for `fashion-cli`.

use std::{env, time::Duration};

use fashion_core::{DEFAULT_HEALTH_INTERVAL, MAX_CULTURES};
use fashion_http::{ClientConfig, DEFAULT_BASE_URL};
use thiserror::Error;
use url::Url;

/// Runtime configuration used by the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Service base endpoint every operation path is appended to.
    pub base_url: String,
    /// Period between health probes in `watch-health`.
    pub health_interval: Duration,
    /// Cap on cultures accepted by `fuse`.
    pub max_cultures: usize,
    /// Optional whole-request timeout forwarded to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            health_interval: DEFAULT_HEALTH_INTERVAL,
            max_cultures: MAX_CULTURES,
            request_timeout: None,
        }
    }
}

impl CliConfig {
    /// Parse configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match optional_trimmed_env("FASHION_API_BASE_URL", &mut lookup) {
            Some(value) => validate_base_url("FASHION_API_BASE_URL", value)?,
            None => defaults.base_url,
        };
        let health_interval =
            match parse_positive_u64("FASHION_HEALTH_INTERVAL_SECS", &mut lookup)? {
                Some(secs) => Duration::from_secs(secs),
                None => defaults.health_interval,
            };
        let max_cultures = parse_positive_u64("FASHION_MAX_CULTURES", &mut lookup)?
            .map_or(defaults.max_cultures, |max| max as usize);
        let request_timeout =
            parse_positive_u64("FASHION_REQUEST_TIMEOUT_MS", &mut lookup)?.map(Duration::from_millis);

        Ok(Self {
            base_url,
            health_interval,
            max_cultures,
            request_timeout,
        })
    }

    /// Replace the base endpoint with a command-line override.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Result<Self, ConfigError> {
        if let Some(value) = base_url {
            self.base_url = validate_base_url("--base-url", value.trim().to_owned())?;
        }
        Ok(self)
    }

    /// Transport settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.base_url.clone());
        match self.request_timeout {
            Some(timeout) => config.with_request_timeout(timeout),
            None => config,
        }
    }
}

/// Errors produced while parsing runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting could not be parsed.
    #[error("invalid {key}='{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

fn optional_trimmed_env<F>(key: &'static str, lookup: &mut F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_positive_u64<F>(key: &'static str, lookup: &mut F) -> Result<Option<u64>, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    let Some(value) = optional_trimmed_env(key, lookup) else {
        return Ok(None);
    };
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            key,
            value,
            reason: "must be at least 1".to_owned(),
        }),
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => Err(ConfigError::InvalidValue {
            key,
            value,
            reason: err.to_string(),
        }),
    }
}

fn validate_base_url(key: &'static str, value: String) -> Result<String, ConfigError> {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value),
        Ok(url) => Err(ConfigError::InvalidValue {
            key,
            reason: format!("unsupported scheme '{}'", url.scheme()),
            value,
        }),
        Err(err) => Err(ConfigError::InvalidValue {
            key,
            value,
            reason: err.to_string(),
        }),
    }
}
