// Client and server configuration, loaded from the environment at startup

use crate::error::{Result, TicketmasterError};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";
pub const API_KEY_ENV: &str = "TICKETMASTER_API_KEY";
pub const BASE_URL_ENV: &str = "TICKETMASTER_BASE_URL";
pub const TIMEOUT_ENV: &str = "TICKETMASTER_TIMEOUT_MS";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    // Applied by the transport; the client itself never times out
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub client: ClientConfig,
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get(API_KEY_ENV).ok_or_else(|| {
            TicketmasterError::ConfigError(format!("{} environment variable is required", API_KEY_ENV))
        })?;

        let timeout = match get(TIMEOUT_ENV) {
            Some(raw) => {
                let millis = raw.trim().parse::<u64>().map_err(|_| {
                    TicketmasterError::ConfigError(format!(
                        "{} must be a whole number of milliseconds, got '{}'",
                        TIMEOUT_ENV, raw
                    ))
                })?;
                if millis == 0 {
                    return Err(TicketmasterError::ConfigError(format!(
                        "{} must be greater than zero",
                        TIMEOUT_ENV
                    )));
                }
                Some(Duration::from_millis(millis))
            }
            None => None,
        };

        let base_url = get(BASE_URL_ENV)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client: ClientConfig {
                base_url,
                api_key,
                timeout,
            },
            log_level: get(LOG_LEVEL_ENV).unwrap_or_else(|| "info".to_string()),
        })
    }
}
