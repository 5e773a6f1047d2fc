//! Server configuration loaded from the environment.

use anyhow::{Context, Result};
use std::time::Duration;
use summary::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5000;

/// Settings for the HTTP server and the summary store behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServerConfig {
    /// Interface to listen on (`API_HOST`).
    pub(crate) host: String,
    /// Port to listen on (`API_PORT`).
    pub(crate) port: u16,
    /// Purchases API base URL (`SOURCE_URL`).
    pub(crate) source_url: String,
    /// Timeout for each purchases API request (`SOURCE_TIMEOUT_SECS`).
    pub(crate) source_timeout: Duration,
    /// Lifetime of cached summaries (`SUMMARY_CACHE_TTL_SECS`). `None` keeps them forever.
    pub(crate) cache_ttl: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            source_url: DEFAULT_BASE_URL.to_string(),
            source_timeout: DEFAULT_TIMEOUT,
            cache_ttl: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for unset or blank keys.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let port = match get("API_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("API_PORT must be a port number, got {raw:?}"))?,
            None => defaults.port,
        };

        let source_timeout = match get("SOURCE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("SOURCE_TIMEOUT_SECS must be whole seconds, got {raw:?}"))?,
            ),
            None => defaults.source_timeout,
        };

        let cache_ttl = get("SUMMARY_CACHE_TTL_SECS")
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map(Duration::from_secs)
                    .with_context(|| format!("SUMMARY_CACHE_TTL_SECS must be whole seconds, got {raw:?}"))
            })
            .transpose()?;

        Ok(Self {
            host: get("API_HOST").unwrap_or(defaults.host),
            port,
            source_url: get("SOURCE_URL").unwrap_or(defaults.source_url),
            source_timeout,
            cache_ttl,
        })
    }

    /// Address string to bind the listener to.
    pub(crate) fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
