//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bouncer.
//! Values are filled in by the environment loader; every type has a
//! `Default` matching the documented defaults.

use std::fmt;
use std::time::Duration;

use url::Url;

/// Root configuration for the bouncer.
#[derive(Debug, Clone, Default)]
pub struct BouncerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// CrowdSec Local API connection settings.
    pub lapi: LapiConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Connection settings for the CrowdSec Local API.
#[derive(Clone)]
pub struct LapiConfig {
    /// Bouncer API key sent as `X-Api-Key`.
    pub api_key: String,

    /// Host (and optional port) of the Local API.
    pub host: String,

    /// `http` or `https`.
    pub scheme: String,

    /// Total request timeout in seconds. `0` disables the timeout.
    pub timeout_secs: u64,

    /// Maximum idle pooled connections kept to the Local API.
    pub max_idle_connections: usize,

    /// Idle pooled connection timeout in seconds.
    pub idle_timeout_secs: u64,
}

impl Default for LapiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            host: String::new(),
            scheme: "http".to_string(),
            timeout_secs: 5,
            max_idle_connections: 10,
            idle_timeout_secs: 30,
        }
    }
}

impl LapiConfig {
    /// Base URL of the Local API, e.g. `http://crowdsec:8080/`.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}://{}/", self.scheme, self.host))
    }

    /// Full URL of the decisions endpoint.
    pub fn decisions_url(&self) -> Result<Url, url::ParseError> {
        self.base_url()?.join("v1/decisions")
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

// The API key never reaches the logs.
impl fmt::Debug for LapiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LapiConfig")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("scheme", &self.scheme)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_idle_connections", &self.max_idle_connections)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .finish()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_format: LogFormat,

    /// Expose Prometheus metrics on `/api/v1/metrics`.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}
