//! Configuration loading from the process environment.

use thiserror::Error;

use crate::config::schema::{BouncerConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_API_KEY: &str = "CROWDSEC_BOUNCER_API_KEY";
pub const ENV_HOST: &str = "CROWDSEC_BOUNCER_HOST";
pub const ENV_SCHEME: &str = "CROWDSEC_BOUNCER_SCHEME";
pub const ENV_TIMEOUT_SECS: &str = "CROWDSEC_BOUNCER_TIMEOUT_SECS";
pub const ENV_LOG_FORMAT: &str = "CROWDSEC_BOUNCER_LOG_FORMAT";
pub const ENV_PORT: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from the process environment.
pub fn load_from_env() -> Result<BouncerConfig, ConfigError> {
    load_from(|name| std::env::var(name).ok())
}

/// Load and validate configuration from an arbitrary variable lookup.
///
/// Empty values are treated the same as unset ones.
pub fn load_from<F>(lookup: F) -> Result<BouncerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let mut config = BouncerConfig::default();

    config.lapi.api_key = get(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;
    config.lapi.host = get(ENV_HOST).ok_or(ConfigError::Missing(ENV_HOST))?;

    if let Some(scheme) = get(ENV_SCHEME) {
        config.lapi.scheme = scheme.trim().to_ascii_lowercase();
    }

    if let Some(raw) = get(ENV_TIMEOUT_SECS) {
        config.lapi.timeout_secs = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::Invalid {
                var: ENV_TIMEOUT_SECS,
                value: raw.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    if let Some(raw) = get(ENV_PORT) {
        let port: u16 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::Invalid {
                var: ENV_PORT,
                value: raw.clone(),
                reason: e.to_string(),
            }
        })?;
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }

    if let Some(raw) = get(ENV_LOG_FORMAT) {
        config.observability.log_format = match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => {
                return Err(ConfigError::Invalid {
                    var: ENV_LOG_FORMAT,
                    value: raw,
                    reason: "expected \"pretty\" or \"json\"".to_string(),
                })
            }
        };
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_minimal_env_uses_defaults() {
        let config = load_from(env(&[
            (ENV_API_KEY, "secret"),
            (ENV_HOST, "crowdsec:8080"),
        ]))
        .unwrap();

        assert_eq!(config.lapi.api_key, "secret");
        assert_eq!(config.lapi.host, "crowdsec:8080");
        assert_eq!(config.lapi.scheme, "http");
        assert_eq!(config.lapi.timeout_secs, 5);
        assert_eq!(config.lapi.max_idle_connections, 10);
        assert_eq!(config.lapi.idle_timeout_secs, 30);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_missing_api_key() {
        let err = load_from(env(&[(ENV_HOST, "crowdsec:8080")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_API_KEY)));
    }

    #[test]
    fn test_missing_host() {
        let err = load_from(env(&[(ENV_API_KEY, "secret")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_HOST)));
    }

    #[test]
    fn test_empty_api_key_counts_as_missing() {
        let err = load_from(env(&[(ENV_API_KEY, " "), (ENV_HOST, "crowdsec")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_API_KEY)));
    }

    #[test]
    fn test_overrides() {
        let config = load_from(env(&[
            (ENV_API_KEY, "secret"),
            (ENV_HOST, "lapi.example.com"),
            (ENV_SCHEME, "HTTPS"),
            (ENV_TIMEOUT_SECS, "0"),
            (ENV_PORT, "9090"),
            (ENV_LOG_FORMAT, "json"),
        ]))
        .unwrap();

        assert_eq!(config.lapi.scheme, "https");
        assert_eq!(config.lapi.request_timeout(), None);
        assert_eq!(config.listener.bind_address, "0.0.0.0:9090");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_timeout() {
        let err = load_from(env(&[
            (ENV_API_KEY, "secret"),
            (ENV_HOST, "crowdsec"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_TIMEOUT_SECS, .. }));
    }

    #[test]
    fn test_invalid_port() {
        let err = load_from(env(&[
            (ENV_API_KEY, "secret"),
            (ENV_HOST, "crowdsec"),
            (ENV_PORT, "70000"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_PORT, .. }));
    }

    #[test]
    fn test_unsupported_scheme_fails_validation() {
        let err = load_from(env(&[
            (ENV_API_KEY, "secret"),
            (ENV_HOST, "crowdsec"),
            (ENV_SCHEME, "gopher"),
        ]))
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::UnsupportedScheme("gopher".into())]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
