//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles syntactic parsing)
//! - Validate value ranges and the Local API URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BouncerConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BouncerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("API key must not be empty")]
    EmptyApiKey,

    #[error("Local API host must not be empty")]
    EmptyHost,

    #[error("unsupported scheme {0:?}, expected \"http\" or \"https\"")]
    UnsupportedScheme(String),

    #[error("Local API URL is invalid: {0}")]
    InvalidUrl(String),

    #[error("bind address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("max idle connections must be greater than zero")]
    ZeroIdleConnections,
}

pub fn validate_config(config: &BouncerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let lapi = &config.lapi;

    if lapi.api_key.trim().is_empty() {
        errors.push(ValidationError::EmptyApiKey);
    }

    let scheme_ok = matches!(lapi.scheme.as_str(), "http" | "https");
    if !scheme_ok {
        errors.push(ValidationError::UnsupportedScheme(lapi.scheme.clone()));
    }

    if lapi.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    } else if scheme_ok {
        if let Err(e) = lapi.decisions_url() {
            errors.push(ValidationError::InvalidUrl(e.to_string()));
        }
    }

    if lapi.max_idle_connections == 0 {
        errors.push(ValidationError::ZeroIdleConnections);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
