//! HTTP client for the CrowdSec Local API.
//!
//! # Responsibilities
//! - Build one pooled `reqwest::Client` at startup
//! - Query ban decisions for a single IP
//! - Classify transport, body and parse failures
//!
//! # Design Decisions
//! - No retries and no caching: one lookup per forward-auth request
//! - Cloning the client shares the connection pool

use std::net::IpAddr;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::LapiConfig;
use crate::crowdsec::decision::{parse_decisions, Decision};
use crate::error::BouncerError;
use crate::observability::metrics;

pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Error raised while building the client at startup.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid Local API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid API key header value")]
    ApiKey(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct DecisionClient {
    http: reqwest::Client,
    decisions_url: Url,
}

impl DecisionClient {
    pub fn new(config: &LapiConfig) -> Result<Self, ClientBuildError> {
        let decisions_url = config.decisions_url()?;

        let mut api_key = HeaderValue::from_str(&config.api_key)?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(config.max_idle_connections)
            .pool_idle_timeout(config.idle_timeout());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            decisions_url,
        })
    }

    /// URL queried for `ip`: `…/v1/decisions?type=ban&ip=<ip>`.
    pub fn lookup_url(&self, ip: IpAddr) -> Url {
        let mut url = self.decisions_url.clone();
        url.query_pairs_mut()
            .append_pair("type", "ban")
            .append_pair("ip", &ip.to_string());
        url
    }

    /// Fetch the active ban decisions for `ip`.
    pub async fn ban_decisions(&self, ip: IpAddr) -> Result<Vec<Decision>, BouncerError> {
        let start = Instant::now();
        let result = self.fetch(ip).await;
        metrics::record_lapi_request(start);
        result
    }

    async fn fetch(&self, ip: IpAddr) -> Result<Vec<Decision>, BouncerError> {
        let response = self
            .http
            .get(self.lookup_url(ip))
            .send()
            .await
            .map_err(BouncerError::UpstreamUnreachable)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, ip = %ip, "Local API answered with non-success status");
        }

        let body = response.bytes().await.map_err(BouncerError::UpstreamRead)?;
        parse_decisions(&body)
    }
}
