//! Errors raised while answering a forward-auth request.
//!
//! Every variant is answered with `401 Unauthorized` and an empty body. The
//! proxy cannot tell a banned caller from an unreachable Local API; the cause
//! only shows up in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum BouncerError {
    #[error("the header \"X-Real-Ip\" isn't a valid IP address: {value:?}")]
    InvalidClientIp { value: String },

    #[error("error while requesting crowdsec API: {0}")]
    UpstreamUnreachable(#[source] reqwest::Error),

    #[error("error while reading crowdsec response body: {0}")]
    UpstreamRead(#[source] reqwest::Error),

    #[error("error while unmarshalling crowdsec response body: {0}")]
    UpstreamParse(#[from] serde_json::Error),
}

impl BouncerError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BouncerError::InvalidClientIp { .. } => "invalid_client_ip",
            BouncerError::UpstreamUnreachable(_) => "upstream_unreachable",
            BouncerError::UpstreamRead(_) => "upstream_read_error",
            BouncerError::UpstreamParse(_) => "upstream_parse_error",
        }
    }
}

impl IntoResponse for BouncerError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = self.kind(), error = %self, "Denying request");
        metrics::record_error(&self);
        StatusCode::UNAUTHORIZED.into_response()
    }
}
