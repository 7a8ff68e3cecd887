//! Request handlers.

use std::net::{IpAddr, Ipv4Addr};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::crowdsec::Verdict;
use crate::error::BouncerError;
use crate::http::client_ip::ClientIp;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Address looked up by the readiness check.
pub const HEALTHCHECK_IP: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Liveness check. Never touches the Local API.
pub async fn ping() -> &'static str {
    "pong"
}

/// Forward-auth check: 200 when the caller has no ban decision, 401 otherwise.
///
/// Errors (bad header, unreachable or misbehaving Local API) are also
/// answered with 401 through [`BouncerError`]'s response conversion.
pub async fn forward_auth(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
) -> Result<StatusCode, BouncerError> {
    let decisions = state.decisions.ban_decisions(ip).await?;
    let verdict = Verdict::from_decisions(&decisions);
    metrics::record_verdict(verdict);

    match verdict {
        Verdict::Allow => {
            tracing::debug!(ip = %ip, "No decision, allowing");
            Ok(StatusCode::OK)
        }
        Verdict::Deny => {
            tracing::info!(
                ip = %ip,
                decisions = decisions.len(),
                scenario = decisions[0].scenario.as_deref().unwrap_or("unknown"),
                "Banned IP, denying"
            );
            Ok(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Readiness check: 200 when the Local API answers a lookup, 503 otherwise.
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.decisions.ban_decisions(HEALTHCHECK_IP).await {
        Ok(_) => (StatusCode::OK, "ok").into_response(),
        Err(e) => {
            tracing::warn!(
                lapi_host = %state.config.lapi.host,
                kind = e.kind(),
                error = %e,
                "Local API health check failed"
            );
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

/// Prometheus exposition.
pub async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
