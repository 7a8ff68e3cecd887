//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bouncer_forward_auth_total` (counter): forward-auth outcomes by verdict, reason
//! - `bouncer_lapi_request_duration_seconds` (histogram): Local API lookup latency
//!
//! Without an installed recorder every call here is a no-op, which keeps
//! library users and tests free of global state.

use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::sync::broadcast;
use tokio::time;

use crate::crowdsec::Verdict;
use crate::error::BouncerError;

pub const FORWARD_AUTH_TOTAL: &str = "bouncer_forward_auth_total";
pub const LAPI_REQUEST_DURATION: &str = "bouncer_lapi_request_duration_seconds";

/// How often [`run_upkeep`] drains histogram samples into their buckets.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

const LAPI_LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

fn builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full(LAPI_REQUEST_DURATION.to_string()),
        LAPI_LATENCY_BUCKETS,
    )
}

/// Install the global Prometheus recorder.
///
/// The returned handle renders the exposition text served on `/api/v1/metrics`.
/// Pair it with [`run_upkeep`]; until upkeep or a scrape runs, histogram
/// samples are buffered unbounded.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = builder()?.install_recorder()?;

    ::metrics::describe_counter!(FORWARD_AUTH_TOTAL, "Forward-auth requests by verdict");
    ::metrics::describe_histogram!(
        LAPI_REQUEST_DURATION,
        ::metrics::Unit::Seconds,
        "Latency of CrowdSec Local API decision lookups"
    );

    Ok(handle)
}

pub fn record_verdict(verdict: Verdict) {
    ::metrics::counter!(FORWARD_AUTH_TOTAL, "verdict" => verdict.as_str(), "reason" => "none")
        .increment(1);
}

pub fn record_error(error: &BouncerError) {
    ::metrics::counter!(FORWARD_AUTH_TOTAL, "verdict" => "error", "reason" => error.kind())
        .increment(1);
}

pub fn record_lapi_request(start: Instant) {
    ::metrics::histogram!(LAPI_REQUEST_DURATION).record(start.elapsed().as_secs_f64());
}

/// Periodically drain buffered samples until `shutdown` fires.
pub async fn run_upkeep(
    handle: PrometheusHandle,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = time::interval(period);
    loop {
        tokio::select! {
            _ = ticker.tick() => handle.run_upkeep(),
            _ = shutdown.recv() => {
                tracing::debug!("Metrics upkeep stopped");
                break;
            }
        }
    }
}
