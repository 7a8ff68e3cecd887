//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID)
//! - Build the shared Local API client once
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::BouncerConfig;
use crate::crowdsec::{ClientBuildError, DecisionClient};
use crate::http::handlers;
use crate::http::request::{make_request_span, MakeRequestUuidV4, X_REQUEST_ID};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BouncerConfig>,
    pub decisions: DecisionClient,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build the shared state, including the pooled Local API client.
    pub fn new(
        config: Arc<BouncerConfig>,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, ClientBuildError> {
        Ok(Self {
            decisions: DecisionClient::new(&config.lapi)?,
            config,
            metrics,
        })
    }
}

/// HTTP server for the bouncer.
pub struct HttpServer {
    router: Router,
    config: Arc<BouncerConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// `metrics` is the handle returned by
    /// [`init_metrics`](crate::observability::metrics::init_metrics); without
    /// it the metrics route is not registered.
    pub fn new(
        config: BouncerConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, ClientBuildError> {
        let config = Arc::new(config);
        let state = AppState::new(config.clone(), metrics)?;

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        let mut api = Router::new()
            .route("/ping", get(handlers::ping))
            .route("/healthz", get(handlers::healthz))
            .route("/forwardAuth", any(handlers::forward_auth));
        if state.metrics.is_some() {
            api = api.route("/metrics", get(handlers::prometheus_metrics));
        }

        Router::new()
            .nest("/api/v1", api)
            .with_state(state)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// The configured router, e.g. for driving with `tower::ServiceExt::oneshot`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            lapi_host = %self.config.lapi.host,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
