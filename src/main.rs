//! CrowdSec forward-auth bouncer.
//!
//! ```text
//!   Client ──▶ Reverse proxy ──forwardAuth (X-Real-Ip)──▶ bouncer
//!                                                          │
//!                     GET /v1/decisions?type=ban&ip=…      ▼
//!                     X-Api-Key                      CrowdSec LAPI
//!
//!   [] / null  → 200, proxy forwards the request
//!   [decision] → 401, proxy rejects it
//!   any error  → 401
//! ```

use tokio::net::TcpListener;

use crowdsec_bouncer::config::{self, LogFormat};
use crowdsec_bouncer::lifecycle::{signals, Shutdown};
use crowdsec_bouncer::observability::{logging, metrics};
use crowdsec_bouncer::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging(LogFormat::Pretty);
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    logging::init_logging(config.observability.log_format);

    tracing::info!("crowdsec-bouncer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        lapi_host = %config.lapi.host,
        lapi_scheme = %config.lapi.scheme,
        timeout_secs = config.lapi.timeout_secs,
        "Configuration loaded"
    );

    let metrics_handle = if config.observability.metrics_enabled {
        match metrics::init_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install metrics recorder");
                None
            }
        }
    } else {
        None
    };

    let shutdown = Shutdown::new();
    if let Some(handle) = metrics_handle.clone() {
        tokio::spawn(metrics::run_upkeep(
            handle,
            metrics::UPKEEP_INTERVAL,
            shutdown.subscribe(),
        ));
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, metrics_handle)?;

    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
