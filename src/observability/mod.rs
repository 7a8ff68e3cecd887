//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the Local API client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape on /api/v1/metrics)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) attached to every request span
//! - The Local API key is never logged

pub mod logging;
pub mod metrics;
