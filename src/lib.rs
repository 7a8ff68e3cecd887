//! CrowdSec forward-auth bouncer library.
//!
//! A reverse proxy calls `/api/v1/forwardAuth` for every inbound request. The
//! bouncer reads `X-Real-Ip`, asks the CrowdSec Local API for ban decisions
//! on that address and answers 200 (no decision) or 401 (banned, or any
//! failure along the way).

pub mod config;
pub mod crowdsec;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::BouncerConfig;
pub use error::BouncerError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
