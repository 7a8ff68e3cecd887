//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Reverse proxy forward-auth request
//!     → server.rs (Axum router, request ID, tracing)
//!     → client_ip.rs (X-Real-Ip → IpAddr)
//!     → handlers.rs (Local API lookup, verdict)
//!     → 200 / 401 back to the proxy
//! ```

pub mod client_ip;
pub mod handlers;
pub mod request;
pub mod server;

pub use client_ip::{ClientIp, CLIENT_IP_HEADER};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
