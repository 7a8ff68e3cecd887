//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read variables, apply defaults)
//!     → validation.rs (semantic checks)
//!     → BouncerConfig (validated, immutable)
//!     → shared via Arc in the handlers' AppState
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; changes require a restart
//! - Only the API key and Local API host are mandatory
//! - Validation separates parsing from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from, load_from_env, ConfigError};
pub use schema::BouncerConfig;
pub use schema::LapiConfig;
pub use schema::ListenerConfig;
pub use schema::{LogFormat, ObservabilityConfig};
