//! CrowdSec Local API integration.
//!
//! # Data Flow
//! ```text
//! client IP
//!     → client.rs (GET /v1/decisions?type=ban&ip=…, X-Api-Key)
//!     → decision.rs (parse JSON array, null = empty)
//!     → Verdict (Allow when empty, Deny otherwise)
//! ```

pub mod client;
pub mod decision;

pub use client::{ClientBuildError, DecisionClient};
pub use decision::{Decision, Verdict};
