//! Local API decision records and the verdict derived from them.

use serde::{Deserialize, Serialize};

use crate::error::BouncerError;

/// A decision returned by `GET /v1/decisions`.
///
/// Only the presence of a decision matters to the bouncer; the fields are
/// kept for logging. Unknown fields are ignored and missing ones default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Decision {
    pub id: Option<i64>,
    pub origin: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub scope: Option<String>,
    pub value: Option<String>,
    pub duration: Option<String>,
    pub scenario: Option<String>,
    pub simulated: Option<bool>,
}

/// Parse a Local API response body.
///
/// The Local API answers `null` when nothing matches, which counts as an
/// empty list. Anything that is not an array of objects is an error.
pub fn parse_decisions(body: &[u8]) -> Result<Vec<Decision>, BouncerError> {
    let decisions: Option<Vec<Decision>> = serde_json::from_slice(body)?;
    Ok(decisions.unwrap_or_default())
}

/// Outcome of a forward-auth check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny,
}

impl Verdict {
    pub fn from_decisions(decisions: &[Decision]) -> Self {
        if decisions.is_empty() {
            Verdict::Allow
        } else {
            Verdict::Deny
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Allow => "allow",
            Verdict::Deny => "deny",
        }
    }
}
