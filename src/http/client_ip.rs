//! Client IP extraction from the trusted `X-Real-Ip` header.
//!
//! The reverse proxy in front of the bouncer must set (and overwrite) this
//! header. The bouncer has no way to tell a forged value from a real one.

use std::net::IpAddr;

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap, HeaderName};

use crate::error::BouncerError;

pub const CLIENT_IP_HEADER: HeaderName = HeaderName::from_static("x-real-ip");

/// The caller's address as reported by the reverse proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = BouncerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        client_ip(&parts.headers).map(ClientIp)
    }
}

/// Read and parse the first `X-Real-Ip` header value.
pub fn client_ip(headers: &HeaderMap) -> Result<IpAddr, BouncerError> {
    let Some(raw) = headers.get(CLIENT_IP_HEADER) else {
        return Err(BouncerError::InvalidClientIp {
            value: String::new(),
        });
    };

    raw.to_str()
        .ok()
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
        .ok_or_else(|| BouncerError::InvalidClientIp {
            value: String::from_utf8_lossy(raw.as_bytes()).into_owned(),
        })
}
