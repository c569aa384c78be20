//! Client identification utilities
//!
//! Resolves the address used to key per-source throttling.

use axum::http::HeaderMap;
use std::net::IpAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolve the client IP for a request
///
/// The transport peer address is authoritative. `X-Forwarded-For` is only
/// consulted when the service is deployed behind a proxy that sets it
/// (`trust_forwarded_for`), and then only its first well-formed entry.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Peer address of the TCP connection
/// * `trust_forwarded_for` - Whether `X-Forwarded-For` may override the peer
pub fn resolve_client_ip(
    headers: &HeaderMap,
    direct_ip: IpAddr,
    trust_forwarded_for: bool,
) -> IpAddr {
    if !trust_forwarded_for {
        return direct_ip;
    }

    headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .unwrap_or(direct_ip)
}
