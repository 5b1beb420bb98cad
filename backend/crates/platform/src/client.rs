//! Client identification utilities
//!
//! Resolves the source identifier of a request: the address used both for
//! rate limiting and for distinct-visitor counting.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Sentinel used when the peer address cannot be determined
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok())
        && let Some(first_ip) = xff.split(',').next()
        && let Ok(ip) = first_ip.trim().parse::<IpAddr>()
    {
        return Some(ip);
    }
    direct_ip
}

/// Resolve the source identifier for a request.
///
/// `X-Forwarded-For` is only consulted when `trust_forwarded_for` is set,
/// since any client can forge it.
pub fn source_identifier(
    headers: &HeaderMap,
    peer_ip: Option<IpAddr>,
    trust_forwarded_for: bool,
) -> String {
    let ip = if trust_forwarded_for {
        extract_client_ip(headers, peer_ip)
    } else {
        peer_ip
    };

    ip.map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}
