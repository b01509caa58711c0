//! Per-client rate limiting using the token bucket algorithm.

use anyhow::{Result, anyhow};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::RateLimit;

/// Rate limiting layer keyed by the socket peer address.
pub type PeerRateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiting layer keyed by the forwarded client address.
pub type ProxiedRateLimitLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter keyed by the peer IP address.
///
/// # Limits
///
/// A client may burst up to `limit.requests` requests; one more is allowed
/// every `limit.period / limit.requests`. With the default `60 per minute`
/// that is a burst of 60 and one request per second after that.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Errors
///
/// Returns an error if the limit allows zero requests.
pub fn layer(limit: &RateLimit) -> Result<PeerRateLimitLayer> {
    let (replenish_ms, burst) = bucket(limit)?;

    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(burst)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit configuration"))?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Creates a rate limiter keyed by `X-Forwarded-For` / `X-Real-IP`.
///
/// Falls back to the peer address when neither header is present. Use only
/// behind a trusted reverse proxy, since clients can set these headers.
///
/// # Errors
///
/// Returns an error if the limit allows zero requests.
pub fn proxied_layer(limit: &RateLimit) -> Result<ProxiedRateLimitLayer> {
    let (replenish_ms, burst) = bucket(limit)?;

    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(burst)
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit configuration"))?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Replenish interval in milliseconds and burst size for a limit.
fn bucket(limit: &RateLimit) -> Result<(u64, u32)> {
    if limit.requests == 0 {
        anyhow::bail!("rate limit must allow at least one request");
    }

    let replenish_ms = u64::try_from(limit.replenish_interval().as_millis())
        .unwrap_or(u64::MAX)
        .max(1);

    Ok((replenish_ms, limit.requests))
}
