//! Base URL resolution for building `short_url` values.

use axum::http::{HeaderMap, header};

/// Header set by reverse proxies to report the scheme the client used.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Derives a base URL (`scheme://host[:port]`) from request headers.
///
/// The port is kept because it is part of the address clients must visit.
/// The scheme comes from `X-Forwarded-Proto` when it names `http` or `https`,
/// otherwise `http` is assumed.
///
/// Returns `None` if the `Host` header is missing, not valid UTF-8, or empty.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// assert_eq!(base_url_from_headers(&headers).unwrap(), "http://sho.rt:8080");
/// ```
pub fn base_url_from_headers(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?.trim();
    if host.is_empty() {
        return None;
    }

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "http" || v == "https")
        .unwrap_or_else(|| "http".to_string());

    Some(format!("{scheme}://{host}"))
}

/// Joins a base URL and a code into the public short URL.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
