//! DTOs for short URL creation and lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_with::{DeserializeAs, serde_as};
use validator::Validate;

use crate::domain::entities::ShortUrl;
use crate::utils::base_url::short_url;

/// Request to shorten a URL.
///
/// `expiry_days` accepts a JSON number or a numeric string; see [`ExpiryDays`].
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. Syntax is checked by the shortening service.
    #[serde(default)]
    #[validate(
        required(message = "url is required"),
        length(min = 1, message = "url is required")
    )]
    pub url: Option<String>,

    /// Days until the short URL expires. Absent or zero means never.
    #[serde_as(as = "ExpiryDays")]
    #[serde(default)]
    pub expiry_days: Option<i64>,
}

/// Lenient day count: integers, fractional numbers (truncated toward zero) and
/// numeric strings. `null` and blank strings mean no expiry.
pub struct ExpiryDays;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDays {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> DeserializeAs<'de, Option<i64>> for ExpiryDays {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let days = match Option::<RawDays>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(RawDays::Int(days)) => return Ok(Some(days)),
            Some(RawDays::Float(days)) => days,
            Some(RawDays::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                if let Ok(days) = text.parse::<i64>() {
                    return Ok(Some(days));
                }
                text.parse::<f64>().map_err(|_| {
                    <D::Error as de::Error>::custom("expiry_days must be a number")
                })?
            }
        };

        truncate_days(days)
            .map(Some)
            .ok_or_else(|| <D::Error as de::Error>::custom("expiry_days out of range"))
    }
}

/// Truncates toward zero; `None` for NaN, infinities and values outside `i64`.
fn truncate_days(days: f64) -> Option<i64> {
    let days = days.trunc();
    // i64::MAX is not exactly representable, so the upper bound is exclusive.
    if days.is_finite() && days >= i64::MIN as f64 && days < i64::MAX as f64 {
        Some(days as i64)
    } else {
        None
    }
}

/// A stored short URL as returned by the API.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,

    /// Present when a base URL is configured or derivable from the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
}

impl ShortUrlResponse {
    pub fn from_record(record: ShortUrl, base_url: Option<&str>) -> Self {
        Self {
            short_url: base_url.map(|base| short_url(base, &record.code)),
            code: record.code,
            original_url: record.original_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            clicks: record.clicks,
        }
    }
}
