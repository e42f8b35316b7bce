//! Derived columns computed on demand from a [`RequestRecord`].
//!
//! Reports and filters use these instead of storing extra fields on the
//! record itself.

use crate::extract::RequestRecord;
use url::Url;

/// Wait time above which a request counts as slow TTFB in reports and filters
pub const SLOW_TTFB_MS: f64 = 500.0;

/// Default width for [`short_url`]
pub const SHORT_URL_LEN: usize = 80;

/// Status bucket label such as `"2xx"` or `"5xx"`
pub fn status_category(status: i64) -> String {
    format!("{}xx", status.div_euclid(100))
}

pub fn is_slow_ttfb(record: &RequestRecord) -> bool {
    record.wait_time > SLOW_TTFB_MS
}

/// Top-level MIME type (`"image"` for `"image/png"`), `"other"` when unset
pub fn mime_group(mime_type: &str) -> String {
    let group = mime_type.split('/').next().unwrap_or_default().trim();
    if group.is_empty() {
        "other".to_string()
    } else {
        group.to_string()
    }
}

/// Shorten a URL for display, keeping it under `max_len` characters
pub fn short_url(url: &str, max_len: usize) -> String {
    if url.chars().count() < max_len {
        url.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        format!("{}...", url.chars().take(keep).collect::<String>())
    }
}

/// Host (and explicit port) of a URL, or `"unknown"` when there is none
pub fn domain(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url)
        && let Some(host) = parsed.host_str()
    {
        return match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
    }

    match url.split_once("//") {
        Some((_, rest)) => {
            let host = rest.split('/').next().unwrap_or_default();
            if host.is_empty() {
                "unknown".to_string()
            } else {
                host.to_string()
            }
        }
        None => "unknown".to_string(),
    }
}

/// Clamp the `-1` "not captured" sentinel to zero for sums and charts
pub fn floor_unknown(value: f64) -> f64 {
    value.max(0.0)
}
