//! Request context handed to route handlers, plus query-string helpers.

use chrono::{DateTime, Utc};
use ic_http_certification::Method;

use crate::config::SvgConfig;
use crate::window::Period;

/// Decoded query-string parameters in request order.
///
/// Keys may repeat; [`QueryParams::get`] returns the first occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

/// Everything a handler needs to produce a response.
#[derive(Clone, Debug)]
pub struct RouteContext {
    /// Decoded query parameters.
    pub query: QueryParams,
    pub method: Method,
    /// The instant the request is served at.
    pub now: DateTime<Utc>,
    /// Snapshot of the active configuration.
    pub config: SvgConfig,
}

impl RouteContext {
    /// Query value for `key`, or `default` when absent.
    pub fn param_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.query.get(key).unwrap_or(default)
    }

    /// The `period` parameter as a window width.
    ///
    /// See [`parse_period`] for the fallback rules.
    pub fn period(&self) -> Period {
        parse_period(self.query.get("period"), self.config.default_period)
    }
}

/// Extract the raw query string from a URL, without the fragment.
///
/// ```
/// use ic_dynamic_svg::context::query_string;
///
/// assert_eq!(query_string("/api/dynamic-svg?period=2#top"), "period=2");
/// assert_eq!(query_string("/api/dynamic-svg"), "");
/// ```
pub fn query_string(url: &str) -> &str {
    url.split_once('?')
        .map(|(_, q)| q.split_once('#').map_or(q, |(qs, _)| qs))
        .unwrap_or("")
}

/// Decode the query string of `url` as `application/x-www-form-urlencoded`.
///
/// `+` decodes to a space and percent escapes are resolved. A query that
/// cannot be decoded yields an empty set, so handlers fall back to their
/// defaults.
pub fn parse_query(url: &str) -> QueryParams {
    match serde_urlencoded::from_str::<Vec<(String, String)>>(query_string(url)) {
        Ok(pairs) => QueryParams(pairs),
        Err(_e) => {
            debug_log!("parse_query: ignoring undecodable query in {}: {}", url, _e);
            QueryParams::default()
        }
    }
}

/// Interpret a raw `period` value.
///
/// - absent or blank: `default`
/// - otherwise the leading integer of the trimmed value is used, so `"6h"`
///   means 6; a value without a leading integer falls back to `default`
/// - the result is clamped into `1..=Period::MAX_HOURS`
pub fn parse_period(raw: Option<&str>, default: Period) -> Period {
    raw.and_then(leading_integer)
        .map(Period::clamped)
        .unwrap_or(default)
}

/// Parse an optional sign followed by decimal digits at the start of `s`.
///
/// Returns `None` when no digit follows the sign. Values too large for `i64`
/// saturate.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
