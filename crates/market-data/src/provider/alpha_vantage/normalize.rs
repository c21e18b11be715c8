//! Normalizers for Alpha Vantage responses.
//!
//! Both normalizers take the response as received (status + body) and either
//! produce a typed record or classify the failure. Classification order:
//!
//! 1. throttling (`Note` or rate-limit `Information`), whatever the status
//! 2. any other non-2xx status
//! 3. provider error messages and missing payloads
//! 4. unparsable fields

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use reqwest::StatusCode;
use serde_json::{Map, Value};

use super::models::{
    intraday_series_key, GlobalQuoteResponse, IntradayMetaData, CLOSE_KEY, ERROR_MESSAGE_KEY,
    INFORMATION_KEY, META_DATA_KEY, NOTE_KEY,
};
use crate::errors::FetchError;
use crate::models::{Interval, Quote, Series, SeriesPoint};

/// Time zone of intraday keys when the response does not name one.
const DEFAULT_TIME_ZONE: Tz = chrono_tz::US::Eastern;

/// Change percent assumed when the provider omits the field.
const DEFAULT_CHANGE_PERCENT: &str = "0%";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// A provider response as received: status line plus body text.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

/// Normalize a GLOBAL_QUOTE response for `symbol` into a [`Quote`].
pub fn normalize_quote(symbol: &str, response: &RawResponse) -> Result<Quote, FetchError> {
    let body = parse_envelope(symbol, response)?;

    let parsed: GlobalQuoteResponse = serde_json::from_value(Value::Object(body))
        .map_err(|e| FetchError::malformed(symbol, format!("Failed to parse quote: {}", e)))?;

    let raw = parsed
        .global_quote
        .ok_or_else(|| FetchError::unavailable(symbol))?;

    let quote_symbol = raw
        .symbol
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| FetchError::unavailable(symbol))?;

    let price = raw
        .price
        .as_deref()
        .and_then(parse_number)
        .ok_or_else(|| {
            FetchError::malformed(symbol, format!("price {:?} is not a number", raw.price))
        })?;

    let change_percent = parse_change_percent(raw.change_percent.as_deref()).ok_or_else(|| {
        FetchError::malformed(
            symbol,
            format!("change percent {:?} is not a number", raw.change_percent),
        )
    })?;

    Ok(Quote {
        symbol: quote_symbol,
        price,
        change_percent,
        previous_close: parse_optional(symbol, "previous close", raw.previous_close.as_deref()),
        change: parse_optional(symbol, "change", raw.change.as_deref()),
        latest_trading_day: raw.latest_trading_day,
    })
}

/// Normalize a TIME_SERIES_INTRADAY response for `symbol` into a [`Series`].
///
/// Bars whose timestamp or close cannot be parsed are dropped. An empty
/// series is returned as `Ok`.
pub fn normalize_series(
    symbol: &str,
    interval: Interval,
    response: &RawResponse,
) -> Result<Series, FetchError> {
    let mut body = parse_envelope(symbol, response)?;

    let time_zone = body
        .remove(META_DATA_KEY)
        .and_then(|meta| serde_json::from_value::<IntradayMetaData>(meta).ok())
        .and_then(|meta| meta.time_zone)
        .map(|name| resolve_time_zone(&name))
        .unwrap_or(DEFAULT_TIME_ZONE);

    let bars = match body.remove(&intraday_series_key(interval.as_str())) {
        Some(Value::Object(bars)) => bars,
        None | Some(Value::Null) => return Err(FetchError::unavailable(symbol)),
        Some(_) => {
            return Err(FetchError::malformed(
                symbol,
                "intraday series is not an object",
            ))
        }
    };

    let total = bars.len();
    let points: Vec<SeriesPoint> = bars
        .iter()
        .filter_map(|(key, bar)| {
            let timestamp = parse_timestamp(key, time_zone)?;
            let close = bar
                .get(CLOSE_KEY)
                .and_then(Value::as_str)
                .and_then(parse_number)?;
            Some(SeriesPoint { timestamp, close })
        })
        .collect();

    if points.len() < total {
        debug!(
            "Alpha Vantage: dropped {} of {} {} bars for {}",
            total - points.len(),
            total,
            interval,
            symbol
        );
    }

    Ok(Series::from_points(points))
}

/// Check the status line and top-level soft-error fields, returning the body
/// object when the response is usable.
fn parse_envelope(symbol: &str, response: &RawResponse) -> Result<Map<String, Value>, FetchError> {
    if !response.status.is_success() {
        return Err(classify_failed_status(symbol, response));
    }

    let value: Value = serde_json::from_str(&response.body)
        .map_err(|e| FetchError::malformed(symbol, format!("Failed to parse response: {}", e)))?;

    let Value::Object(body) = value else {
        return Err(FetchError::malformed(symbol, "response is not a JSON object"));
    };

    check_api_error(symbol, &body)?;
    Ok(body)
}

/// A non-2xx response is a transport failure unless its body reports a throttle.
fn classify_failed_status(symbol: &str, response: &RawResponse) -> FetchError {
    let throttled = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|v| v.as_object().map(is_throttled))
        .unwrap_or(false);

    if throttled {
        FetchError::rate_limited(symbol)
    } else {
        FetchError::transport(symbol, Some(response.status.as_u16()))
    }
}

fn check_api_error(symbol: &str, body: &Map<String, Value>) -> Result<(), FetchError> {
    if is_throttled(body) {
        debug!("Alpha Vantage throttled request for {}", symbol);
        return Err(FetchError::rate_limited(symbol));
    }

    if let Some(msg) = body.get(INFORMATION_KEY).and_then(Value::as_str) {
        warn!("Alpha Vantage info for {}: {}", symbol, msg);
    }

    if let Some(msg) = body.get(ERROR_MESSAGE_KEY) {
        debug!("Alpha Vantage error for {}: {}", symbol, msg);
        return Err(FetchError::unavailable(symbol));
    }

    Ok(())
}

/// `Note` always means throttling; `Information` only when it says so.
fn is_throttled(body: &Map<String, Value>) -> bool {
    if body.contains_key(NOTE_KEY) {
        return true;
    }
    body.get(INFORMATION_KEY)
        .and_then(Value::as_str)
        .map(is_rate_limit_message)
        .unwrap_or(false)
}

fn is_rate_limit_message(msg: &str) -> bool {
    let msg = msg.to_ascii_lowercase();
    msg.contains("rate limit") || msg.contains("api call frequency")
}

/// Parse a finite float, tolerating surrounding whitespace.
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strip one trailing `%` and parse. Missing or blank input reads as `0%`.
fn parse_change_percent(value: Option<&str>) -> Option<f64> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_CHANGE_PERCENT);
    parse_number(value.strip_suffix('%').unwrap_or(value))
}

/// Optional numeric fields read as `0.0` when absent or unparsable.
fn parse_optional(symbol: &str, field: &str, value: Option<&str>) -> f64 {
    match value {
        None => 0.0,
        Some(raw) => parse_number(raw).unwrap_or_else(|| {
            debug!("Alpha Vantage: {} for {} is {:?}, using 0", field, symbol, raw);
            0.0
        }),
    }
}

fn resolve_time_zone(name: &str) -> Tz {
    name.trim().parse::<Tz>().unwrap_or_else(|_| {
        warn!(
            "Alpha Vantage: unknown time zone {:?}, assuming {}",
            name, DEFAULT_TIME_ZONE
        );
        DEFAULT_TIME_ZONE
    })
}

/// Parse an intraday key (`2024-01-15 09:30:00`) in the exchange time zone.
fn parse_timestamp(key: &str, time_zone: Tz) -> Option<DateTime<Utc>> {
    let key = key.trim();
    let naive = TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(key, format).ok())?;
    time_zone
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
