use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bar width for intraday series requests.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
}

impl Interval {
    pub const ALL: [Interval; 3] = [
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
    ];

    /// Wire name used in the `interval` query parameter and response keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::FiveMinutes => "5min",
            Interval::FifteenMinutes => "15min",
            Interval::ThirtyMinutes => "30min",
        }
    }

    /// Short label for chart legends, e.g. `5m`.
    pub fn label(&self) -> &'static str {
        match self {
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported interval '{0}', expected 5min, 15min or 30min")]
pub struct ParseIntervalError(pub String);

impl FromStr for Interval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseIntervalError(s.to_string()))
    }
}

/// One intraday bar reduced to its close.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Intraday closing prices, ordered ascending by timestamp.
///
/// The only constructor sorts its input, so a `Series` is always ordered.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn from_points(mut points: Vec<SeriesPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// Lowest and highest close, or `None` for an empty series.
    pub fn close_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.close, p.close)),
            Some((lo, hi)) => Some((lo.min(p.close), hi.max(p.close))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(hour: u32, minute: u32, close: f64) -> SeriesPoint {
        SeriesPoint {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0).unwrap(),
            close,
        }
    }

    #[test]
    fn test_interval_round_trips_wire_names() {
        for interval in Interval::ALL {
            assert_eq!(interval.as_str().parse::<Interval>(), Ok(interval));
        }
        assert_eq!(" 15MIN ".parse::<Interval>(), Ok(Interval::FifteenMinutes));
    }

    #[test]
    fn test_interval_rejects_unknown() {
        let err = "60min".parse::<Interval>().unwrap_err();
        assert_eq!(err, ParseIntervalError("60min".to_string()));
    }

    #[test]
    fn test_interval_default_is_five_minutes() {
        assert_eq!(Interval::default(), Interval::FiveMinutes);
        assert_eq!(Interval::default().label(), "5m");
    }

    #[test]
    fn test_series_sorts_on_construction() {
        let series = Series::from_points(vec![
            point(14, 30, 2.0),
            point(14, 25, 1.0),
            point(14, 35, 3.0),
        ]);
        let closes: Vec<f64> = series.points().iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_close_range() {
        assert_eq!(Series::default().close_range(), None);
        let series = Series::from_points(vec![point(14, 30, 2.5), point(14, 35, 1.5)]);
        assert_eq!(series.close_range(), Some((1.5, 2.5)));
    }
}
