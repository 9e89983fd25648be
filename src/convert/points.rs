//! Numeric and timestamp coercion shared by every converter.
//!
//! Parsing is best-effort: anything that cannot be coerced becomes `None` and
//! the caller drops the point. Nothing in here returns an error for bad data.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::{DataPoint, NamedSeries, RawPoint, Scalar};
use crate::error::ConvertError;

/// Epoch-seconds range accepted for numeric timestamps.
const SECONDS_RANGE: std::ops::Range<f64> = 1e9..1e10;
/// Epoch-millis range accepted for numeric timestamps.
const MILLIS_RANGE: std::ops::Range<f64> = 1e12..1e13;

const DATETIME_FMTS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FMTS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Fail with `EmptyInput` when there is nothing to convert.
pub fn assert_non_empty<T>(items: &[T]) -> Result<(), ConvertError> {
    if items.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    Ok(())
}

/// Numeric coercion. Text falls back to its longest numeric prefix
/// (`"12.5%"` parses as `12.5`).
pub fn parse_value(value: &Scalar) -> Option<f64> {
    match value {
        Scalar::Number(n) if n.is_finite() => Some(*n),
        Scalar::Text(s) => parse_numeric_text(s),
        _ => None,
    }
}

fn parse_numeric_text(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<f64>() {
        // Rejects "inf"/"NaN" spellings that `f64::from_str` accepts.
        return v.is_finite().then_some(v);
    }
    let end = numeric_prefix_len(s);
    if end == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Length of the leading `[+-]digits[.digits][e[+-]digits]` run.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

/// Date string to epoch millis. Zone-less inputs are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return midnight_millis(d);
        }
    }

    // Month (`2023-04`, `2023/04`) and year (`2023`) resolutions.
    let month = s.replace('/', "-");
    if month.len() == 7 {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d") {
            return midnight_millis(d);
        }
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).and_then(midnight_millis);
    }

    None
}

fn midnight_millis(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis())
}

/// Interpret a number as an epoch timestamp (seconds or millis).
///
/// Values outside both accepted ranges are not timestamps.
pub fn normalize_epoch(n: f64) -> Option<i64> {
    if !n.is_finite() {
        return None;
    }
    if SECONDS_RANGE.contains(&n) {
        return Some((n * 1000.0).round() as i64);
    }
    if MILLIS_RANGE.contains(&n) {
        return Some(n.round() as i64);
    }
    None
}

/// Resolve a point date (date text or numeric epoch) to millis.
///
/// Numbers in the epoch-seconds range are scaled; any other finite number
/// is already epoch millis.
pub fn resolve_timestamp(date: &Scalar) -> Option<i64> {
    match date {
        Scalar::Number(n) => point_epoch_millis(*n),
        Scalar::Text(s) => parse_timestamp(s),
        _ => None,
    }
}

fn point_epoch_millis(n: f64) -> Option<i64> {
    if !n.is_finite() {
        return None;
    }
    let millis = if SECONDS_RANGE.contains(&n) { n * 1000.0 } else { n };
    let millis = millis.round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.timestamp_millis())
}

/// Identity of a point date for joins and intersections.
pub fn date_key(date: &Scalar) -> Option<String> {
    match date {
        Scalar::Text(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Scalar::Number(n) if n.is_finite() => Some(n.to_string()),
        _ => None,
    }
}

/// A point is usable when it has a date and a numeric-parseable value.
pub fn is_valid_point(point: &RawPoint) -> bool {
    date_key(&point.date).is_some() && parse_value(&point.value).is_some()
}

/// Valid points of a series as `[timestampMillis, value]`, order preserved.
pub fn time_points(points: &[RawPoint]) -> Vec<DataPoint> {
    points
        .iter()
        .filter(|p| is_valid_point(p))
        .filter_map(|p| {
            let ts = resolve_timestamp(&p.date)?;
            let value = parse_value(&p.value)?;
            Some(DataPoint::Timed(ts, value))
        })
        .collect()
}

/// Value of the first point whose date matches `date`.
pub fn value_at(series: &NamedSeries, date: &str) -> Option<f64> {
    series
        .data_points
        .iter()
        .find(|p| date_key(&p.date).as_deref() == Some(date))
        .and_then(|p| parse_value(&p.value))
}
