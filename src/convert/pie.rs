//! Pie / donut conversion: collapse many time series into one snapshot.
//!
//! The snapshot date is either supplied by the caller or the latest date
//! shared by every input series. Each series contributes one slice; series
//! with a missing or non-positive value at that date are left out.

use std::collections::BTreeSet;

use chrono::{Datelike, Local, NaiveDate};

use crate::convert::points::{assert_non_empty, date_key, value_at};
use crate::domain::{ChartKind, ConvertOptions, ConvertedSeries, DataPoint, NamedSeries, SeriesType};
use crate::error::ConvertError;

pub const FAMILY: [&str; 2] = ["pie", "donut"];

const TITLE_PREFIX: &str = "Share of total";
const DONUT_INNER_SIZE: &str = "60%";

pub fn convert(series: &[NamedSeries], options: &ConvertOptions) -> Result<Vec<ConvertedSeries>, ConvertError> {
    assert_non_empty(series)?;

    let target_date = match options.target_date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => date.to_string(),
        None => last_common_date(series)?,
    };

    let data: Vec<DataPoint> = series
        .iter()
        .filter_map(|s| {
            let value = value_at(s, &target_date)?;
            (value > 0.0).then(|| DataPoint::Slice(s.label().to_string(), value))
        })
        .collect();

    if data.is_empty() {
        return Err(ConvertError::NoDataAtDate { date: target_date });
    }

    log::debug!("pie snapshot at {target_date}: {} slices", data.len());

    let mut out = ConvertedSeries::new(
        chart_title(&target_date, Local::now().year()),
        SeriesType::Pie,
        data,
    );
    if options.chart_type.as_deref().and_then(ChartKind::parse) == Some(ChartKind::Donut) {
        out.inner_size = Some(DONUT_INNER_SIZE.to_string());
    }
    Ok(vec![out])
}

/// Dates present in every series, sorted ascending.
pub fn available_dates(series: &[NamedSeries]) -> Vec<String> {
    let mut sets = series.iter().map(|s| {
        s.data_points
            .iter()
            .filter_map(|p| date_key(&p.date))
            .collect::<BTreeSet<String>>()
    });

    let Some(first) = sets.next() else {
        return Vec::new();
    };
    sets.fold(first, |common, dates| common.intersection(&dates).cloned().collect())
        .into_iter()
        .collect()
}

/// Latest date shared by all series. ISO dates sort correctly as text.
pub fn last_common_date(series: &[NamedSeries]) -> Result<String, ConvertError> {
    available_dates(series).pop().ok_or(ConvertError::NoCommonDate)
}

/// `"Share of total (Mar 5)"` within `current_year`, otherwise with the year.
pub fn chart_title(target_date: &str, current_year: i32) -> String {
    format!("{TITLE_PREFIX} ({})", format_target_date(target_date, current_year))
}

fn format_target_date(raw: &str, current_year: i32) -> String {
    let Some(date) = parse_calendar_date(raw) else {
        return raw.to_string();
    };
    if date.year() == current_year {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%Y/%m/%d"))
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok())
}
