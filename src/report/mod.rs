//! Reporting utilities: per-series summaries for terminal output.

mod format;

pub use format::*;

use crate::domain::{AxisIndex, ConvertedSeries, DataPoint};

/// Compact description of one converted series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub name: String,
    pub kind: String,
    pub axis: Option<AxisIndex>,
    pub points: usize,
    /// First and last x for timestamped series.
    pub time_range: Option<(i64, i64)>,
    pub value_range: Option<(f64, f64)>,
}

pub fn summarize(series: &ConvertedSeries) -> SeriesSummary {
    let stamps: Vec<i64> = series
        .data
        .iter()
        .filter_map(|p| match p {
            DataPoint::Timed(ts, _) => Some(*ts),
            _ => None,
        })
        .collect();
    let time_range = match (stamps.iter().min(), stamps.iter().max()) {
        (Some(lo), Some(hi)) => Some((*lo, *hi)),
        _ => None,
    };

    let value_range = series.data.iter().map(DataPoint::value).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
    });

    SeriesSummary {
        name: series.name.clone(),
        kind: series.kind.to_string(),
        axis: series.y_axis,
        points: series.data.len(),
        time_range,
        value_range,
    }
}
