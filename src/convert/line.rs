//! Line / area / spline conversion with automatic dual-axis split.

use crate::convert::axis::assign_y_axes;
use crate::convert::points::{assert_non_empty, time_points};
use crate::domain::{ChartKind, ConvertedSeries, NamedSeries, SeriesType};
use crate::error::ConvertError;

pub const FAMILY: [&str; 3] = ["line", "area", "spline"];

/// Output primitive for a requested tag; unknown tags draw as `line`.
pub fn series_type_for(tag: Option<&str>) -> SeriesType {
    match tag.and_then(ChartKind::parse) {
        Some(ChartKind::Area) => SeriesType::Area,
        Some(ChartKind::Spline) => SeriesType::Spline,
        _ => SeriesType::Line,
    }
}

pub fn convert(series: &[NamedSeries], chart_type: Option<&str>) -> Result<Vec<ConvertedSeries>, ConvertError> {
    assert_non_empty(series)?;

    let kind = series_type_for(chart_type);
    let axes = assign_y_axes(series);

    Ok(series
        .iter()
        .zip(axes)
        .map(|(s, axis)| ConvertedSeries::new(s.label(), kind, time_points(&s.data_points)).on_axis(axis))
        .collect())
}
