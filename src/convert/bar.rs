//! Column / stacked-column conversion.
//!
//! Stacking is a chart-level option decided by the caller; every series here
//! is a plain `column`.

use crate::convert::points::{assert_non_empty, time_points};
use crate::domain::{ConvertedSeries, NamedSeries, SeriesType};
use crate::error::ConvertError;

pub const FAMILY: [&str; 2] = ["column", "stacked_column"];

pub fn convert(series: &[NamedSeries]) -> Result<Vec<ConvertedSeries>, ConvertError> {
    assert_non_empty(series)?;

    Ok(series
        .iter()
        .map(|s| ConvertedSeries::new(s.label(), SeriesType::Column, time_points(&s.data_points)))
        .collect())
}
