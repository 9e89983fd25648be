//! Combo conversion: first series as columns on the left axis, the rest as
//! lines on the right axis.
//!
//! The role split is positional; callers order their inputs accordingly.

use crate::convert::points::{assert_non_empty, time_points};
use crate::domain::{AxisIndex, ConvertedSeries, NamedSeries, SeriesType};
use crate::error::ConvertError;

pub const FAMILY: [&str; 1] = ["combo"];

pub fn convert(series: &[NamedSeries]) -> Result<Vec<ConvertedSeries>, ConvertError> {
    assert_non_empty(series)?;

    Ok(series
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let (kind, axis) = if idx == 0 {
                (SeriesType::Column, AxisIndex::Primary)
            } else {
                (SeriesType::Line, AxisIndex::Secondary)
            };
            ConvertedSeries::new(s.label(), kind, time_points(&s.data_points)).on_axis(axis)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawPoint;

    #[test]
    fn roles_follow_input_position() {
        let input: Vec<NamedSeries> = ["a", "b", "c"]
            .iter()
            .map(|id| NamedSeries::new(*id, vec![RawPoint::new("2024-01-01", 1.0)]))
            .collect();
        let out = convert(&input).unwrap();
        let kinds: Vec<_> = out.iter().map(|s| s.kind).collect();
        let axes: Vec<_> = out.iter().map(|s| s.y_axis).collect();
        assert_eq!(kinds, vec![SeriesType::Column, SeriesType::Line, SeriesType::Line]);
        assert_eq!(
            axes,
            vec![Some(AxisIndex::Primary), Some(AxisIndex::Secondary), Some(AxisIndex::Secondary)]
        );
    }
}
