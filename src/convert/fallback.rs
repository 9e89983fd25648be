//! Catch-all conversion for tags no specialised converter claims.

use crate::convert::axis::assign_y_axes;
use crate::convert::points::{assert_non_empty, time_points};
use crate::domain::{ConvertedSeries, NamedSeries, SeriesType};
use crate::error::ConvertError;

pub fn convert(series: &[NamedSeries]) -> Result<Vec<ConvertedSeries>, ConvertError> {
    assert_non_empty(series)?;

    let axes = assign_y_axes(series);
    Ok(series
        .iter()
        .zip(axes)
        .map(|(s, axis)| ConvertedSeries::new(s.label(), SeriesType::Line, time_points(&s.data_points)).on_axis(axis))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AxisIndex, RawPoint};

    #[test]
    fn draws_lines_with_axis_assignment() {
        let input = vec![
            NamedSeries::new("a", vec![RawPoint::new("2024-01-01", "1")]),
            NamedSeries::new("b", vec![RawPoint::new("2024-01-01", "2")]),
        ];
        let out = convert(&input).unwrap();
        assert!(out.iter().all(|s| s.kind == SeriesType::Line));
        assert!(out.iter().all(|s| s.y_axis == Some(AxisIndex::Primary)));
    }
}
