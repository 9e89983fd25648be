//! Bubble conversion: a sequence plot indexed by position, not by date.

use crate::convert::points::{assert_non_empty, is_valid_point, parse_value};
use crate::domain::{ConvertedSeries, DataPoint, NamedSeries, RawPoint, SeriesType};
use crate::error::ConvertError;

pub const FAMILY: [&str; 1] = ["bubble"];

pub fn convert(series: &[NamedSeries]) -> Result<Vec<ConvertedSeries>, ConvertError> {
    assert_non_empty(series)?;

    Ok(series
        .iter()
        .map(|s| ConvertedSeries::new(s.label(), SeriesType::Bubble, indexed_points(&s.data_points)))
        .collect())
}

/// Invalid points are dropped before indexing so indices stay contiguous.
fn indexed_points(points: &[RawPoint]) -> Vec<DataPoint> {
    points
        .iter()
        .filter(|p| is_valid_point(p))
        .filter_map(|p| parse_value(&p.value))
        .enumerate()
        .map(|(idx, value)| DataPoint::Indexed(idx, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Scalar;

    #[test]
    fn index_reflects_filtered_position() {
        let input = vec![NamedSeries::new(
            "a",
            vec![
                RawPoint::new("2024-01-01", 5.0),
                RawPoint::new("2024-01-02", Scalar::Null),
                RawPoint::new("2024-01-03", 7.0),
            ],
        )];
        let out = convert(&input).unwrap();
        assert_eq!(out[0].kind, SeriesType::Bubble);
        assert_eq!(out[0].data, vec![DataPoint::Indexed(0, 5.0), DataPoint::Indexed(1, 7.0)]);
        assert_eq!(serde_json::to_string(&out[0].data).unwrap(), "[[0,5.0],[1,7.0]]");
    }
}
