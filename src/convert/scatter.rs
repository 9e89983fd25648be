//! Scatter conversion: join two series on date into `[x, y]` value pairs.
//!
//! The join builds a date lookup for the second series once and probes it
//! while walking the first, so it runs in `O(n + m)`.

use std::collections::{HashMap, HashSet};

use crate::convert::points::{assert_non_empty, date_key, parse_value};
use crate::domain::{ConvertedSeries, DataPoint, NamedSeries, Scalar, SeriesType};
use crate::error::ConvertError;

pub const FAMILY: [&str; 1] = ["scatter"];

/// Relative point-count difference above which we warn.
const COUNT_MISMATCH_RATIO: f64 = 0.1;
/// Fewer aligned points than this makes a sparse plot.
const MIN_COMFORTABLE_POINTS: usize = 5;

pub fn convert(series: &[NamedSeries]) -> Result<Vec<ConvertedSeries>, ConvertError> {
    assert_non_empty(series)?;

    let [x, y] = series else {
        return Err(ConvertError::WrongSeriesCount { count: series.len() });
    };

    for s in [x, y] {
        if s.data_points.is_empty() {
            return Err(ConvertError::IncompleteData {
                name: s.label().to_string(),
            });
        }
    }

    if let (Some(fx), Some(fy)) = (x.frequency.as_deref(), y.frequency.as_deref()) {
        if fx != fy {
            return Err(ConvertError::FrequencyMismatch {
                left: fx.to_string(),
                right: fy.to_string(),
            });
        }
    }

    // Second series: date -> value. Later duplicates win.
    let lookup: HashMap<String, &Scalar> = y
        .data_points
        .iter()
        .filter_map(|p| Some((date_key(&p.date)?, &p.value)))
        .collect();

    let x_dates: HashSet<String> = x.data_points.iter().filter_map(|p| date_key(&p.date)).collect();
    if !x_dates.iter().any(|d| lookup.contains_key(d)) {
        return Err(ConvertError::NoOverlap {
            left: x.label().to_string(),
            right: y.label().to_string(),
        });
    }

    let (nx, ny) = (x.data_points.len(), y.data_points.len());
    if nx.abs_diff(ny) as f64 > nx.max(ny) as f64 * COUNT_MISMATCH_RATIO {
        log::warn!(
            "scatter inputs differ in size ({nx} vs {ny} points); the plot may be misleading"
        );
    }

    let data: Vec<DataPoint> = x
        .data_points
        .iter()
        .filter_map(|p| {
            let key = date_key(&p.date)?;
            let vx = parse_value(&p.value)?;
            let vy = parse_value(lookup.get(&key)?)?;
            Some(DataPoint::Pair(vx, vy))
        })
        .collect();

    if data.is_empty() {
        return Err(ConvertError::NoValidPairs {
            left: x.label().to_string(),
            right: y.label().to_string(),
        });
    }
    if data.len() < MIN_COMFORTABLE_POINTS {
        log::warn!("scatter has only {} aligned points", data.len());
    }

    Ok(vec![ConvertedSeries::new(
        format!("{} vs {}", x.label(), y.label()),
        SeriesType::Scatter,
        data,
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawPoint;
    use proptest::prelude::*;

    fn series(id: &str, points: &[(&str, &str)]) -> NamedSeries {
        NamedSeries::new(id, points.iter().map(|(d, v)| RawPoint::new(*d, *v)).collect())
    }

    #[test]
    fn pairs_values_on_shared_dates() {
        let a = series("a", &[("2024-01-01", "10"), ("2024-01-02", "20"), ("2024-01-03", "30")]);
        let b = series("b", &[("2024-01-03", "35"), ("2024-01-01", "15"), ("2024-01-09", "99")]);
        let out = convert(&[a, b]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "a vs b");
        assert_eq!(out[0].kind, SeriesType::Scatter);
        assert_eq!(out[0].data, vec![DataPoint::Pair(10.0, 15.0), DataPoint::Pair(30.0, 35.0)]);
    }

    #[test]
    fn arity_must_be_two() {
        let one = vec![series("a", &[("2024-01-01", "1")])];
        assert_eq!(convert(&one), Err(ConvertError::WrongSeriesCount { count: 1 }));

        let three = vec![one[0].clone(), one[0].clone(), one[0].clone()];
        assert_eq!(convert(&three), Err(ConvertError::WrongSeriesCount { count: 3 }));
    }

    #[test]
    fn empty_series_is_incomplete() {
        let input = vec![series("a", &[("2024-01-01", "1")]), series("b", &[])];
        assert_eq!(
            convert(&input),
            Err(ConvertError::IncompleteData { name: "b".to_string() })
        );
    }

    #[test]
    fn declared_frequencies_must_match() {
        let input = vec![
            series("a", &[("2024-01-01", "1")]).with_frequency("M"),
            series("b", &[("2024-01-01", "1")]).with_frequency("Q"),
        ];
        assert!(matches!(convert(&input), Err(ConvertError::FrequencyMismatch { .. })));
    }

    #[test]
    fn one_missing_frequency_is_accepted() {
        let input = vec![
            series("a", &[("2024-01-01", "1")]).with_frequency("M"),
            series("b", &[("2024-01-01", "2")]),
        ];
        assert!(convert(&input).is_ok());
    }

    #[test]
    fn disjoint_dates_do_not_overlap() {
        let input = vec![series("a", &[("2024-01-01", "1")]), series("b", &[("2024-02-01", "1")])];
        assert!(matches!(convert(&input), Err(ConvertError::NoOverlap { .. })));
    }

    #[test]
    fn overlap_without_numbers_has_no_valid_pairs() {
        let input = vec![series("a", &[("2024-01-01", "x")]), series("b", &[("2024-01-01", "1")])];
        assert!(matches!(convert(&input), Err(ConvertError::NoValidPairs { .. })));
    }

    proptest! {
        #[test]
        fn join_yields_one_pair_per_shared_date(
            xs in prop::collection::btree_map(0u32..200, -1000i32..1000, 1..60),
            ys in prop::collection::btree_map(0u32..200, -1000i32..1000, 1..60),
        ) {
            let to_series = |id: &str, m: &std::collections::BTreeMap<u32, i32>| {
                // Reverse order so the join cannot rely on sorted input.
                let points = m.iter().rev()
                    .map(|(d, v)| RawPoint::new(format!("d{d:03}"), f64::from(*v)))
                    .collect();
                NamedSeries::new(id, points)
            };
            let shared: Vec<u32> = xs.keys().filter(|d| ys.contains_key(d)).copied().collect();
            let result = convert(&[to_series("x", &xs), to_series("y", &ys)]);

            if shared.is_empty() {
                prop_assert!(matches!(result, Err(ConvertError::NoOverlap { .. })), "expected NoOverlap");
            } else {
                let out = result.unwrap();
                prop_assert_eq!(out[0].data.len(), shared.len());
                for d in shared {
                    let expected = DataPoint::Pair(f64::from(xs[&d]), f64::from(ys[&d]));
                    prop_assert!(out[0].data.contains(&expected));
                }
            }
        }
    }
}
